use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::constants::{ASSET_USDC, ASSET_ZAMA, HANDLE_DOMAIN};
use crate::errors::ErrorCode;

// =============================================================================
// ENCRYPTED VALUES
// =============================================================================
// An EncryptedAmount is an opaque reference to an Arcium ciphertext of a u64.
// The program only stores, forwards and replaces these; arithmetic happens in
// the encrypted-ixs circuits and plaintext never appears on-chain.
//

/// The two confidential assets traded by the pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    Usdc,
    Zama,
}

impl Asset {
    pub fn id(self) -> u8 {
        match self {
            Asset::Usdc => ASSET_USDC,
            Asset::Zama => ASSET_ZAMA,
        }
    }

    /// Slot index in balance / reserve arrays
    pub fn index(self) -> usize {
        self.id() as usize
    }

    pub fn from_id(asset_id: u8) -> Result<Self> {
        match asset_id {
            ASSET_USDC => Ok(Asset::Usdc),
            ASSET_ZAMA => Ok(Asset::Zama),
            _ => err!(ErrorCode::InvalidAssetId),
        }
    }
}

/// Ciphertext + nonce of a single encrypted u64.
///
/// Values sharing one encryption (a struct encrypted in one MPC output) share
/// the nonce, so a balance pair or the reserve pair yields two
/// EncryptedAmounts with the same nonce.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncryptedAmount {
    pub ciphertext: [u8; 32],
    pub nonce: u128,
}

impl EncryptedAmount {
    pub fn new(ciphertext: [u8; 32], nonce: u128) -> Self {
        Self { ciphertext, nonce }
    }

    /// Stable identifier of this exact ciphertext.
    /// Changes whenever the value is re-encrypted, even if the plaintext is equal.
    pub fn handle(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(HANDLE_DOMAIN);
        hasher.update(self.ciphertext);
        hasher.update(self.nonce.to_le_bytes());
        hasher.finalize().into()
    }
}

/// Both reserve handles, returned by the `get_reserves` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReserveHandles {
    pub usdc: EncryptedAmount,
    pub zama: EncryptedAmount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_ids_round_trip_and_reject_unknown() {
        assert_eq!(Asset::from_id(0).unwrap(), Asset::Usdc);
        assert_eq!(Asset::from_id(1).unwrap(), Asset::Zama);
        assert_eq!(Asset::Zama.index(), 1);
        assert_eq!(
            Asset::from_id(2).unwrap_err(),
            ErrorCode::InvalidAssetId.into()
        );
    }

    #[test]
    fn handle_tracks_ciphertext_and_nonce() {
        let a = EncryptedAmount::new([7u8; 32], 42);
        let same = EncryptedAmount::new([7u8; 32], 42);
        let renonced = EncryptedAmount::new([7u8; 32], 43);
        let other = EncryptedAmount::new([8u8; 32], 42);

        assert_eq!(a.handle(), same.handle());
        assert_ne!(a.handle(), renonced.handle());
        assert_ne!(a.handle(), other.handle());
    }
}
