use anchor_lang::prelude::*;

use super::encrypted::{Asset, EncryptedAmount, ReserveHandles};
use super::pending::{self, OperationKind, PendingComputation};
use crate::constants::NUM_ASSETS;
use crate::errors::ErrorCode;
use crate::pricing::{self, SwapDirection, SwapQuote};

// =============================================================================
// SWAP POOL ACCOUNT
// =============================================================================
// The SwapPool is the single exchange instance: configuration, the SPL vault
// mints, and the encrypted reserves.
//
// Reserves are encrypted under the MXE key (Enc<Mxe, PoolReserves>) so nobody
// can decrypt them outside MPC. Circuits read them straight from this account,
// which is why `reserves` must stay the first field after the discriminator.
//

/// Byte offset of `reserves` inside the account data (after the discriminator)
pub const RESERVES_OFFSET: u32 = 8;

/// Byte length of the two reserve ciphertexts
pub const RESERVES_LEN: u32 = (NUM_ASSETS * 32) as u32;

/// Central state account of the exchange.
/// PDA derived with seeds: ["pool"]
#[account]
pub struct SwapPool {
    // =========================================================================
    // ENCRYPTED RESERVES (MXE-owned)
    // =========================================================================
    /// Encrypted reserves [fUSDC, fZama], one ciphertext each
    pub reserves: [[u8; 32]; NUM_ASSETS],

    /// Nonce of the reserve encryption (shared by both ciphertexts)
    pub reserve_nonce: u128,

    /// False until init_pool_reserves has stored encrypted zeros
    pub reserves_ready: bool,

    // =========================================================================
    // CONFIGURATION
    // =========================================================================
    /// Admin authority: pause, disclosure policy, reserve disclosure grants
    pub authority: Pubkey,

    /// Mint backing fUSDC
    pub usdc_mint: Pubkey,

    /// Mint backing fZama
    pub zama_mint: Pubkey,

    /// Emergency pause flag. Blocks every state-changing entry point.
    pub paused: bool,

    /// When true anyone may call allow_reserves, not only the authority
    pub public_reserve_disclosure: bool,

    /// Lifetime of new disclosure grants in seconds (0 = standing grant)
    pub disclosure_ttl_secs: i64,

    /// Longest validity window accepted on a signed disclosure authorization
    pub max_authorization_days: u16,

    // =========================================================================
    // SERIALIZATION
    // =========================================================================
    /// Computation currently owning the reserves, if any
    pub pending: Option<PendingComputation>,

    // =========================================================================
    // ANALYTICS
    // =========================================================================
    pub total_swaps: u64,
    pub total_liquidity_adds: u64,

    /// PDA bump seed, used when the pool signs vault transfers
    pub bump: u8,
}

impl SwapPool {
    pub const SIZE: usize = 8 + // discriminator
        32 * NUM_ASSETS + // reserves
        16 +  // reserve_nonce
        1 +   // reserves_ready
        32 +  // authority
        32 +  // usdc_mint
        32 +  // zama_mint
        1 +   // paused
        1 +   // public_reserve_disclosure
        8 +   // disclosure_ttl_secs
        2 +   // max_authorization_days
        1 + PendingComputation::SIZE + // pending (Option)
        8 +   // total_swaps
        8 +   // total_liquidity_adds
        1; // bump

    pub fn mint_for(&self, asset: Asset) -> Pubkey {
        match asset {
            Asset::Usdc => self.usdc_mint,
            Asset::Zama => self.zama_mint,
        }
    }

    pub fn reserve(&self, asset: Asset) -> EncryptedAmount {
        EncryptedAmount::new(self.reserves[asset.index()], self.reserve_nonce)
    }

    pub fn reserve_handles(&self) -> ReserveHandles {
        ReserveHandles {
            usdc: self.reserve(Asset::Usdc),
            zama: self.reserve(Asset::Zama),
        }
    }

    /// Replace both reserve ciphertexts with a fresh MXE encryption.
    pub fn set_reserves(&mut self, ciphertexts: [[u8; 32]; NUM_ASSETS], nonce: u128) {
        self.reserves = ciphertexts;
        self.reserve_nonce = nonce;
    }

    /// Check the pool can accept a reserve-touching operation right now.
    pub fn ensure_open(&self) -> Result<()> {
        require!(!self.paused, ErrorCode::ProtocolPaused);
        require!(self.reserves_ready, ErrorCode::ReservesNotInitialized);
        Ok(())
    }

    /// Quote a swap this pool would execute now. A paused or unseeded pool
    /// cannot swap, so it does not quote either.
    pub fn quote(&self, direction: SwapDirection, amount_in: u64) -> Result<SwapQuote> {
        self.ensure_open()?;
        pricing::quote(direction, amount_in)
    }

    pub fn lock(&mut self, computation: Pubkey, kind: OperationKind, now: i64) -> Result<()> {
        pending::acquire(&mut self.pending, computation, kind, now, ErrorCode::PoolBusy)
    }

    pub fn release(&mut self, computation: Pubkey, kind: OperationKind) -> Result<()> {
        pending::release(&mut self.pending, computation, kind)
    }

    /// Expiry timestamp for a grant issued at `now` under the current policy.
    pub fn grant_expiry(&self, now: i64) -> Result<i64> {
        if self.disclosure_ttl_secs == crate::constants::STANDING_GRANT_TTL {
            return Ok(0);
        }
        now.checked_add(self.disclosure_ttl_secs)
            .ok_or_else(|| ErrorCode::MathOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> SwapPool {
        SwapPool {
            reserves: [[1u8; 32], [2u8; 32]],
            reserve_nonce: 9,
            reserves_ready: true,
            authority: Pubkey::new_unique(),
            usdc_mint: Pubkey::new_unique(),
            zama_mint: Pubkey::new_unique(),
            paused: false,
            public_reserve_disclosure: false,
            disclosure_ttl_secs: 0,
            max_authorization_days: 10,
            pending: None,
            total_swaps: 0,
            total_liquidity_adds: 0,
            bump: 255,
        }
    }

    #[test]
    fn reserve_handles_change_when_reserves_are_replaced() {
        let mut pool = pool();
        let before = pool.reserve_handles();
        assert_eq!(before.usdc.ciphertext, [1u8; 32]);
        assert_eq!(before.zama.nonce, 9);

        // Same plaintext re-encrypted under a new nonce is a new handle.
        pool.set_reserves([[1u8; 32], [2u8; 32]], 10);
        let after = pool.reserve_handles();
        assert_ne!(before.usdc.handle(), after.usdc.handle());
        assert_ne!(before.zama.handle(), after.zama.handle());
    }

    #[test]
    fn ensure_open_checks_pause_and_initialization() {
        let mut pool = pool();
        pool.ensure_open().unwrap();

        pool.paused = true;
        assert_eq!(pool.ensure_open().unwrap_err(), ErrorCode::ProtocolPaused.into());

        pool.paused = false;
        pool.reserves_ready = false;
        assert_eq!(
            pool.ensure_open().unwrap_err(),
            ErrorCode::ReservesNotInitialized.into()
        );
    }

    #[test]
    fn single_writer_on_reserves() {
        let mut pool = pool();
        let swap = Pubkey::new_unique();
        pool.lock(swap, OperationKind::SwapZamaForUsdc, 1_000).unwrap();
        assert_eq!(
            pool.lock(Pubkey::new_unique(), OperationKind::AddLiquidity, 1_001)
                .unwrap_err(),
            ErrorCode::PoolBusy.into()
        );
        pool.release(swap, OperationKind::SwapZamaForUsdc).unwrap();
        pool.lock(Pubkey::new_unique(), OperationKind::AddLiquidity, 1_002)
            .unwrap();
    }

    #[test]
    fn grant_expiry_follows_ttl_policy() {
        let mut pool = pool();
        assert_eq!(pool.grant_expiry(500).unwrap(), 0);

        pool.disclosure_ttl_secs = 3_600;
        assert_eq!(pool.grant_expiry(500).unwrap(), 4_100);

        pool.disclosure_ttl_secs = i64::MAX;
        assert!(pool.grant_expiry(500).is_err());
    }

    #[test]
    fn quotes_only_while_swaps_can_run() {
        let mut pool = pool();
        let q = pool.quote(SwapDirection::UsdcForZama, 100).unwrap();
        assert_eq!(q.amount_out, 49);

        pool.paused = true;
        assert_eq!(
            pool.quote(SwapDirection::UsdcForZama, 100).unwrap_err(),
            ErrorCode::ProtocolPaused.into()
        );

        pool.paused = false;
        pool.reserves_ready = false;
        assert_eq!(
            pool.quote(SwapDirection::ZamaForUsdc, 100).unwrap_err(),
            ErrorCode::ReservesNotInitialized.into()
        );
    }
}
