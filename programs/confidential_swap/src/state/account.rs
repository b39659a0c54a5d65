use anchor_lang::prelude::*;

use super::encrypted::{Asset, EncryptedAmount};
use super::operator::OperatorGrant;
use super::pending::{self, OperationKind, PendingComputation};
use crate::constants::NUM_ASSETS;
use crate::errors::ErrorCode;

// =============================================================================
// CONFIDENTIAL LEDGER ACCOUNT
// =============================================================================
// One account per wallet holding an encrypted fUSDC and fZama balance.
// Balances are Enc<Shared, AccountBalances>: both ciphertexts are encrypted
// together under the owner's x25519 key, so the owner can always decrypt
// their own balances and nobody else can without a disclosure.
//
// An account that has never been credited has no valid ciphertexts yet
// (`balances_ready == false`); circuits read such slots as zero.
//

/// PDA derived with seeds: ["account", owner]
#[account]
pub struct ConfidentialAccount {
    /// Wallet owning this ledger account
    pub owner: Pubkey,

    /// Owner's x25519 public key; balances are encrypted to it
    pub encryption_pubkey: [u8; 32],

    // =========================================================================
    // ENCRYPTED BALANCES
    // =========================================================================
    /// Encrypted balances [fUSDC, fZama]
    pub balances: [[u8; 32]; NUM_ASSETS],

    /// Nonce shared by both balance ciphertexts
    pub balance_nonce: u128,

    /// False until the first credit lands
    pub balances_ready: bool,

    // =========================================================================
    // INPUT VERIFICATION
    // =========================================================================
    /// Sequence the next input proof must carry
    pub input_sequence: u64,

    /// Owner opted in to incoming confidential transfers.
    /// A transfer locks the recipient, so strangers cannot target closed accounts.
    pub accepts_transfers: bool,

    // =========================================================================
    // PENDING COMPUTATION
    // =========================================================================
    /// Computation currently owning these balances, if any
    pub pending: Option<PendingComputation>,

    /// Asset of the pending wrap / unwrap / transfer
    pub pending_asset: u8,

    /// Plaintext amount of a pending wrap (held in the vault, refundable once
    /// the lock expires) or of a pending unwrap (paid out in the callback)
    pub pending_amount: u64,

    pub bump: u8,
}

impl ConfidentialAccount {
    pub const SIZE: usize = 8 + // discriminator
        32 +  // owner
        32 +  // encryption_pubkey
        32 * NUM_ASSETS + // balances
        16 +  // balance_nonce
        1 +   // balances_ready
        8 +   // input_sequence
        1 +   // accepts_transfers
        1 + PendingComputation::SIZE + // pending (Option)
        1 +   // pending_asset
        8 +   // pending_amount
        1; // bump

    pub fn balance(&self, asset: Asset) -> EncryptedAmount {
        EncryptedAmount::new(self.balances[asset.index()], self.balance_nonce)
    }

    /// Commit a new encryption of both balances.
    pub fn set_balances(&mut self, ciphertexts: [[u8; 32]; NUM_ASSETS], nonce: u128) {
        self.balances = ciphertexts;
        self.balance_nonce = nonce;
        self.balances_ready = true;
    }

    /// A wrap whose deposit sits in the vault uncredited blocks the account
    /// until it is credited or reclaimed, even after its lock expired.
    pub fn lock(&mut self, computation: Pubkey, kind: OperationKind, now: i64) -> Result<()> {
        require!(!self.holds_wrap_deposit(), ErrorCode::OperationPending);
        pending::acquire(
            &mut self.pending,
            computation,
            kind,
            now,
            ErrorCode::OperationPending,
        )?;
        // An expired unwrap taken over here leaves its amount behind
        self.pending_amount = 0;
        Ok(())
    }

    pub fn release(&mut self, computation: Pubkey, kind: OperationKind) -> Result<()> {
        pending::release(&mut self.pending, computation, kind)?;
        self.pending_amount = 0;
        Ok(())
    }

    fn holds_wrap_deposit(&self) -> bool {
        matches!(self.pending, Some(p) if p.kind == OperationKind::Wrap) && self.pending_amount > 0
    }

    /// Abandon a wrap whose computation never called back.
    ///
    /// Returns `(asset_id, amount)` to refund from the vault. The lock is
    /// cleared, so a late callback for that computation fails as stale and
    /// cannot credit the same deposit.
    pub fn take_expired_wrap(&mut self, now: i64) -> Result<(u8, u64)> {
        let expired = match self.pending {
            Some(p) if p.kind == OperationKind::Wrap => p.is_expired(now),
            _ => return err!(ErrorCode::NothingToReclaim),
        };
        require!(expired, ErrorCode::OperationPending);
        require!(self.pending_amount > 0, ErrorCode::NothingToReclaim);

        let refund = (self.pending_asset, self.pending_amount);
        self.pending = None;
        self.pending_amount = 0;
        Ok(refund)
    }

    pub fn ensure_accepts_transfers(&self) -> Result<()> {
        require!(self.accepts_transfers, ErrorCode::TransfersDisabled);
        Ok(())
    }

    /// Consume the current input sequence after a proof was admitted.
    pub fn consume_input(&mut self) -> Result<()> {
        self.input_sequence = self
            .input_sequence
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

/// Debit authorization rule of the ledger.
///
/// The owner may always debit their own balance. Anyone else needs an operator
/// grant from the owner that names them and has not expired.
pub fn authorize_debit(
    initiator: &Pubkey,
    owner: &Pubkey,
    grant: Option<&OperatorGrant>,
    now: i64,
) -> Result<()> {
    if initiator == owner {
        return Ok(());
    }
    match grant {
        Some(grant) if grant.covers(owner, initiator, now) => Ok(()),
        _ => err!(ErrorCode::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PENDING_TIMEOUT_SECS;

    fn grant(owner: Pubkey, spender: Pubkey, expiry: i64) -> OperatorGrant {
        OperatorGrant {
            owner,
            spender,
            expiry,
            bump: 255,
        }
    }

    #[test]
    fn owner_needs_no_grant() {
        let owner = Pubkey::new_unique();
        authorize_debit(&owner, &owner, None, 0).unwrap();
    }

    #[test]
    fn operator_authorization_lifecycle() {
        let owner = Pubkey::new_unique();
        let engine = Pubkey::new_unique();

        // Before any grant.
        assert_eq!(
            authorize_debit(&engine, &owner, None, 100).unwrap_err(),
            ErrorCode::Unauthorized.into()
        );

        // Active grant.
        let g = grant(owner, engine, 1_000);
        authorize_debit(&engine, &owner, Some(&g), 100).unwrap();

        // After expiry.
        assert_eq!(
            authorize_debit(&engine, &owner, Some(&g), 1_000).unwrap_err(),
            ErrorCode::Unauthorized.into()
        );
    }

    #[test]
    fn grant_for_another_spender_does_not_apply() {
        let owner = Pubkey::new_unique();
        let engine = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let g = grant(owner, other, i64::MAX);
        assert!(authorize_debit(&engine, &owner, Some(&g), 0).is_err());
    }

    #[test]
    fn fresh_account_becomes_ready_on_first_commit() {
        let mut account = ConfidentialAccount {
            owner: Pubkey::new_unique(),
            encryption_pubkey: [3u8; 32],
            balances: [[0u8; 32]; NUM_ASSETS],
            balance_nonce: 0,
            balances_ready: false,
            input_sequence: 0,
            accepts_transfers: false,
            pending: None,
            pending_asset: 0,
            pending_amount: 0,
            bump: 255,
        };

        account.set_balances([[4u8; 32], [5u8; 32]], 77);
        assert!(account.balances_ready);
        assert_eq!(account.balance(Asset::Zama).ciphertext, [5u8; 32]);
        assert_eq!(account.balance(Asset::Usdc).nonce, 77);

        account.consume_input().unwrap();
        assert_eq!(account.input_sequence, 1);
    }

    #[test]
    fn release_clears_pending_payout() {
        let mut account = ConfidentialAccount {
            owner: Pubkey::new_unique(),
            encryption_pubkey: [0u8; 32],
            balances: [[0u8; 32]; NUM_ASSETS],
            balance_nonce: 0,
            balances_ready: true,
            input_sequence: 0,
            accepts_transfers: false,
            pending: None,
            pending_asset: 1,
            pending_amount: 0,
            bump: 255,
        };
        let computation = Pubkey::new_unique();
        account.lock(computation, OperationKind::Unwrap, 10).unwrap();
        account.pending_amount = 40;

        assert_eq!(
            account
                .lock(Pubkey::new_unique(), OperationKind::Wrap, 11)
                .unwrap_err(),
            ErrorCode::OperationPending.into()
        );

        account.release(computation, OperationKind::Unwrap).unwrap();
        assert_eq!(account.pending_amount, 0);
        assert!(account.pending.is_none());
    }

    fn wrapping(amount: u64, queued_at: i64) -> (ConfidentialAccount, Pubkey) {
        let mut account = ConfidentialAccount {
            owner: Pubkey::new_unique(),
            encryption_pubkey: [1u8; 32],
            balances: [[0u8; 32]; NUM_ASSETS],
            balance_nonce: 0,
            balances_ready: false,
            input_sequence: 0,
            accepts_transfers: false,
            pending: None,
            pending_asset: 0,
            pending_amount: 0,
            bump: 255,
        };
        let computation = Pubkey::new_unique();
        account.lock(computation, OperationKind::Wrap, queued_at).unwrap();
        account.pending_asset = 1;
        account.pending_amount = amount;
        (account, computation)
    }

    #[test]
    fn expired_wrap_deposit_is_refundable_once() {
        let (mut account, computation) = wrapping(500, 0);

        // Still in flight.
        assert_eq!(
            account.take_expired_wrap(PENDING_TIMEOUT_SECS - 1).unwrap_err(),
            ErrorCode::OperationPending.into()
        );

        assert_eq!(account.take_expired_wrap(PENDING_TIMEOUT_SECS).unwrap(), (1, 500));
        assert!(account.pending.is_none());
        assert_eq!(account.pending_amount, 0);

        // A late credit for the refunded deposit is stale.
        assert_eq!(
            account.release(computation, OperationKind::Wrap).unwrap_err(),
            ErrorCode::StaleComputation.into()
        );
        assert_eq!(
            account.take_expired_wrap(PENDING_TIMEOUT_SECS).unwrap_err(),
            ErrorCode::NothingToReclaim.into()
        );
    }

    #[test]
    fn uncredited_wrap_cannot_be_taken_over() {
        let (mut account, _) = wrapping(500, 0);
        let later = PENDING_TIMEOUT_SECS * 10;

        assert_eq!(
            account
                .lock(Pubkey::new_unique(), OperationKind::SwapUsdcForZama, later)
                .unwrap_err(),
            ErrorCode::OperationPending.into()
        );

        account.take_expired_wrap(later).unwrap();
        account
            .lock(Pubkey::new_unique(), OperationKind::SwapUsdcForZama, later)
            .unwrap();
    }

    #[test]
    fn only_wraps_are_reclaimable() {
        let mut account = wrapping(0, 0).0;
        account.pending = None;
        account
            .lock(Pubkey::new_unique(), OperationKind::Unwrap, 0)
            .unwrap();
        account.pending_amount = 40;
        assert_eq!(
            account.take_expired_wrap(PENDING_TIMEOUT_SECS).unwrap_err(),
            ErrorCode::NothingToReclaim.into()
        );
    }

    #[test]
    fn incoming_transfers_are_opt_in() {
        let mut account = wrapping(0, 0).0;
        assert_eq!(
            account.ensure_accepts_transfers().unwrap_err(),
            ErrorCode::TransfersDisabled.into()
        );
        account.accepts_transfers = true;
        account.ensure_accepts_transfers().unwrap();
    }
}
