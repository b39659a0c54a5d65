use anchor_lang::prelude::*;

use crate::constants::PENDING_TIMEOUT_SECS;

// =============================================================================
// PENDING COMPUTATIONS (SERIALIZATION LOCKS)
// =============================================================================
// Every MPC computation that rewrites encrypted state is queued in one
// transaction and committed in a later callback. Between the two, the state it
// read must not be rewritten by anyone else, otherwise the callback would
// overwrite a newer ciphertext with a result computed from an older one.
//
// The pool and every ledger account therefore carry an optional lock naming
// the computation account that owns them. Locks are taken at queue time and
// released by the owning callback. They expire so that an aborted computation
// (which never calls back) cannot wedge an account forever.
//
// Disclosures take the same lock, so the value re-encrypted for a viewer is
// the one whose handle was granted.
//

/// Which engine or ledger operation a computation performs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Wrap,
    Unwrap,
    Transfer,
    AddLiquidity,
    SwapUsdcForZama,
    SwapZamaForUsdc,
    RevealReserve,
    RevealBalance,
}

/// Lock record held by the pool or an account while a computation is in flight.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingComputation {
    /// Arcium computation account of the in-flight computation
    pub computation: Pubkey,
    pub kind: OperationKind,
    /// Unix timestamp when the computation was queued
    pub queued_at: i64,
}

impl PendingComputation {
    /// Size in bytes: 32 + 1 + 8 = 41
    pub const SIZE: usize = 32 + 1 + 8;

    pub fn is_expired(&self, now: i64) -> bool {
        now.saturating_sub(self.queued_at) >= PENDING_TIMEOUT_SECS
    }
}

/// Take `slot` for `computation` unless a live lock is already held.
pub fn acquire(
    slot: &mut Option<PendingComputation>,
    computation: Pubkey,
    kind: OperationKind,
    now: i64,
    busy: impl Into<anchor_lang::error::Error>,
) -> Result<()> {
    if let Some(current) = slot {
        if !current.is_expired(now) {
            return Err(busy.into());
        }
        msg!(
            "Expired lock of {:?} computation {} taken over",
            current.kind,
            current.computation
        );
    }
    *slot = Some(PendingComputation {
        computation,
        kind,
        queued_at: now,
    });
    Ok(())
}

/// Release `slot` if (and only if) it is held by `computation` for `kind`.
pub fn release(
    slot: &mut Option<PendingComputation>,
    computation: Pubkey,
    kind: OperationKind,
) -> Result<()> {
    match slot {
        Some(current) if current.computation == computation && current.kind == kind => {
            *slot = None;
            Ok(())
        }
        _ => err!(crate::errors::ErrorCode::StaleComputation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn acquire_rejects_live_lock() {
        let mut slot = None;
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        acquire(&mut slot, first, OperationKind::SwapUsdcForZama, 100, ErrorCode::PoolBusy)
            .unwrap();
        let err = acquire(&mut slot, second, OperationKind::AddLiquidity, 101, ErrorCode::PoolBusy)
            .unwrap_err();
        assert_eq!(err, ErrorCode::PoolBusy.into());
        assert_eq!(slot.unwrap().computation, first);
    }

    #[test]
    fn expired_lock_can_be_taken_over() {
        let mut slot = None;
        let stuck = Pubkey::new_unique();
        let fresh = Pubkey::new_unique();

        acquire(&mut slot, stuck, OperationKind::Wrap, 0, ErrorCode::OperationPending).unwrap();
        acquire(
            &mut slot,
            fresh,
            OperationKind::Unwrap,
            PENDING_TIMEOUT_SECS,
            ErrorCode::OperationPending,
        )
        .unwrap();
        assert_eq!(slot.unwrap().computation, fresh);

        // The stuck computation can no longer commit.
        let err = release(&mut slot, stuck, OperationKind::Wrap).unwrap_err();
        assert_eq!(err, ErrorCode::StaleComputation.into());
        assert!(slot.is_some());
    }

    #[test]
    fn release_requires_matching_computation_and_kind() {
        let mut slot = None;
        let computation = Pubkey::new_unique();
        acquire(&mut slot, computation, OperationKind::Transfer, 5, ErrorCode::OperationPending)
            .unwrap();

        assert!(release(&mut slot, computation, OperationKind::Wrap).is_err());
        release(&mut slot, computation, OperationKind::Transfer).unwrap();
        assert!(slot.is_none());

        // Releasing twice is a stale callback.
        assert!(release(&mut slot, computation, OperationKind::Transfer).is_err());
    }
}
