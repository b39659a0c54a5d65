use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::{push_balances, push_input, push_reserves};
use crate::constants::NUM_ASSETS;
use crate::errors::ErrorCode;
use crate::state::{authorize_debit, ConfidentialAccount, OperationKind, OperatorGrant, SwapPool};
use crate::verification::{admit, AdmittedInput, EncryptedInput, InputContext, InputProof};
use crate::{SwapUsdcForZama, SwapUsdcForZamaCallback, SwapZamaForUsdc, SwapZamaForUsdcCallback};

// =============================================================================
// FIXED-RATE SWAPS
// =============================================================================
// Flow (both directions):
// 1. Admit the encrypted amount through the input gate
// 2. The pool PDA debits the caller, so it needs the caller's operator grant
// 3. Lock the reserves and the caller's balances, queue the swap circuit
// 4. The callback commits balances and reserves together, or rejects with
//    InsufficientBalance / ReserveUnderflow and writes nothing
//

/// Checks shared by every engine entry point that debits a caller: pool
/// state, operator grant, input proof. Takes both serialization locks.
#[allow(clippy::too_many_arguments)]
pub(crate) fn admit_engine_debit(
    pool: &mut SwapPool,
    pool_key: &Pubkey,
    caller: &Pubkey,
    account: &mut ConfidentialAccount,
    grant: Option<&OperatorGrant>,
    program_id: &Pubkey,
    input: &EncryptedInput,
    proof: &InputProof,
    expected_len: usize,
    computation: Pubkey,
    kind: OperationKind,
) -> Result<AdmittedInput> {
    pool.ensure_open()?;

    let now = Clock::get()?.unix_timestamp;
    authorize_debit(pool_key, caller, grant, now)?;

    let admitted = admit(
        &InputContext {
            submitter: caller,
            program_id,
            registered_key: &account.encryption_pubkey,
            expected_sequence: account.input_sequence,
            expected_len,
        },
        input,
        proof,
    )?;
    account.consume_input()?;

    pool.lock(computation, kind, now)?;
    account.lock(computation, kind, now)?;
    Ok(admitted)
}

/// Ciphertexts + nonce of one MPC-encrypted struct.
pub(crate) type EncryptedPair = ([[u8; 32]; NUM_ASSETS], u128);

/// Commit or reject an engine computation in its callback.
///
/// Both locks are released either way. On rejection the reason is returned and
/// neither balances nor reserves are written.
#[allow(clippy::too_many_arguments)]
pub(crate) fn settle_engine_output(
    pool: &mut SwapPool,
    account: &mut ConfidentialAccount,
    computation: Pubkey,
    kind: OperationKind,
    has_funds: bool,
    within_reserve: bool,
    balances: EncryptedPair,
    reserves: EncryptedPair,
) -> Result<Option<ErrorCode>> {
    pool.release(computation, kind)?;
    account.release(computation, kind)?;

    if !has_funds {
        return Ok(Some(ErrorCode::InsufficientBalance));
    }
    if !within_reserve {
        return Ok(Some(ErrorCode::ReserveUnderflow));
    }

    account.set_balances(balances.0, balances.1);
    pool.set_reserves(reserves.0, reserves.1);
    Ok(None)
}

/// Swap fUSDC for fZama.
///
/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `input` - Encrypted fUSDC amount (one ciphertext)
/// * `proof` - Input proof bound to the caller and their input sequence
pub fn swap_usdc_for_zama(
    ctx: Context<SwapUsdcForZama>,
    computation_offset: u64,
    input: EncryptedInput,
    proof: InputProof,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let caller = ctx.accounts.user.key();
    let computation = ctx.accounts.computation_account.key();
    let admitted = admit_engine_debit(
        &mut ctx.accounts.pool,
        &pool_key,
        &caller,
        &mut ctx.accounts.ledger_account,
        ctx.accounts.operator_grant.as_deref(),
        ctx.program_id,
        &input,
        &proof,
        1,
        computation,
        OperationKind::SwapUsdcForZama,
    )?;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let account = &ctx.accounts.ledger_account;
    let args = push_input(ArgBuilder::new(), &admitted);
    let args = push_balances(args, account).plaintext_bool(account.balances_ready);
    let args = push_reserves(args, &ctx.accounts.pool, pool_key).build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![SwapUsdcForZamaCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[
                CallbackAccount {
                    pubkey: ctx.accounts.ledger_account.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: pool_key,
                    is_writable: true,
                },
            ],
        )?],
        1,
        0,
    )?;

    msg!(
        "Swap fUSDC->fZama queued: user={}, computation={}",
        caller,
        computation_offset
    );
    Ok(())
}

/// Swap fZama for fUSDC.
///
/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `input` - Encrypted fZama amount (one ciphertext)
/// * `proof` - Input proof bound to the caller and their input sequence
pub fn swap_zama_for_usdc(
    ctx: Context<SwapZamaForUsdc>,
    computation_offset: u64,
    input: EncryptedInput,
    proof: InputProof,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let caller = ctx.accounts.user.key();
    let computation = ctx.accounts.computation_account.key();
    let admitted = admit_engine_debit(
        &mut ctx.accounts.pool,
        &pool_key,
        &caller,
        &mut ctx.accounts.ledger_account,
        ctx.accounts.operator_grant.as_deref(),
        ctx.program_id,
        &input,
        &proof,
        1,
        computation,
        OperationKind::SwapZamaForUsdc,
    )?;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let account = &ctx.accounts.ledger_account;
    let args = push_input(ArgBuilder::new(), &admitted);
    let args = push_balances(args, account).plaintext_bool(account.balances_ready);
    let args = push_reserves(args, &ctx.accounts.pool, pool_key).build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![SwapZamaForUsdcCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[
                CallbackAccount {
                    pubkey: ctx.accounts.ledger_account.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: pool_key,
                    is_writable: true,
                },
            ],
        )?],
        1,
        0,
    )?;

    msg!(
        "Swap fZama->fUSDC queued: user={}, computation={}",
        caller,
        computation_offset
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> SwapPool {
        SwapPool {
            reserves: [[1u8; 32], [2u8; 32]],
            reserve_nonce: 1,
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

    fn account() -> ConfidentialAccount {
        ConfidentialAccount {
            owner: Pubkey::new_unique(),
            encryption_pubkey: [7u8; 32],
            balances: [[3u8; 32], [4u8; 32]],
            balance_nonce: 5,
            balances_ready: true,
            input_sequence: 1,
            accepts_transfers: false,
            pending: None,
            pending_asset: 0,
            pending_amount: 0,
            bump: 255,
        }
    }

    fn locked(kind: OperationKind) -> (SwapPool, ConfidentialAccount, Pubkey) {
        let mut pool = pool();
        let mut account = account();
        let computation = Pubkey::new_unique();
        pool.lock(computation, kind, 0).unwrap();
        account.lock(computation, kind, 0).unwrap();
        (pool, account, computation)
    }

    #[test]
    fn commits_balances_and_reserves_together() {
        let kind = OperationKind::SwapUsdcForZama;
        let (mut pool, mut account, computation) = locked(kind);

        let rejected = settle_engine_output(
            &mut pool,
            &mut account,
            computation,
            kind,
            true,
            true,
            ([[8u8; 32], [9u8; 32]], 50),
            ([[10u8; 32], [11u8; 32]], 60),
        )
        .unwrap();

        assert!(rejected.is_none());
        assert_eq!(account.balances, [[8u8; 32], [9u8; 32]]);
        assert_eq!(account.balance_nonce, 50);
        assert_eq!(pool.reserves, [[10u8; 32], [11u8; 32]]);
        assert_eq!(pool.reserve_nonce, 60);
        assert!(pool.pending.is_none() && account.pending.is_none());
    }

    #[test]
    fn reserve_underflow_writes_nothing_but_frees_locks() {
        let kind = OperationKind::SwapZamaForUsdc;
        let (mut pool, mut account, computation) = locked(kind);

        let rejected = settle_engine_output(
            &mut pool,
            &mut account,
            computation,
            kind,
            true,
            false,
            ([[8u8; 32], [9u8; 32]], 50),
            ([[10u8; 32], [11u8; 32]], 60),
        )
        .unwrap();

        assert!(matches!(rejected, Some(ErrorCode::ReserveUnderflow)));
        assert_eq!(account.balances, [[3u8; 32], [4u8; 32]]);
        assert_eq!(pool.reserves, [[1u8; 32], [2u8; 32]]);
        assert!(pool.pending.is_none() && account.pending.is_none());
    }

    #[test]
    fn insufficient_balance_takes_precedence() {
        let kind = OperationKind::AddLiquidity;
        let (mut pool, mut account, computation) = locked(kind);

        let rejected = settle_engine_output(
            &mut pool,
            &mut account,
            computation,
            kind,
            false,
            false,
            ([[0u8; 32]; NUM_ASSETS], 0),
            ([[0u8; 32]; NUM_ASSETS], 0),
        )
        .unwrap();
        assert!(matches!(rejected, Some(ErrorCode::InsufficientBalance)));
        assert_eq!(pool.reserve_nonce, 1);
    }

    #[test]
    fn callback_from_another_computation_is_stale() {
        let kind = OperationKind::SwapUsdcForZama;
        let (mut pool, mut account, _) = locked(kind);

        let err = settle_engine_output(
            &mut pool,
            &mut account,
            Pubkey::new_unique(),
            kind,
            true,
            true,
            ([[8u8; 32], [9u8; 32]], 50),
            ([[10u8; 32], [11u8; 32]], 60),
        )
        .unwrap_err();
        assert_eq!(err, ErrorCode::StaleComputation.into());
        assert!(pool.pending.is_some());
    }

    #[test]
    fn unfunded_swap_with_masked_reserve_flag_is_insufficient_balance() {
        // The circuit reports within_reserve = true whenever has_funds is
        // false, so the reserve never shows through an unfunded swap.
        let kind = OperationKind::SwapZamaForUsdc;
        let (mut pool, mut account, computation) = locked(kind);

        let rejected = settle_engine_output(
            &mut pool,
            &mut account,
            computation,
            kind,
            false,
            true,
            ([[8u8; 32], [9u8; 32]], 50),
            ([[10u8; 32], [11u8; 32]], 60),
        )
        .unwrap();
        assert!(matches!(rejected, Some(ErrorCode::InsufficientBalance)));
        assert_eq!(account.balances, [[3u8; 32], [4u8; 32]]);
        assert_eq!(pool.reserves, [[1u8; 32], [2u8; 32]]);
    }
}
