use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::swap::admit_engine_debit;
use super::{push_balances, push_input, push_reserves};
use crate::state::OperationKind;
use crate::verification::{EncryptedInput, InputProof};
use crate::{AddLiquidity, AddLiquidityCallback};

// =============================================================================
// ADD LIQUIDITY
// =============================================================================
// Moves an encrypted fUSDC amount and an encrypted fZama amount from the
// provider's balances into the reserves. No fee, no ratio constraint, no LP
// shares: deposited liquidity belongs to the pool.
//

/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `input` - Two ciphertexts [fUSDC amount, fZama amount] under one proof
/// * `proof` - Input proof bound to the provider and their input sequence
pub fn handler(
    ctx: Context<AddLiquidity>,
    computation_offset: u64,
    input: EncryptedInput,
    proof: InputProof,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let provider = ctx.accounts.user.key();
    let computation = ctx.accounts.computation_account.key();
    let admitted = admit_engine_debit(
        &mut ctx.accounts.pool,
        &pool_key,
        &provider,
        &mut ctx.accounts.ledger_account,
        ctx.accounts.operator_grant.as_deref(),
        ctx.program_id,
        &input,
        &proof,
        2,
        computation,
        OperationKind::AddLiquidity,
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
        vec![AddLiquidityCallback::callback_ix(
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
        "Add liquidity queued: provider={}, computation={}",
        provider,
        computation_offset
    );
    Ok(())
}
