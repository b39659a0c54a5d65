use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::push_balances;
use crate::errors::ErrorCode;
use crate::state::{Asset, OperationKind};
use crate::{DebitBalanceCallback, UnwrapTokens};

// =============================================================================
// UNWRAP TOKENS - confidential balance back to SPL
// =============================================================================
// The debit is checked in MPC. The SPL transfer out of the vault is DEFERRED
// to the callback and only happens when the circuit reports has_funds.
//

/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `asset_id` - 0 = fUSDC, 1 = fZama
/// * `amount` - Token amount to withdraw
pub fn handler(
    ctx: Context<UnwrapTokens>,
    computation_offset: u64,
    asset_id: u8,
    amount: u64,
) -> Result<()> {
    let asset = Asset::from_id(asset_id)?;
    require!(!ctx.accounts.pool.paused, ErrorCode::ProtocolPaused);
    require!(amount > 0, ErrorCode::InvalidAmount);

    let expected_mint = ctx.accounts.pool.mint_for(asset);
    require_keys_eq!(
        ctx.accounts.recipient_token_account.mint,
        expected_mint,
        ErrorCode::InvalidMint
    );
    require_keys_eq!(ctx.accounts.vault.mint, expected_mint, ErrorCode::InvalidMint);
    require_keys_eq!(
        ctx.accounts.vault.owner,
        ctx.accounts.pool.key(),
        ErrorCode::InvalidOwner
    );

    let now = Clock::get()?.unix_timestamp;
    let computation = ctx.accounts.computation_account.key();
    let account = &mut ctx.accounts.ledger_account;
    account.lock(computation, OperationKind::Unwrap, now)?;
    account.pending_asset = asset_id;
    account.pending_amount = amount;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let account = &ctx.accounts.ledger_account;
    let args = push_balances(ArgBuilder::new(), account)
        .plaintext_bool(account.balances_ready)
        .plaintext_u8(asset_id)
        .plaintext_u64(amount)
        .build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![DebitBalanceCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[
                CallbackAccount {
                    pubkey: ctx.accounts.ledger_account.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: ctx.accounts.pool.key(),
                    is_writable: false,
                },
                CallbackAccount {
                    pubkey: ctx.accounts.vault.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: ctx.accounts.recipient_token_account.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: ctx.accounts.token_program.key(),
                    is_writable: false,
                },
            ],
        )?],
        1,
        0,
    )?;

    msg!(
        "Unwrap queued: {} units of asset {}, computation {} (transfer deferred to callback)",
        amount,
        asset_id,
        computation_offset
    );
    Ok(())
}
