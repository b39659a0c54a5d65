use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::push_balances;
use crate::errors::ErrorCode;
use crate::state::{Asset, OperationKind};
use crate::{CreditBalanceCallback, WrapTokens};

// =============================================================================
// WRAP TOKENS - SPL deposit into a confidential balance
// =============================================================================
// Flow:
// 1. SPL tokens move from the owner's token account into the pool vault
// 2. The ledger account is locked and credit_balance is queued
// 3. The callback stores the re-encrypted balances and releases the lock
//
// The deposit amount is public (it is an SPL transfer); the resulting balance
// is not. It stays recorded as `pending_amount` until credited, so an aborted
// computation can be refunded through reclaim_wrap.
//

/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `asset_id` - 0 = fUSDC, 1 = fZama
/// * `amount` - Token amount to deposit
pub fn handler(
    ctx: Context<WrapTokens>,
    computation_offset: u64,
    asset_id: u8,
    amount: u64,
) -> Result<()> {
    let asset = Asset::from_id(asset_id)?;
    require!(!ctx.accounts.pool.paused, ErrorCode::ProtocolPaused);
    require!(amount > 0, ErrorCode::InvalidAmount);

    let expected_mint = ctx.accounts.pool.mint_for(asset);
    require_keys_eq!(
        ctx.accounts.user_token_account.mint,
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
    ctx.accounts
        .ledger_account
        .lock(computation, OperationKind::Wrap, now)?;
    ctx.accounts.ledger_account.pending_asset = asset_id;
    ctx.accounts.ledger_account.pending_amount = amount;

    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        anchor_spl::token::Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    anchor_spl::token::transfer(transfer_ctx, amount)?;

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
        vec![CreditBalanceCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: ctx.accounts.ledger_account.key(),
                is_writable: true,
            }],
        )?],
        1,
        0,
    )?;

    msg!(
        "Wrap queued: {} units of asset {}, computation {}",
        amount,
        asset_id,
        computation_offset
    );
    Ok(())
}
