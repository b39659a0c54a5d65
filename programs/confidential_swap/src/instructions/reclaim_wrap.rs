use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::Asset;
use crate::ReclaimWrap;

// =============================================================================
// RECLAIM WRAP
// =============================================================================
// Refunds a wrap deposit whose credit_balance computation never called back
// (aborted or dropped by the cluster). Only possible once the lock expired;
// the late callback, if any, is then stale and credits nothing.
//

pub fn handler(ctx: Context<ReclaimWrap>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let (asset_id, amount) = ctx.accounts.ledger_account.take_expired_wrap(now)?;
    let asset = Asset::from_id(asset_id)?;

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

    crate::pay_out_from_vault(
        &ctx.accounts.vault,
        &ctx.accounts.user_token_account,
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.token_program,
        amount,
        ctx.accounts.pool.bump,
    )?;

    msg!(
        "Wrap reclaimed: {} units of asset {} returned to {}",
        amount,
        asset_id,
        ctx.accounts.user.key()
    );
    Ok(())
}
