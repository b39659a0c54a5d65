use anchor_lang::prelude::*;

use crate::constants::{ASSET_USDC, ASSET_ZAMA};
use crate::errors::ErrorCode;
use crate::state::{Asset, DisclosureGrant, EncryptedAmount};
use crate::{AllowBalanceReveal, AllowReserves, RevealAllowedEvent};

// =============================================================================
// DISCLOSURE GRANTS
// =============================================================================
// Grants pin the handle that is current right now. Reserves change on every
// swap, so a viewer who wants the latest reserves must be granted again after
// each state change.
//

#[allow(clippy::too_many_arguments)]
fn write_grant(
    grant: &mut DisclosureGrant,
    subject: Pubkey,
    viewer: Pubkey,
    asset: u8,
    value: &EncryptedAmount,
    now: i64,
    expires_at: i64,
    bump: u8,
) -> [u8; 32] {
    let handle = value.handle();
    grant.subject = subject;
    grant.viewer = viewer;
    grant.asset = asset;
    grant.handle = handle;
    grant.granted_at = now;
    grant.expires_at = expires_at;
    grant.bump = bump;
    handle
}

/// Grant `viewer` both current reserve handles.
/// Authority only, unless the pool enables public reserve disclosure.
pub fn allow_reserves(ctx: Context<AllowReserves>, viewer: Pubkey) -> Result<()> {
    let pool = &ctx.accounts.pool;
    require!(pool.reserves_ready, ErrorCode::ReservesNotInitialized);
    require!(
        pool.public_reserve_disclosure || ctx.accounts.caller.key() == pool.authority,
        ErrorCode::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;
    let expires_at = pool.grant_expiry(now)?;
    let pool_key = pool.key();
    let usdc = pool.reserve(Asset::Usdc);
    let zama = pool.reserve(Asset::Zama);

    let usdc_handle = write_grant(
        &mut ctx.accounts.usdc_grant,
        pool_key,
        viewer,
        ASSET_USDC,
        &usdc,
        now,
        expires_at,
        ctx.bumps.usdc_grant,
    );
    let zama_handle = write_grant(
        &mut ctx.accounts.zama_grant,
        pool_key,
        viewer,
        ASSET_ZAMA,
        &zama,
        now,
        expires_at,
        ctx.bumps.zama_grant,
    );

    for (asset, handle) in [(ASSET_USDC, usdc_handle), (ASSET_ZAMA, zama_handle)] {
        emit!(RevealAllowedEvent {
            subject: pool_key,
            viewer,
            asset,
            handle,
            expires_at,
        });
    }

    msg!("Reserves disclosed to {} (expires_at={})", viewer, expires_at);
    Ok(())
}

/// Grant `viewer` the current handle of one of the owner's balances.
pub fn allow_balance_reveal(
    ctx: Context<AllowBalanceReveal>,
    viewer: Pubkey,
    asset_id: u8,
) -> Result<()> {
    let asset = Asset::from_id(asset_id)?;
    let account = &ctx.accounts.ledger_account;
    require!(account.balances_ready, ErrorCode::BalanceNotInitialized);

    let now = Clock::get()?.unix_timestamp;
    let expires_at = ctx.accounts.pool.grant_expiry(now)?;
    let owner = account.owner;
    let balance = account.balance(asset);

    let handle = write_grant(
        &mut ctx.accounts.grant,
        owner,
        viewer,
        asset_id,
        &balance,
        now,
        expires_at,
        ctx.bumps.grant,
    );

    emit!(RevealAllowedEvent {
        subject: owner,
        viewer,
        asset: asset_id,
        handle,
        expires_at,
    });

    msg!(
        "Balance of asset {} disclosed to {} by {}",
        asset_id,
        viewer,
        owner
    );
    Ok(())
}
