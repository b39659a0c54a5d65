use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::{push_balances, push_reserves};
use crate::errors::ErrorCode;
use crate::state::{
    verify_disclosure, Asset, DisclosureAuthorization, DisclosureContext, OperationKind,
};
use crate::{
    DisclosureRequestedEvent, RevealBalance, RevealBalanceCallback, RevealReserve,
    RevealReserveCallback,
};

// =============================================================================
// DISCLOSURE REQUESTS
// =============================================================================
// Flow:
// 1. Viewer signs a transaction carrying a DisclosureAuthorization
// 2. Program checks scope, validity window, and the grant on the current handle
// 3. The MXE re-encrypts the value to the viewer's ephemeral x25519 key
// 4. The callback emits the ciphertext; only the viewer can decrypt it
//
// The subject is locked while the request is in flight so the value cannot
// change between the grant check and the re-encryption.
//

/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `asset_id` - Reserve to disclose
/// * `authorization` - Signed request (viewer must be the transaction signer)
/// * `viewer_nonce` - Nonce for the re-encryption to the ephemeral key
pub fn reveal_reserve(
    ctx: Context<RevealReserve>,
    computation_offset: u64,
    asset_id: u8,
    authorization: DisclosureAuthorization,
    viewer_nonce: u128,
) -> Result<()> {
    let asset = Asset::from_id(asset_id)?;
    let pool_key = ctx.accounts.pool.key();
    require!(
        ctx.accounts.pool.reserves_ready,
        ErrorCode::ReservesNotInitialized
    );

    let now = Clock::get()?.unix_timestamp;
    let viewer = ctx.accounts.viewer.key();
    let current = ctx.accounts.pool.reserve(asset);
    verify_disclosure(
        &authorization,
        ctx.accounts.grant.as_deref(),
        &DisclosureContext {
            signer: &viewer,
            program_id: ctx.program_id,
            subject: &pool_key,
            asset: asset_id,
            current: &current,
            max_authorization_days: ctx.accounts.pool.max_authorization_days,
            now,
        },
    )?;

    let computation = ctx.accounts.computation_account.key();
    ctx.accounts
        .pool
        .lock(computation, OperationKind::RevealReserve, now)?;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = push_reserves(ArgBuilder::new(), &ctx.accounts.pool, pool_key)
        .plaintext_u8(asset_id)
        .x25519_pubkey(authorization.ephemeral_pubkey)
        .plaintext_u128(viewer_nonce)
        .build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![RevealReserveCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: pool_key,
                is_writable: true,
            }],
        )?],
        1,
        0,
    )?;

    emit!(DisclosureRequestedEvent {
        viewer,
        subject: pool_key,
        asset: asset_id,
        computation,
    });

    msg!(
        "Reserve disclosure queued: viewer={}, asset={}, computation={}",
        viewer,
        asset_id,
        computation_offset
    );
    Ok(())
}

/// # Arguments
/// * `computation_offset` - Unique ID for this MPC computation
/// * `asset_id` - Balance slot to disclose
/// * `authorization` - Signed request (viewer must be the transaction signer)
/// * `viewer_nonce` - Nonce for the re-encryption to the ephemeral key
pub fn reveal_balance(
    ctx: Context<RevealBalance>,
    computation_offset: u64,
    asset_id: u8,
    authorization: DisclosureAuthorization,
    viewer_nonce: u128,
) -> Result<()> {
    let asset = Asset::from_id(asset_id)?;
    let account = &ctx.accounts.subject_account;
    require!(account.balances_ready, ErrorCode::BalanceNotInitialized);

    let now = Clock::get()?.unix_timestamp;
    let viewer = ctx.accounts.viewer.key();
    let subject = account.owner;
    let current = account.balance(asset);
    verify_disclosure(
        &authorization,
        ctx.accounts.grant.as_deref(),
        &DisclosureContext {
            signer: &viewer,
            program_id: ctx.program_id,
            subject: &subject,
            asset: asset_id,
            current: &current,
            max_authorization_days: ctx.accounts.pool.max_authorization_days,
            now,
        },
    )?;

    let computation = ctx.accounts.computation_account.key();
    ctx.accounts
        .subject_account
        .lock(computation, OperationKind::RevealBalance, now)?;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let args = push_balances(ArgBuilder::new(), &ctx.accounts.subject_account)
        .plaintext_u8(asset_id)
        .x25519_pubkey(authorization.ephemeral_pubkey)
        .plaintext_u128(viewer_nonce)
        .build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![RevealBalanceCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: ctx.accounts.subject_account.key(),
                is_writable: true,
            }],
        )?],
        1,
        0,
    )?;

    emit!(DisclosureRequestedEvent {
        viewer,
        subject,
        asset: asset_id,
        computation,
    });

    msg!(
        "Balance disclosure queued: viewer={}, subject={}, asset={}, computation={}",
        viewer,
        subject,
        asset_id,
        computation_offset
    );
    Ok(())
}
