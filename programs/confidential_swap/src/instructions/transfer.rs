use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use super::{push_balances, push_input};
use crate::errors::ErrorCode;
use crate::state::{authorize_debit, Asset, OperationKind};
use crate::verification::{admit, EncryptedInput, InputContext, InputProof};
use crate::{ConfidentialTransfer, TransferBalanceCallback};

// =============================================================================
// CONFIDENTIAL TRANSFER
// =============================================================================
// Moves an encrypted amount of one asset from `from_account` to `to_account`.
// The spender is either the owner or an operator holding an active grant.
// The proof's sequence is the one of the account being debited. The input
// must be encrypted under the spender's registered key: the owner's own
// account, or `spender_account` when an operator spends.
// Recipients must have opted in, since a transfer locks them too.
//

pub fn handler(
    ctx: Context<ConfidentialTransfer>,
    computation_offset: u64,
    asset_id: u8,
    input: EncryptedInput,
    proof: InputProof,
) -> Result<()> {
    Asset::from_id(asset_id)?;
    require!(!ctx.accounts.pool.paused, ErrorCode::ProtocolPaused);
    require_keys_neq!(
        ctx.accounts.from_account.key(),
        ctx.accounts.to_account.key(),
        ErrorCode::InvalidRecipient
    );

    let now = Clock::get()?.unix_timestamp;
    let spender = ctx.accounts.spender.key();
    authorize_debit(
        &spender,
        &ctx.accounts.from_account.owner,
        ctx.accounts.operator_grant.as_deref(),
        now,
    )?;

    ctx.accounts.to_account.ensure_accepts_transfers()?;

    let registered_key = if spender == ctx.accounts.from_account.owner {
        ctx.accounts.from_account.encryption_pubkey
    } else {
        ctx.accounts
            .spender_account
            .as_ref()
            .ok_or(ErrorCode::UnregisteredInputKey)?
            .encryption_pubkey
    };
    let admitted = admit(
        &InputContext {
            submitter: &spender,
            program_id: ctx.program_id,
            registered_key: &registered_key,
            expected_sequence: ctx.accounts.from_account.input_sequence,
            expected_len: 1,
        },
        &input,
        &proof,
    )?;
    ctx.accounts.from_account.consume_input()?;

    let computation = ctx.accounts.computation_account.key();
    ctx.accounts
        .from_account
        .lock(computation, OperationKind::Transfer, now)?;
    ctx.accounts
        .to_account
        .lock(computation, OperationKind::Transfer, now)?;
    ctx.accounts.from_account.pending_asset = asset_id;
    ctx.accounts.to_account.pending_asset = asset_id;

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    let from = &ctx.accounts.from_account;
    let to = &ctx.accounts.to_account;
    let args = push_input(ArgBuilder::new(), &admitted).plaintext_u8(asset_id);
    let args = push_balances(args, from).plaintext_bool(from.balances_ready);
    let args = push_balances(args, to)
        .plaintext_bool(to.balances_ready)
        .build();

    queue_computation(
        ctx.accounts,
        computation_offset,
        args,
        vec![TransferBalanceCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[
                CallbackAccount {
                    pubkey: ctx.accounts.from_account.key(),
                    is_writable: true,
                },
                CallbackAccount {
                    pubkey: ctx.accounts.to_account.key(),
                    is_writable: true,
                },
            ],
        )?],
        1,
        0,
    )?;

    msg!(
        "Transfer queued: {} -> {}, asset {}, computation {}",
        ctx.accounts.from_account.owner,
        ctx.accounts.to_account.owner,
        asset_id,
        computation_offset
    );
    Ok(())
}
