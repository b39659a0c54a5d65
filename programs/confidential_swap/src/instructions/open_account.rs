use anchor_lang::prelude::*;

use crate::constants::NUM_ASSETS;
use crate::{AccountOpenedEvent, OpenAccount, SetAcceptTransfers};

// =============================================================================
// OPEN ACCOUNT
// =============================================================================
// Creates the caller's ledger account. Both balance slots start empty and read
// as zero until the first credit, so no encryption is needed here.
// The encryption key is claimed in the same instruction; `init` fails if
// another wallet already holds it.
//

/// # Arguments
/// * `encryption_pubkey` - Owner's x25519 public key; balances are encrypted to it
/// * `accepts_transfers` - Whether others may send confidential transfers here
pub fn handler(
    ctx: Context<OpenAccount>,
    encryption_pubkey: [u8; 32],
    accepts_transfers: bool,
) -> Result<()> {
    let record = &mut ctx.accounts.key_record;
    record.owner = ctx.accounts.owner.key();
    record.bump = ctx.bumps.key_record;

    let account = &mut ctx.accounts.ledger_account;

    account.owner = ctx.accounts.owner.key();
    account.encryption_pubkey = encryption_pubkey;
    account.balances = [[0u8; 32]; NUM_ASSETS];
    account.balance_nonce = 0;
    account.balances_ready = false;
    account.input_sequence = 0;
    account.accepts_transfers = accepts_transfers;
    account.pending = None;
    account.pending_asset = 0;
    account.pending_amount = 0;
    account.bump = ctx.bumps.ledger_account;

    emit!(AccountOpenedEvent {
        owner: account.owner,
        account: account.key(),
    });

    msg!("Ledger account opened for {}", account.owner);
    Ok(())
}

/// Opt in to or out of incoming confidential transfers.
pub fn set_accept_transfers(ctx: Context<SetAcceptTransfers>, accepts: bool) -> Result<()> {
    let account = &mut ctx.accounts.ledger_account;
    account.accepts_transfers = accepts;
    msg!("{} accepts transfers: {}", account.owner, accepts);
    Ok(())
}
