// =============================================================================
// INSTRUCTIONS MODULE
// =============================================================================
// Instruction handlers. Account structs live in lib.rs for Anchor's IDL
// generation; only handlers and their argument plumbing are defined here.
//

use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

use crate::constants::{ASSET_USDC, ASSET_ZAMA};
use crate::state::{ConfidentialAccount, SwapPool, RESERVES_LEN, RESERVES_OFFSET};
use crate::verification::AdmittedInput;

pub mod add_liquidity;
pub mod admin;
pub mod allow_reveal;
pub mod initialize;
pub mod open_account;
pub mod reclaim_wrap;
pub mod reveal;
pub mod set_operator;
pub mod swap;
pub mod transfer;
pub mod unwrap_tokens;
pub mod wrap_tokens;

// =============================================================================
// MPC ARGUMENT HELPERS
// =============================================================================
// Argument order must match the circuit signature in encrypted-ixs.

/// Enc<Shared, _> user input: client key, nonce, then one ciphertext per field.
pub(crate) fn push_input(args: ArgBuilder, input: &AdmittedInput) -> ArgBuilder {
    let mut args = args
        .x25519_pubkey(input.encryption_pubkey)
        .plaintext_u128(input.nonce);
    for ct in &input.ciphertexts {
        args = args.encrypted_u64(*ct);
    }
    args
}

/// Enc<Shared, AccountBalances> stored on a ledger account.
pub(crate) fn push_balances(args: ArgBuilder, account: &ConfidentialAccount) -> ArgBuilder {
    args.x25519_pubkey(account.encryption_pubkey)
        .plaintext_u128(account.balance_nonce)
        .encrypted_u64(account.balances[ASSET_USDC as usize])
        .encrypted_u64(account.balances[ASSET_ZAMA as usize])
}

/// Enc<Mxe, PoolReserves> read by the cluster directly from the pool account.
pub(crate) fn push_reserves(args: ArgBuilder, pool: &SwapPool, pool_key: Pubkey) -> ArgBuilder {
    args.plaintext_u128(pool.reserve_nonce)
        .account(pool_key, RESERVES_OFFSET, RESERVES_LEN)
}
