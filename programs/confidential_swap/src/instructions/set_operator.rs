use anchor_lang::prelude::*;

use crate::{OperatorSetEvent, SetOperator};

// =============================================================================
// SET OPERATOR
// =============================================================================
// The owner grants `spender` the right to debit their balances until `expiry`.
// Calling again overwrites the grant; any expiry at or before now revokes it.
// Swaps and add_liquidity debit through the pool PDA, so users grant the pool.
//

pub fn handler(ctx: Context<SetOperator>, spender: Pubkey, expiry: i64) -> Result<()> {
    let grant = &mut ctx.accounts.operator_grant;
    grant.owner = ctx.accounts.owner.key();
    grant.spender = spender;
    grant.expiry = expiry;
    grant.bump = ctx.bumps.operator_grant;

    emit!(OperatorSetEvent {
        owner: grant.owner,
        spender,
        expiry,
    });

    msg!(
        "Operator set: owner={}, spender={}, expiry={}",
        grant.owner,
        spender,
        expiry
    );
    Ok(())
}
