use anchor_lang::prelude::*;

use super::initialize::check_disclosure_policy;
use crate::{PoolAdmin, PoolConfigUpdatedEvent};

// =============================================================================
// ADMIN INSTRUCTIONS
// =============================================================================
// Authority-only runtime configuration. `has_one = authority` on the context
// rejects every other signer.
//

pub fn set_paused(ctx: Context<PoolAdmin>, paused: bool) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.paused = paused;

    emit!(PoolConfigUpdatedEvent {
        paused: pool.paused,
        public_reserve_disclosure: pool.public_reserve_disclosure,
        disclosure_ttl_secs: pool.disclosure_ttl_secs,
        max_authorization_days: pool.max_authorization_days,
    });

    msg!("Protocol {}", if paused { "paused" } else { "unpaused" });
    Ok(())
}

/// # Arguments
/// * `public_reserve_disclosure` - Let anyone call allow_reserves
/// * `disclosure_ttl_secs` - Lifetime of new grants (0 = standing grants)
/// * `max_authorization_days` - Longest accepted disclosure authorization window
pub fn set_disclosure_policy(
    ctx: Context<PoolAdmin>,
    public_reserve_disclosure: bool,
    disclosure_ttl_secs: i64,
    max_authorization_days: u16,
) -> Result<()> {
    check_disclosure_policy(disclosure_ttl_secs, max_authorization_days)?;

    let pool = &mut ctx.accounts.pool;
    pool.public_reserve_disclosure = public_reserve_disclosure;
    pool.disclosure_ttl_secs = disclosure_ttl_secs;
    pool.max_authorization_days = max_authorization_days;

    emit!(PoolConfigUpdatedEvent {
        paused: pool.paused,
        public_reserve_disclosure,
        disclosure_ttl_secs,
        max_authorization_days,
    });

    msg!(
        "Disclosure policy: ttl={}s, max window={} days, public reserves={}",
        disclosure_ttl_secs,
        max_authorization_days,
        public_reserve_disclosure
    );
    Ok(())
}
