use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::Initialize;

// =============================================================================
// INITIALIZE INSTRUCTION HANDLER
// =============================================================================
// Configures the SwapPool and its two SPL vaults. Reserves stay unusable until
// init_pool_reserves stores MXE-encrypted zeros.
//

/// Validate a disclosure policy before it is stored.
pub(crate) fn check_disclosure_policy(disclosure_ttl_secs: i64, max_authorization_days: u16) -> Result<()> {
    require!(disclosure_ttl_secs >= 0, ErrorCode::InvalidDisclosurePolicy);
    require!(
        max_authorization_days >= 1 && max_authorization_days <= MAX_AUTHORIZATION_DAYS_LIMIT,
        ErrorCode::InvalidDisclosurePolicy
    );
    Ok(())
}

/// # Arguments
/// * `disclosure_ttl_secs` - Lifetime of disclosure grants (0 = standing grants)
/// * `max_authorization_days` - Longest accepted disclosure authorization window
/// * `public_reserve_disclosure` - Let anyone grant themselves the reserve handles
pub fn handler(
    ctx: Context<Initialize>,
    disclosure_ttl_secs: i64,
    max_authorization_days: u16,
    public_reserve_disclosure: bool,
) -> Result<()> {
    check_disclosure_policy(disclosure_ttl_secs, max_authorization_days)?;

    let pool = &mut ctx.accounts.pool;
    pool.bump = ctx.bumps.pool;
    pool.authority = ctx.accounts.authority.key();
    pool.usdc_mint = ctx.accounts.usdc_mint.key();
    pool.zama_mint = ctx.accounts.zama_mint.key();

    // Placeholder ciphertexts, never read while reserves_ready is false
    pool.reserves = [[0u8; 32]; NUM_ASSETS];
    pool.reserve_nonce = 0;
    pool.reserves_ready = false;

    pool.paused = false;
    pool.public_reserve_disclosure = public_reserve_disclosure;
    pool.disclosure_ttl_secs = disclosure_ttl_secs;
    pool.max_authorization_days = max_authorization_days;
    pool.pending = None;
    pool.total_swaps = 0;
    pool.total_liquidity_adds = 0;

    msg!("Confidential swap pool initialized");
    msg!("Authority: {}", pool.authority);
    msg!("fUSDC mint: {}", pool.usdc_mint);
    msg!("fZama mint: {}", pool.zama_mint);
    msg!(
        "Disclosure: ttl={}s, max window={} days, public reserves={}",
        pool.disclosure_ttl_secs,
        pool.max_authorization_days,
        pool.public_reserve_disclosure
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disclosure_policy_bounds() {
        check_disclosure_policy(0, DEFAULT_AUTHORIZATION_DAYS).unwrap();
        check_disclosure_policy(3_600, MAX_AUTHORIZATION_DAYS_LIMIT).unwrap();

        assert_eq!(
            check_disclosure_policy(-1, 10).unwrap_err(),
            ErrorCode::InvalidDisclosurePolicy.into()
        );
        assert!(check_disclosure_policy(0, 0).is_err());
        assert!(check_disclosure_policy(0, MAX_AUTHORIZATION_DAYS_LIMIT + 1).is_err());
    }
}
