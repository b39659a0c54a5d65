use anchor_lang::prelude::*;

// =============================================================================
// OPERATOR GRANT
// =============================================================================
// Time-bounded delegation: `spender` may move `owner`'s confidential balances
// until `expiry`. Re-setting overwrites; an expiry in the past revokes.
//

/// PDA derived with seeds: ["operator", owner, spender]
#[account]
pub struct OperatorGrant {
    pub owner: Pubkey,
    pub spender: Pubkey,
    /// Unix timestamp; the grant is active strictly before this instant
    pub expiry: i64,
    pub bump: u8,
}

impl OperatorGrant {
    pub const SIZE: usize = 8 + // discriminator
        32 +  // owner
        32 +  // spender
        8 +   // expiry
        1; // bump

    pub fn is_authorized(&self, now: i64) -> bool {
        now < self.expiry
    }

    /// True when this grant lets `spender` act for `owner` at `now`.
    pub fn covers(&self, owner: &Pubkey, spender: &Pubkey, now: i64) -> bool {
        self.owner == *owner && self.spender == *spender && self.is_authorized(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_lifecycle() {
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();
        let mut grant = OperatorGrant {
            owner,
            spender,
            expiry: 2_000,
            bump: 254,
        };

        assert!(grant.is_authorized(1_999));
        assert!(!grant.is_authorized(2_000));
        assert!(grant.covers(&owner, &spender, 1_000));
        assert!(!grant.covers(&spender, &owner, 1_000));

        // Overwrite with a past expiry revokes.
        grant.expiry = 500;
        assert!(!grant.covers(&owner, &spender, 1_000));
    }
}
