use anchor_lang::prelude::*;

use super::encrypted::EncryptedAmount;
use crate::constants::{MAX_AUTHORIZATION_DAYS_LIMIT, SECONDS_PER_DAY};
use crate::errors::ErrorCode;

// =============================================================================
// DISCLOSURE GRANTS
// =============================================================================
// A grant lets `viewer` obtain the plaintext of ONE concrete ciphertext
// (`handle`) belonging to `subject` (the pool for reserves, a wallet for
// balances). Handles change on every write, so a grant on a stale handle
// discloses nothing newer: after each swap the reserves must be re-granted.
//

/// PDA derived with seeds: ["disclosure", subject, viewer, [asset]]
#[account]
pub struct DisclosureGrant {
    pub subject: Pubkey,
    pub viewer: Pubkey,
    pub asset: u8,
    /// Handle current when the grant was issued
    pub handle: [u8; 32],
    pub granted_at: i64,
    /// 0 means standing grant
    pub expires_at: i64,
    pub bump: u8,
}

impl DisclosureGrant {
    pub const SIZE: usize = 8 + // discriminator
        32 +  // subject
        32 +  // viewer
        1 +   // asset
        32 +  // handle
        8 +   // granted_at
        8 +   // expires_at
        1; // bump

    pub fn is_live(&self, now: i64) -> bool {
        self.expires_at == 0 || now < self.expires_at
    }

    fn covers(&self, subject: &Pubkey, viewer: &Pubkey, asset: u8, handle: &[u8; 32], now: i64) -> bool {
        self.subject == *subject
            && self.viewer == *viewer
            && self.asset == asset
            && self.handle == *handle
            && self.is_live(now)
    }
}

// =============================================================================
// SIGNED DISCLOSURE AUTHORIZATION
// =============================================================================
// The viewer generates an ephemeral x25519 keypair, fills this message and
// submits it in a transaction they sign. The MXE re-encrypts the requested
// value to `ephemeral_pubkey`, which only the viewer can decrypt.
//

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisclosureAuthorization {
    pub viewer: Pubkey,
    /// Program the authorization is scoped to
    pub program: Pubkey,
    pub subject: Pubkey,
    pub asset: u8,
    /// Handle the viewer believes is current
    pub handle: [u8; 32],
    pub ephemeral_pubkey: [u8; 32],
    pub start_timestamp: i64,
    pub duration_days: u16,
}

/// Where a disclosure request is being evaluated.
pub struct DisclosureContext<'a> {
    pub signer: &'a Pubkey,
    pub program_id: &'a Pubkey,
    pub subject: &'a Pubkey,
    pub asset: u8,
    pub current: &'a EncryptedAmount,
    pub max_authorization_days: u16,
    pub now: i64,
}

/// Validate a disclosure request.
///
/// `SignatureMismatch` when the message is not the signer's or not scoped to
/// this program and target, `ExpiredAuthorization` outside its validity
/// window, `NoGrant` when the viewer holds no live grant on the current handle.
/// A wallet reading its own balance needs no grant.
pub fn verify_disclosure(
    auth: &DisclosureAuthorization,
    grant: Option<&DisclosureGrant>,
    ctx: &DisclosureContext,
) -> Result<()> {
    require_keys_eq!(auth.viewer, *ctx.signer, ErrorCode::SignatureMismatch);
    require_keys_eq!(auth.program, *ctx.program_id, ErrorCode::SignatureMismatch);
    require_keys_eq!(auth.subject, *ctx.subject, ErrorCode::SignatureMismatch);
    require!(auth.asset == ctx.asset, ErrorCode::SignatureMismatch);

    require!(
        auth.duration_days >= 1
            && auth.duration_days <= ctx.max_authorization_days.min(MAX_AUTHORIZATION_DAYS_LIMIT),
        ErrorCode::ExpiredAuthorization
    );
    let window_end = auth
        .start_timestamp
        .checked_add(auth.duration_days as i64 * SECONDS_PER_DAY)
        .ok_or(ErrorCode::ExpiredAuthorization)?;
    require!(
        auth.start_timestamp <= ctx.now && ctx.now < window_end,
        ErrorCode::ExpiredAuthorization
    );

    let current = ctx.current.handle();
    require!(auth.handle == current, ErrorCode::NoGrant);

    if auth.viewer == *ctx.subject {
        return Ok(());
    }

    match grant {
        Some(grant) if grant.covers(ctx.subject, &auth.viewer, ctx.asset, &current, ctx.now) => {
            Ok(())
        }
        _ => err!(ErrorCode::NoGrant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        program: Pubkey,
        pool: Pubkey,
        viewer: Pubkey,
        reserve: EncryptedAmount,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                program: Pubkey::new_unique(),
                pool: Pubkey::new_unique(),
                viewer: Pubkey::new_unique(),
                reserve: EncryptedAmount::new([9u8; 32], 1),
            }
        }

        fn auth(&self) -> DisclosureAuthorization {
            DisclosureAuthorization {
                viewer: self.viewer,
                program: self.program,
                subject: self.pool,
                asset: 0,
                handle: self.reserve.handle(),
                ephemeral_pubkey: [1u8; 32],
                start_timestamp: 1_000,
                duration_days: 10,
            }
        }

        fn grant(&self, handle: [u8; 32], expires_at: i64) -> DisclosureGrant {
            DisclosureGrant {
                subject: self.pool,
                viewer: self.viewer,
                asset: 0,
                handle,
                granted_at: 1_000,
                expires_at,
                bump: 255,
            }
        }

        fn ctx<'a>(&'a self, current: &'a EncryptedAmount, now: i64) -> DisclosureContext<'a> {
            DisclosureContext {
                signer: &self.viewer,
                program_id: &self.program,
                subject: &self.pool,
                asset: 0,
                current,
                max_authorization_days: 30,
                now,
            }
        }
    }

    #[test]
    fn disclosure_grant_lifecycle() {
        let f = Fixture::new();
        let auth = f.auth();

        // Before allow: no grant.
        assert_eq!(
            verify_disclosure(&auth, None, &f.ctx(&f.reserve, 2_000)).unwrap_err(),
            ErrorCode::NoGrant.into()
        );

        // After allow: succeeds.
        let grant = f.grant(f.reserve.handle(), 0);
        verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, 2_000)).unwrap();

        // After the value changed: the old grant does not cover the new handle.
        let next = EncryptedAmount::new([9u8; 32], 2);
        let mut fresh_auth = auth;
        fresh_auth.handle = next.handle();
        assert_eq!(
            verify_disclosure(&fresh_auth, Some(&grant), &f.ctx(&next, 2_000)).unwrap_err(),
            ErrorCode::NoGrant.into()
        );

        // Re-grant on the new handle.
        let regrant = f.grant(next.handle(), 0);
        verify_disclosure(&fresh_auth, Some(&regrant), &f.ctx(&next, 2_000)).unwrap();
    }

    #[test]
    fn authorization_window_is_enforced() {
        let f = Fixture::new();
        let grant = f.grant(f.reserve.handle(), 0);
        let auth = f.auth();

        assert_eq!(
            verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, 999)).unwrap_err(),
            ErrorCode::ExpiredAuthorization.into()
        );
        let end = 1_000 + 10 * SECONDS_PER_DAY;
        verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, end - 1)).unwrap();
        assert_eq!(
            verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, end)).unwrap_err(),
            ErrorCode::ExpiredAuthorization.into()
        );

        let mut too_long = auth;
        too_long.duration_days = 31;
        assert!(verify_disclosure(&too_long, Some(&grant), &f.ctx(&f.reserve, 2_000)).is_err());

        let mut zero = auth;
        zero.duration_days = 0;
        assert!(verify_disclosure(&zero, Some(&grant), &f.ctx(&f.reserve, 2_000)).is_err());
    }

    #[test]
    fn authorization_must_belong_to_signer_and_program() {
        let f = Fixture::new();
        let grant = f.grant(f.reserve.handle(), 0);

        let mut forged = f.auth();
        forged.viewer = Pubkey::new_unique();
        assert_eq!(
            verify_disclosure(&forged, Some(&grant), &f.ctx(&f.reserve, 2_000)).unwrap_err(),
            ErrorCode::SignatureMismatch.into()
        );

        let mut other_program = f.auth();
        other_program.program = Pubkey::new_unique();
        assert_eq!(
            verify_disclosure(&other_program, Some(&grant), &f.ctx(&f.reserve, 2_000))
                .unwrap_err(),
            ErrorCode::SignatureMismatch.into()
        );
    }

    #[test]
    fn grant_ttl_expires() {
        let f = Fixture::new();
        let grant = f.grant(f.reserve.handle(), 1_500);
        let auth = f.auth();

        verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, 1_499)).unwrap();
        assert_eq!(
            verify_disclosure(&auth, Some(&grant), &f.ctx(&f.reserve, 1_500)).unwrap_err(),
            ErrorCode::NoGrant.into()
        );
    }

    #[test]
    fn owner_reads_own_balance_without_grant() {
        let program = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let balance = EncryptedAmount::new([4u8; 32], 8);
        let auth = DisclosureAuthorization {
            viewer: owner,
            program,
            subject: owner,
            asset: 1,
            handle: balance.handle(),
            ephemeral_pubkey: [2u8; 32],
            start_timestamp: 0,
            duration_days: 10,
        };
        let ctx = DisclosureContext {
            signer: &owner,
            program_id: &program,
            subject: &owner,
            asset: 1,
            current: &balance,
            max_authorization_days: 10,
            now: 100,
        };
        verify_disclosure(&auth, None, &ctx).unwrap();
    }
}
