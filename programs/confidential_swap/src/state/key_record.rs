use anchor_lang::prelude::*;

// =============================================================================
// ENCRYPTION KEY RECORD
// =============================================================================
// Claims an x25519 public key for one wallet. Created alongside the ledger
// account, so a second wallet cannot open an account under a key it copied
// from someone else's submitted input.
//

/// PDA derived with seeds: ["enc_key", encryption_pubkey]
#[account]
pub struct EncryptionKeyRecord {
    pub owner: Pubkey,
    pub bump: u8,
}

impl EncryptionKeyRecord {
    pub const SIZE: usize = 8 + // discriminator
        32 +  // owner
        1; // bump
}
