use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::constants::INPUT_PROOF_DOMAIN;
use crate::errors::ErrorCode;

// =============================================================================
// INPUT VERIFICATION GATE
// =============================================================================
// Every encrypted amount a user submits comes with an InputProof binding the
// ciphertexts to:
//   - the submitter (the wallet signing the call)
//   - this program (a proof made for another deployment is useless here)
//   - the submitter's current input sequence (a proof works exactly once)
//
// The digest alone is public, so anyone who sees a submitted input can rehash
// it under their own wallet. The gate therefore also requires the ciphertexts
// to be encrypted under the x25519 key registered to the submitter's ledger
// account. Keys are registered once per owner (EncryptionKeyRecord), so a
// lifted input cannot be replayed from another wallet.
//
// The gate is pure: it returns an AdmittedInput on success and the handler
// consumes the sequence on the ledger account.
//

/// Ciphertexts a client encrypted to the MXE, plus the key material needed to
/// decrypt them in MPC.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EncryptedInput {
    /// Client's x25519 public key used for the shared secret
    pub encryption_pubkey: [u8; 32],
    pub nonce: u128,
    pub ciphertexts: Vec<[u8; 32]>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputProof {
    pub sequence: u64,
    pub digest: [u8; 32],
}

/// An input that passed the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmittedInput {
    pub encryption_pubkey: [u8; 32],
    pub nonce: u128,
    pub ciphertexts: Vec<[u8; 32]>,
}

pub fn input_digest(
    submitter: &Pubkey,
    program_id: &Pubkey,
    sequence: u64,
    input: &EncryptedInput,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(INPUT_PROOF_DOMAIN);
    hasher.update(submitter.as_ref());
    hasher.update(program_id.as_ref());
    hasher.update(sequence.to_le_bytes());
    hasher.update(input.encryption_pubkey);
    hasher.update(input.nonce.to_le_bytes());
    for ct in &input.ciphertexts {
        hasher.update(ct);
    }
    hasher.finalize().into()
}

/// Build the proof a client attaches to `input`.
pub fn prove_input(
    submitter: &Pubkey,
    program_id: &Pubkey,
    sequence: u64,
    input: &EncryptedInput,
) -> InputProof {
    InputProof {
        sequence,
        digest: input_digest(submitter, program_id, sequence, input),
    }
}

/// What the gate checks an input against.
#[derive(Clone, Copy, Debug)]
pub struct InputContext<'a> {
    pub submitter: &'a Pubkey,
    pub program_id: &'a Pubkey,
    /// x25519 key on the submitter's ledger account
    pub registered_key: &'a [u8; 32],
    pub expected_sequence: u64,
    pub expected_len: usize,
}

pub fn admit(
    ctx: &InputContext,
    input: &EncryptedInput,
    proof: &InputProof,
) -> Result<AdmittedInput> {
    require!(
        input.encryption_pubkey == *ctx.registered_key,
        ErrorCode::UnregisteredInputKey
    );
    require!(
        input.ciphertexts.len() == ctx.expected_len,
        ErrorCode::InvalidProof
    );
    let digest = input_digest(ctx.submitter, ctx.program_id, proof.sequence, input);
    require!(digest == proof.digest, ErrorCode::InvalidProof);
    require!(
        proof.sequence == ctx.expected_sequence,
        ErrorCode::StaleOrReplayedProof
    );

    Ok(AdmittedInput {
        encryption_pubkey: input.encryption_pubkey,
        nonce: input.nonce,
        ciphertexts: input.ciphertexts.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [5u8; 32];

    fn input(n: usize) -> EncryptedInput {
        EncryptedInput {
            encryption_pubkey: KEY,
            nonce: 1234,
            ciphertexts: (0..n).map(|i| [i as u8 + 1; 32]).collect(),
        }
    }

    fn context<'a>(
        submitter: &'a Pubkey,
        program_id: &'a Pubkey,
        sequence: u64,
        len: usize,
    ) -> InputContext<'a> {
        InputContext {
            submitter,
            program_id,
            registered_key: &KEY,
            expected_sequence: sequence,
            expected_len: len,
        }
    }

    #[test]
    fn admits_input_bound_to_submitter_and_program() {
        let user = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let input = input(1);
        let proof = prove_input(&user, &program, 0, &input);

        let admitted = admit(&context(&user, &program, 0, 1), &input, &proof).unwrap();
        assert_eq!(admitted.ciphertexts, input.ciphertexts);
        assert_eq!(admitted.nonce, 1234);
    }

    #[test]
    fn proof_for_another_program_is_rejected() {
        let user = Pubkey::new_unique();
        let program_a = Pubkey::new_unique();
        let program_b = Pubkey::new_unique();
        let input = input(1);
        let proof = prove_input(&user, &program_a, 0, &input);

        assert_eq!(
            admit(&context(&user, &program_b, 0, 1), &input, &proof).unwrap_err(),
            ErrorCode::InvalidProof.into()
        );
    }

    #[test]
    fn proof_for_another_submitter_is_rejected() {
        let alice = Pubkey::new_unique();
        let mallory = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let input = input(2);
        let proof = prove_input(&alice, &program, 3, &input);

        assert_eq!(
            admit(&context(&mallory, &program, 3, 2), &input, &proof).unwrap_err(),
            ErrorCode::InvalidProof.into()
        );
    }

    #[test]
    fn lifted_input_rehashed_by_another_wallet_is_rejected() {
        // Mallory copies Alice's ciphertexts and recomputes a valid digest
        // for her own wallet and sequence.
        let mallory = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let lifted = input(1);
        let forged = prove_input(&mallory, &program, 0, &lifted);
        let mallory_key = [9u8; 32];

        let ctx = InputContext {
            registered_key: &mallory_key,
            ..context(&mallory, &program, 0, 1)
        };
        assert_eq!(
            admit(&ctx, &lifted, &forged).unwrap_err(),
            ErrorCode::UnregisteredInputKey.into()
        );
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let user = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let mut input = input(1);
        let proof = prove_input(&user, &program, 0, &input);
        input.ciphertexts[0][0] ^= 1;

        assert!(admit(&context(&user, &program, 0, 1), &input, &proof).is_err());
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let user = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let input = input(1);
        let proof = prove_input(&user, &program, 0, &input);

        assert_eq!(
            admit(&context(&user, &program, 0, 2), &input, &proof).unwrap_err(),
            ErrorCode::InvalidProof.into()
        );
    }

    #[test]
    fn replayed_proof_is_rejected() {
        let user = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let input = input(1);
        let proof = prove_input(&user, &program, 0, &input);

        admit(&context(&user, &program, 0, 1), &input, &proof).unwrap();
        // The handler consumed sequence 0; the same proof is now stale.
        assert_eq!(
            admit(&context(&user, &program, 1, 1), &input, &proof).unwrap_err(),
            ErrorCode::StaleOrReplayedProof.into()
        );
    }
}
