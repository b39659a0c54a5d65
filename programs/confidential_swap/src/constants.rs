// =============================================================================
// ASSET IDENTIFIERS
// =============================================================================
// The exchange holds exactly two confidential assets. The ids index the
// per-account balance slots and the pool reserve slots.
//

/// fUSDC (confidential USDC) - Asset ID 0
pub const ASSET_USDC: u8 = 0;

/// fZama (confidential Zama token) - Asset ID 1
pub const ASSET_ZAMA: u8 = 1;

/// Number of assets held per account and per pool
pub const NUM_ASSETS: usize = 2;

// =============================================================================
// SWAP PRICING
// =============================================================================
// Fixed-rate pool: 1 fZama = 2 fUSDC, 0.3% fee skimmed from the input.
// These constants are mirrored in encrypted-ixs; keep both in sync.

/// Fee multiplier numerator (input retained after fee = 997 / 1000)
pub const FEE_NUMERATOR: u64 = 997;

/// Fee multiplier denominator
pub const FEE_DENOMINATOR: u64 = 1000;

/// Price of one fZama expressed in fUSDC base units
pub const ZAMA_PRICE_IN_USDC: u64 = 2;

// =============================================================================
// SERIALIZATION
// =============================================================================

/// Seconds after which an un-answered computation no longer holds its lock.
/// Aborted MPC computations never call back, so locks must expire.
pub const PENDING_TIMEOUT_SECS: i64 = 120;

// =============================================================================
// DISCLOSURE POLICY
// =============================================================================

/// Seconds per day, used for the disclosure authorization window
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Default validity window clients request for a disclosure authorization
pub const DEFAULT_AUTHORIZATION_DAYS: u16 = 10;

/// Upper bound accepted for `max_authorization_days`
pub const MAX_AUTHORIZATION_DAYS_LIMIT: u16 = 365;

/// Grant TTL meaning "standing grant, never expires"
pub const STANDING_GRANT_TTL: i64 = 0;

// =============================================================================
// DIGEST DOMAIN TAGS
// =============================================================================

/// Domain separation tag for ciphertext handles
pub const HANDLE_DOMAIN: &[u8] = b"confidential-swap/handle/v1";

/// Domain separation tag for input proofs
pub const INPUT_PROOF_DOMAIN: &[u8] = b"confidential-swap/input-proof/v1";

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Seed for the swap pool account (singleton)
pub const POOL_SEED: &[u8] = b"pool";

/// Seed prefix for confidential ledger accounts
pub const ACCOUNT_SEED: &[u8] = b"account";

/// Seed prefix for encryption key records (one owner per x25519 key)
pub const ENCRYPTION_KEY_SEED: &[u8] = b"enc_key";

/// Seed prefix for operator grants
pub const OPERATOR_SEED: &[u8] = b"operator";

/// Seed prefix for disclosure grants
pub const DISCLOSURE_SEED: &[u8] = b"disclosure";

/// Seed prefix for SPL vaults backing the confidential balances
pub const VAULT_SEED: &[u8] = b"vault";

// Vault-specific seeds
pub const VAULT_USDC_SEED: &[u8] = b"usdc";
pub const VAULT_ZAMA_SEED: &[u8] = b"zama";
