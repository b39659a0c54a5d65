use anchor_lang::prelude::*;

// =============================================================================
// ERROR CODES
// =============================================================================

#[error_code]
pub enum ErrorCode {
    // =========================================================================
    // PROTOCOL STATE ERRORS
    // =========================================================================
    /// Protocol is paused by admin - no operations allowed
    #[msg("Protocol is paused")]
    ProtocolPaused,

    /// Pool reserves have not been initialized by the MXE yet
    #[msg("Pool reserves not initialized")]
    ReservesNotInitialized,

    /// init_pool_reserves may only run once
    #[msg("Pool reserves already initialized")]
    ReservesAlreadyInitialized,

    // =========================================================================
    // AUTHORIZATION ERRORS
    // =========================================================================
    /// Non-owner debit without an active operator grant, or admin-only call
    #[msg("Unauthorized")]
    Unauthorized,

    // =========================================================================
    // INPUT VERIFICATION ERRORS
    // =========================================================================
    /// Proof does not bind the ciphertexts to this submitter and program
    #[msg("Invalid input proof")]
    InvalidProof,

    /// Proof was produced for an earlier or later input sequence
    #[msg("Stale or replayed input proof")]
    StaleOrReplayedProof,

    /// Ciphertexts were not encrypted under the submitter's registered key
    #[msg("Input key is not registered to the submitter")]
    UnregisteredInputKey,

    // =========================================================================
    // INPUT VALIDATION ERRORS
    // =========================================================================
    /// Amount must be greater than zero
    #[msg("Invalid amount")]
    InvalidAmount,

    /// Asset ID out of range (must be 0 = fUSDC or 1 = fZama)
    #[msg("Invalid asset ID (must be 0 for fUSDC or 1 for fZama)")]
    InvalidAssetId,

    /// Token mint address doesn't match the pool's mint for this asset
    #[msg("Invalid token mint")]
    InvalidMint,

    /// Token account or ledger account owner doesn't match expected
    #[msg("Invalid owner")]
    InvalidOwner,

    /// Transfer recipient must differ from the source account
    #[msg("Invalid recipient")]
    InvalidRecipient,

    /// Recipient has not opted in to incoming transfers
    #[msg("Recipient does not accept transfers")]
    TransfersDisabled,

    /// Disclosure policy values out of range
    #[msg("Invalid disclosure policy")]
    InvalidDisclosurePolicy,

    /// Checked arithmetic overflowed
    #[msg("Math overflow")]
    MathOverflow,

    // =========================================================================
    // BALANCE / RESERVE ERRORS
    // =========================================================================
    /// Account balance is lower than the requested debit
    #[msg("Insufficient balance")]
    InsufficientBalance,

    /// Account was never credited, so there is no balance to disclose
    #[msg("Account balance not initialized")]
    BalanceNotInitialized,

    /// Swap output would exceed the available reserve
    #[msg("Swap output exceeds pool reserve")]
    ReserveUnderflow,

    // =========================================================================
    // SERIALIZATION ERRORS
    // =========================================================================
    /// Another computation currently owns the pool reserves
    #[msg("Pool is busy with another computation")]
    PoolBusy,

    /// Another computation currently owns this account's balances
    #[msg("Account has a pending computation")]
    OperationPending,

    /// Callback for a computation that no longer holds the lock
    #[msg("Computation no longer holds the lock")]
    StaleComputation,

    /// No expired, uncredited wrap deposit on this account
    #[msg("Nothing to reclaim")]
    NothingToReclaim,

    // =========================================================================
    // DISCLOSURE ERRORS
    // =========================================================================
    /// Viewer holds no grant for the requested handle
    #[msg("No disclosure grant for this handle")]
    NoGrant,

    /// Signed authorization window not yet open or already lapsed
    #[msg("Disclosure authorization expired")]
    ExpiredAuthorization,

    /// Authorization was not signed by the declaring viewer for this program
    #[msg("Disclosure authorization signature mismatch")]
    SignatureMismatch,

    // =========================================================================
    // ARCIUM MPC ERRORS
    // =========================================================================
    /// MPC computation was aborted by the Arcium cluster
    #[msg("The computation was aborted")]
    AbortedComputation,

    /// Arcium cluster not properly configured
    #[msg("Cluster not set")]
    ClusterNotSet,
}
