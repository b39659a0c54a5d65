use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Asset ids, pricing constants, disclosure limits, PDA seeds
pub mod constants;

/// Error codes returned by the program
pub mod errors;

/// Instruction handlers
pub mod instructions;

/// Plaintext pricing arithmetic mirrored by the swap circuits
pub mod pricing;

/// Pool, ledger, operator and disclosure accounts
pub mod state;

/// Input proof admission
pub mod verification;

pub use errors::ErrorCode;

// Instruction argument types referenced by the #[arcium_program]-generated
// instruction structs at crate root.
use state::DisclosureAuthorization;
use verification::{EncryptedInput, InputProof};

// =============================================================================
// ARCIUM COMPUTATION DEFINITION OFFSETS
// =============================================================================
// One per circuit in encrypted-ixs.
//

const COMP_DEF_OFFSET_INIT_POOL_RESERVES: u32 = comp_def_offset("init_pool_reserves");
const COMP_DEF_OFFSET_CREDIT_BALANCE: u32 = comp_def_offset("credit_balance");
const COMP_DEF_OFFSET_DEBIT_BALANCE: u32 = comp_def_offset("debit_balance");
const COMP_DEF_OFFSET_TRANSFER_BALANCE: u32 = comp_def_offset("transfer_balance");
const COMP_DEF_OFFSET_ADD_LIQUIDITY: u32 = comp_def_offset("add_liquidity");
const COMP_DEF_OFFSET_SWAP_USDC_FOR_ZAMA: u32 = comp_def_offset("swap_usdc_for_zama");
const COMP_DEF_OFFSET_SWAP_ZAMA_FOR_USDC: u32 = comp_def_offset("swap_zama_for_usdc");
const COMP_DEF_OFFSET_REVEAL_RESERVE: u32 = comp_def_offset("reveal_reserve");
const COMP_DEF_OFFSET_REVEAL_BALANCE: u32 = comp_def_offset("reveal_balance");

declare_id!("2f4tyGEFNQEwEHJsgc68A6uF8uan67ud6tooiyrgUqgw");

// Confidential Swap - fixed-rate fUSDC/fZama exchange over encrypted balances
//
// - Ledger accounts hold both balances encrypted to their owner
// - Pool reserves are encrypted to the MXE and only ever touched inside MPC
// - Swaps price at 1 fZama = 2 fUSDC with a 0.3% fee on the input
// - Viewers read a balance or a reserve only through an explicit disclosure
//

// =============================================================================
// CALLBACK HELPERS
// =============================================================================
// Defined outside the #[arcium_program] module so the macro does not treat
// them as instructions.

use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::instructions::swap::settle_engine_output;
use crate::pricing::{SwapDirection, SwapQuote};
use crate::state::{EncryptedAmount, OperationKind, ReserveHandles};

/// Pay `amount` out of a pool vault. The pool PDA signs.
pub fn pay_out_from_vault<'info>(
    vault: &Account<'info, TokenAccount>,
    recipient: &Account<'info, TokenAccount>,
    pool: &AccountInfo<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
    pool_bump: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let pool_seeds = &[constants::POOL_SEED, &[pool_bump]];
    let signer_seeds = &[&pool_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        Transfer {
            from: vault.to_account_info(),
            to: recipient.to_account_info(),
            authority: pool.clone(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)
}

fn reject(user: Pubkey, kind: OperationKind, reason: ErrorCode) {
    msg!("{:?} rejected for {}: {:?}", kind, user, reason);
    emit!(OperationRejectedEvent {
        user,
        kind,
        error_code: u32::from(reason),
    });
}

#[arcium_program]
pub mod confidential_swap {
    use super::*;
    use crate::instructions;
    use crate::state::{Asset, DisclosureAuthorization};
    use crate::verification::{EncryptedInput, InputProof};

    // =========================================================================
    // POOL SETUP
    // =========================================================================

    /// Create the SwapPool and its two SPL vaults.
    ///
    /// # Arguments
    /// * `disclosure_ttl_secs` - Lifetime of disclosure grants (0 = standing grants)
    /// * `max_authorization_days` - Longest accepted disclosure authorization window
    /// * `public_reserve_disclosure` - Let anyone call allow_reserves
    pub fn initialize(
        ctx: Context<Initialize>,
        disclosure_ttl_secs: i64,
        max_authorization_days: u16,
        public_reserve_disclosure: bool,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            disclosure_ttl_secs,
            max_authorization_days,
            public_reserve_disclosure,
        )
    }

    pub fn init_init_pool_reserves_comp_def(
        ctx: Context<InitInitPoolReservesCompDef>,
    ) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    /// Store MXE-encrypted zero reserves. Authority only, once.
    pub fn init_pool_reserves(ctx: Context<InitPoolReserves>, computation_offset: u64) -> Result<()> {
        require!(
            !ctx.accounts.pool.reserves_ready,
            ErrorCode::ReservesAlreadyInitialized
        );

        ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

        // Enc<Mxe, _> output only needs the MXE nonce slot
        let args = ArgBuilder::new().plaintext_u128(0).build();

        use arcium_client::idl::arcium::types::CallbackAccount;
        queue_computation(
            ctx.accounts,
            computation_offset,
            args,
            vec![InitPoolReservesCallback::callback_ix(
                computation_offset,
                &ctx.accounts.mxe_account,
                &[CallbackAccount {
                    pubkey: ctx.accounts.pool.key(),
                    is_writable: true,
                }],
            )?],
            1,
            0,
        )?;

        msg!("Reserve initialization queued: computation {}", computation_offset);
        Ok(())
    }

    #[arcium_callback(encrypted_ix = "init_pool_reserves")]
    pub fn init_pool_reserves_callback(
        ctx: Context<InitPoolReservesCallback>,
        output: SignedComputationOutputs<InitPoolReservesOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(InitPoolReservesOutput { field_0 }) => field_0,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let pool = &mut ctx.accounts.pool;
        // A second queued initialization must not wipe live reserves
        if pool.reserves_ready {
            msg!("Reserves already initialized, ignoring duplicate callback");
            return Ok(());
        }
        pool.set_reserves(o.ciphertexts, o.nonce);
        pool.reserves_ready = true;

        emit!(ReservesInitializedEvent {
            pool: pool.key(),
            reserve_nonce: o.nonce.to_le_bytes(),
        });

        msg!("Pool reserves initialized");
        Ok(())
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    pub fn set_paused(ctx: Context<PoolAdmin>, paused: bool) -> Result<()> {
        instructions::admin::set_paused(ctx, paused)
    }

    pub fn set_disclosure_policy(
        ctx: Context<PoolAdmin>,
        public_reserve_disclosure: bool,
        disclosure_ttl_secs: i64,
        max_authorization_days: u16,
    ) -> Result<()> {
        instructions::admin::set_disclosure_policy(
            ctx,
            public_reserve_disclosure,
            disclosure_ttl_secs,
            max_authorization_days,
        )
    }

    // =========================================================================
    // LEDGER ACCOUNTS & OPERATORS
    // =========================================================================

    /// Create the caller's confidential ledger account.
    ///
    /// # Arguments
    /// * `encryption_pubkey` - Owner's x25519 public key for Arcium encryption
    /// * `accepts_transfers` - Open the account to incoming confidential transfers
    pub fn open_account(
        ctx: Context<OpenAccount>,
        encryption_pubkey: [u8; 32],
        accepts_transfers: bool,
    ) -> Result<()> {
        instructions::open_account::handler(ctx, encryption_pubkey, accepts_transfers)
    }

    pub fn set_accept_transfers(ctx: Context<SetAcceptTransfers>, accepts: bool) -> Result<()> {
        instructions::open_account::set_accept_transfers(ctx, accepts)
    }

    /// Let `spender` debit the caller's balances until `expiry` (unix seconds).
    /// An expiry in the past revokes the grant.
    pub fn set_operator(ctx: Context<SetOperator>, spender: Pubkey, expiry: i64) -> Result<()> {
        instructions::set_operator::handler(ctx, spender, expiry)
    }

    /// View: current encrypted balance of one asset.
    /// An account that was never credited returns the zero handle.
    pub fn confidential_balance_of(
        ctx: Context<ConfidentialBalanceOf>,
        asset_id: u8,
    ) -> Result<EncryptedAmount> {
        let asset = Asset::from_id(asset_id)?;
        let account = &ctx.accounts.ledger_account;
        if !account.balances_ready {
            return Ok(EncryptedAmount::default());
        }
        Ok(account.balance(asset))
    }

    // =========================================================================
    // WRAP - SPL deposit into a confidential balance
    // =========================================================================

    pub fn init_credit_balance_comp_def(ctx: Context<InitCreditBalanceCompDef>) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn wrap_tokens(
        ctx: Context<WrapTokens>,
        computation_offset: u64,
        asset_id: u8,
        amount: u64,
    ) -> Result<()> {
        instructions::wrap_tokens::handler(ctx, computation_offset, asset_id, amount)
    }

    #[arcium_callback(encrypted_ix = "credit_balance")]
    pub fn credit_balance_callback(
        ctx: Context<CreditBalanceCallback>,
        output: SignedComputationOutputs<CreditBalanceOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(CreditBalanceOutput { field_0 }) => field_0,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let computation = ctx.accounts.computation_account.key();
        let account = &mut ctx.accounts.ledger_account;
        account.release(computation, OperationKind::Wrap)?;
        account.set_balances(o.ciphertexts, o.nonce);

        emit!(DepositEvent {
            user: account.owner,
            asset: account.pending_asset,
            encrypted_balance: o.ciphertexts[account.pending_asset as usize],
            nonce: o.nonce.to_le_bytes(),
        });

        msg!("Wrap callback: asset {} balance updated", account.pending_asset);
        Ok(())
    }

    /// Refund a wrap deposit whose computation never called back, once its
    /// lock has expired.
    pub fn reclaim_wrap(ctx: Context<ReclaimWrap>) -> Result<()> {
        instructions::reclaim_wrap::handler(ctx)
    }

    // =========================================================================
    // UNWRAP - confidential balance back to SPL
    // =========================================================================

    pub fn init_debit_balance_comp_def(ctx: Context<InitDebitBalanceCompDef>) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn unwrap_tokens(
        ctx: Context<UnwrapTokens>,
        computation_offset: u64,
        asset_id: u8,
        amount: u64,
    ) -> Result<()> {
        instructions::unwrap_tokens::handler(ctx, computation_offset, asset_id, amount)
    }

    /// Pays the deferred SPL transfer only when the circuit reports has_funds.
    #[arcium_callback(encrypted_ix = "debit_balance")]
    pub fn debit_balance_callback(
        ctx: Context<DebitBalanceCallback>,
        output: SignedComputationOutputs<DebitBalanceOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(output) => output,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        // o.field_0.field_0 = has_funds (revealed)
        // o.field_0.field_1 = Enc<Shared, AccountBalances>
        let has_funds: bool = o.field_0.field_0;
        let new_balances = &o.field_0.field_1;

        let computation = ctx.accounts.computation_account.key();
        let amount = ctx.accounts.ledger_account.pending_amount;
        let asset_id = ctx.accounts.ledger_account.pending_asset;
        let owner = ctx.accounts.ledger_account.owner;
        ctx.accounts
            .ledger_account
            .release(computation, OperationKind::Unwrap)?;

        if !has_funds {
            reject(owner, OperationKind::Unwrap, ErrorCode::InsufficientBalance);
            return Ok(());
        }

        pay_out_from_vault(
            &ctx.accounts.vault,
            &ctx.accounts.recipient_token_account,
            &ctx.accounts.pool.to_account_info(),
            &ctx.accounts.token_program,
            amount,
            ctx.accounts.pool.bump,
        )?;

        ctx.accounts
            .ledger_account
            .set_balances(new_balances.ciphertexts, new_balances.nonce);

        emit!(WithdrawEvent {
            user: owner,
            asset: asset_id,
            amount,
            encrypted_balance: new_balances.ciphertexts[asset_id as usize],
            nonce: new_balances.nonce.to_le_bytes(),
        });

        msg!(
            "Unwrap callback: {} units of asset {} paid out, balance updated",
            amount,
            asset_id
        );
        Ok(())
    }

    // =========================================================================
    // CONFIDENTIAL TRANSFER
    // =========================================================================

    pub fn init_transfer_balance_comp_def(
        ctx: Context<InitTransferBalanceCompDef>,
    ) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    /// Move an encrypted amount of one asset between two ledger accounts.
    /// The signer is the owner of `from_account` or an operator it granted.
    pub fn confidential_transfer(
        ctx: Context<ConfidentialTransfer>,
        computation_offset: u64,
        asset_id: u8,
        input: EncryptedInput,
        proof: InputProof,
    ) -> Result<()> {
        instructions::transfer::handler(ctx, computation_offset, asset_id, input, proof)
    }

    #[arcium_callback(encrypted_ix = "transfer_balance")]
    pub fn transfer_balance_callback(
        ctx: Context<TransferBalanceCallback>,
        output: SignedComputationOutputs<TransferBalanceOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(output) => output,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let has_funds: bool = o.field_0.field_0;
        let new_from = &o.field_0.field_1;
        let new_to = &o.field_0.field_2;

        let computation = ctx.accounts.computation_account.key();
        let from = &mut ctx.accounts.from_account;
        let to = &mut ctx.accounts.to_account;
        from.release(computation, OperationKind::Transfer)?;
        to.release(computation, OperationKind::Transfer)?;

        if !has_funds {
            reject(from.owner, OperationKind::Transfer, ErrorCode::InsufficientBalance);
            return Ok(());
        }

        #[cfg(feature = "debug")]
        {
            msg!(
                "DEBUG transfer_balance_callback: from old nonce={}, new nonce={}, new[0..4]={:?}",
                from.balance_nonce,
                new_from.nonce,
                &new_from.ciphertexts[from.pending_asset as usize][0..4]
            );
            msg!(
                "DEBUG transfer_balance_callback: to old nonce={}, new nonce={}, new[0..4]={:?}",
                to.balance_nonce,
                new_to.nonce,
                &new_to.ciphertexts[to.pending_asset as usize][0..4]
            );
        }

        from.set_balances(new_from.ciphertexts, new_from.nonce);
        to.set_balances(new_to.ciphertexts, new_to.nonce);

        emit!(TransferEvent {
            from: from.owner,
            to: to.owner,
            asset: from.pending_asset,
            sender_nonce: new_from.nonce.to_le_bytes(),
            recipient_nonce: new_to.nonce.to_le_bytes(),
        });

        msg!("Transfer callback: {} -> {} balances updated", from.owner, to.owner);
        Ok(())
    }

    // =========================================================================
    // LIQUIDITY
    // =========================================================================

    pub fn init_add_liquidity_comp_def(ctx: Context<InitAddLiquidityCompDef>) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        computation_offset: u64,
        input: EncryptedInput,
        proof: InputProof,
    ) -> Result<()> {
        instructions::add_liquidity::handler(ctx, computation_offset, input, proof)
    }

    /// MPC output: (has_funds, new_balances, new_reserves)
    #[arcium_callback(encrypted_ix = "add_liquidity")]
    pub fn add_liquidity_callback(
        ctx: Context<AddLiquidityCallback>,
        output: SignedComputationOutputs<AddLiquidityOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(output) => output,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let balances = &o.field_0.field_1;
        let reserves = &o.field_0.field_2;
        let computation = ctx.accounts.computation_account.key();
        let provider = ctx.accounts.ledger_account.owner;

        let rejected = settle_engine_output(
            &mut ctx.accounts.pool,
            &mut ctx.accounts.ledger_account,
            computation,
            OperationKind::AddLiquidity,
            o.field_0.field_0,
            true,
            (balances.ciphertexts, balances.nonce),
            (reserves.ciphertexts, reserves.nonce),
        )?;
        if let Some(reason) = rejected {
            reject(provider, OperationKind::AddLiquidity, reason);
            return Ok(());
        }

        let pool = &mut ctx.accounts.pool;
        pool.total_liquidity_adds = pool
            .total_liquidity_adds
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        emit!(LiquidityAddedEvent {
            provider,
            balance_nonce: balances.nonce.to_le_bytes(),
            reserve_nonce: reserves.nonce.to_le_bytes(),
        });

        msg!("Liquidity added by {}", provider);
        Ok(())
    }

    /// View: both current reserve handles.
    pub fn get_reserves(ctx: Context<GetReserves>) -> Result<ReserveHandles> {
        let pool = &ctx.accounts.pool;
        require!(pool.reserves_ready, ErrorCode::ReservesNotInitialized);
        Ok(pool.reserve_handles())
    }

    // =========================================================================
    // SWAPS
    // =========================================================================

    pub fn init_swap_usdc_for_zama_comp_def(
        ctx: Context<InitSwapUsdcForZamaCompDef>,
    ) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn init_swap_zama_for_usdc_comp_def(
        ctx: Context<InitSwapZamaForUsdcCompDef>,
    ) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn swap_usdc_for_zama(
        ctx: Context<SwapUsdcForZama>,
        computation_offset: u64,
        input: EncryptedInput,
        proof: InputProof,
    ) -> Result<()> {
        instructions::swap::swap_usdc_for_zama(ctx, computation_offset, input, proof)
    }

    pub fn swap_zama_for_usdc(
        ctx: Context<SwapZamaForUsdc>,
        computation_offset: u64,
        input: EncryptedInput,
        proof: InputProof,
    ) -> Result<()> {
        instructions::swap::swap_zama_for_usdc(ctx, computation_offset, input, proof)
    }

    /// MPC output: (has_funds, within_reserve, new_balances, new_reserves)
    #[arcium_callback(encrypted_ix = "swap_usdc_for_zama")]
    pub fn swap_usdc_for_zama_callback(
        ctx: Context<SwapUsdcForZamaCallback>,
        output: SignedComputationOutputs<SwapUsdcForZamaOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(output) => output,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let balances = &o.field_0.field_2;
        let reserves = &o.field_0.field_3;
        let computation = ctx.accounts.computation_account.key();
        let user = ctx.accounts.ledger_account.owner;

        let rejected = settle_engine_output(
            &mut ctx.accounts.pool,
            &mut ctx.accounts.ledger_account,
            computation,
            OperationKind::SwapUsdcForZama,
            o.field_0.field_0,
            o.field_0.field_1,
            (balances.ciphertexts, balances.nonce),
            (reserves.ciphertexts, reserves.nonce),
        )?;
        if let Some(reason) = rejected {
            reject(user, OperationKind::SwapUsdcForZama, reason);
            return Ok(());
        }

        let pool = &mut ctx.accounts.pool;
        pool.total_swaps = pool.total_swaps.checked_add(1).ok_or(ErrorCode::MathOverflow)?;

        emit!(SwapEvent {
            user,
            direction: SwapDirection::UsdcForZama,
            balance_nonce: balances.nonce.to_le_bytes(),
            reserve_nonce: reserves.nonce.to_le_bytes(),
        });

        msg!("Swap fUSDC->fZama settled for {}", user);
        Ok(())
    }

    /// MPC output: (has_funds, within_reserve, new_balances, new_reserves)
    #[arcium_callback(encrypted_ix = "swap_zama_for_usdc")]
    pub fn swap_zama_for_usdc_callback(
        ctx: Context<SwapZamaForUsdcCallback>,
        output: SignedComputationOutputs<SwapZamaForUsdcOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(output) => output,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let balances = &o.field_0.field_2;
        let reserves = &o.field_0.field_3;
        let computation = ctx.accounts.computation_account.key();
        let user = ctx.accounts.ledger_account.owner;

        let rejected = settle_engine_output(
            &mut ctx.accounts.pool,
            &mut ctx.accounts.ledger_account,
            computation,
            OperationKind::SwapZamaForUsdc,
            o.field_0.field_0,
            o.field_0.field_1,
            (balances.ciphertexts, balances.nonce),
            (reserves.ciphertexts, reserves.nonce),
        )?;
        if let Some(reason) = rejected {
            reject(user, OperationKind::SwapZamaForUsdc, reason);
            return Ok(());
        }

        let pool = &mut ctx.accounts.pool;
        pool.total_swaps = pool.total_swaps.checked_add(1).ok_or(ErrorCode::MathOverflow)?;

        emit!(SwapEvent {
            user,
            direction: SwapDirection::ZamaForUsdc,
            balance_nonce: balances.nonce.to_le_bytes(),
            reserve_nonce: reserves.nonce.to_le_bytes(),
        });

        msg!("Swap fZama->fUSDC settled for {}", user);
        Ok(())
    }

    /// View: plaintext quote for a swap of `amount_in` on this pool.
    /// Does not check reserve depth; the circuit does that on execution.
    pub fn quote_swap(
        ctx: Context<QuoteSwap>,
        direction: SwapDirection,
        amount_in: u64,
    ) -> Result<SwapQuote> {
        ctx.accounts.pool.quote(direction, amount_in)
    }

    // =========================================================================
    // DISCLOSURE
    // =========================================================================

    /// Grant `viewer` both current reserve handles.
    pub fn allow_reserves(ctx: Context<AllowReserves>, viewer: Pubkey) -> Result<()> {
        instructions::allow_reveal::allow_reserves(ctx, viewer)
    }

    /// Grant `viewer` the current handle of one of the caller's balances.
    pub fn allow_balance_reveal(
        ctx: Context<AllowBalanceReveal>,
        viewer: Pubkey,
        asset_id: u8,
    ) -> Result<()> {
        instructions::allow_reveal::allow_balance_reveal(ctx, viewer, asset_id)
    }

    pub fn init_reveal_reserve_comp_def(ctx: Context<InitRevealReserveCompDef>) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn init_reveal_balance_comp_def(ctx: Context<InitRevealBalanceCompDef>) -> Result<()> {
        init_comp_def(ctx.accounts, None, None)?;
        Ok(())
    }

    pub fn reveal_reserve(
        ctx: Context<RevealReserve>,
        computation_offset: u64,
        asset_id: u8,
        authorization: DisclosureAuthorization,
        viewer_nonce: u128,
    ) -> Result<()> {
        instructions::reveal::reveal_reserve(
            ctx,
            computation_offset,
            asset_id,
            authorization,
            viewer_nonce,
        )
    }

    pub fn reveal_balance(
        ctx: Context<RevealBalance>,
        computation_offset: u64,
        asset_id: u8,
        authorization: DisclosureAuthorization,
        viewer_nonce: u128,
    ) -> Result<()> {
        instructions::reveal::reveal_balance(
            ctx,
            computation_offset,
            asset_id,
            authorization,
            viewer_nonce,
        )
    }

    #[arcium_callback(encrypted_ix = "reveal_reserve")]
    pub fn reveal_reserve_callback(
        ctx: Context<RevealReserveCallback>,
        output: SignedComputationOutputs<RevealReserveOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(RevealReserveOutput { field_0 }) => field_0,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let computation = ctx.accounts.computation_account.key();
        ctx.accounts
            .pool
            .release(computation, OperationKind::RevealReserve)?;

        emit!(DisclosureFulfilledEvent {
            computation,
            ciphertext: o.ciphertexts[0],
            nonce: o.nonce.to_le_bytes(),
        });

        msg!("Reserve disclosure fulfilled: computation {}", computation);
        Ok(())
    }

    #[arcium_callback(encrypted_ix = "reveal_balance")]
    pub fn reveal_balance_callback(
        ctx: Context<RevealBalanceCallback>,
        output: SignedComputationOutputs<RevealBalanceOutput>,
    ) -> Result<()> {
        let o = match output.verify_output(
            &ctx.accounts.cluster_account,
            &ctx.accounts.computation_account,
        ) {
            Ok(RevealBalanceOutput { field_0 }) => field_0,
            Err(_) => return Err(ErrorCode::AbortedComputation.into()),
        };

        let computation = ctx.accounts.computation_account.key();
        ctx.accounts
            .subject_account
            .release(computation, OperationKind::RevealBalance)?;

        emit!(DisclosureFulfilledEvent {
            computation,
            ciphertext: o.ciphertexts[0],
            nonce: o.nonce.to_le_bytes(),
        });

        msg!("Balance disclosure fulfilled: computation {}", computation);
        Ok(())
    }
}

// =============================================================================
// EVENTS
// =============================================================================
// Nonces are emitted as little-endian bytes so clients can decrypt the
// ciphertexts they own.
//

#[event]
pub struct ReservesInitializedEvent {
    pub pool: Pubkey,
    pub reserve_nonce: [u8; 16],
}

#[event]
pub struct AccountOpenedEvent {
    pub owner: Pubkey,
    pub account: Pubkey,
}

#[event]
pub struct OperatorSetEvent {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub expiry: i64,
}

#[event]
pub struct DepositEvent {
    pub user: Pubkey,
    pub asset: u8,
    pub encrypted_balance: [u8; 32],
    pub nonce: [u8; 16],
}

#[event]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub asset: u8,
    pub amount: u64,
    pub encrypted_balance: [u8; 32],
    pub nonce: [u8; 16],
}

#[event]
pub struct TransferEvent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub asset: u8,
    pub sender_nonce: [u8; 16],
    pub recipient_nonce: [u8; 16],
}

#[event]
pub struct LiquidityAddedEvent {
    pub provider: Pubkey,
    pub balance_nonce: [u8; 16],
    pub reserve_nonce: [u8; 16],
}

/// Amounts stay encrypted; only the direction is public.
#[event]
pub struct SwapEvent {
    pub user: Pubkey,
    pub direction: SwapDirection,
    pub balance_nonce: [u8; 16],
    pub reserve_nonce: [u8; 16],
}

/// Emitted by a callback that released its locks without writing any state.
#[event]
pub struct OperationRejectedEvent {
    pub user: Pubkey,
    pub kind: OperationKind,
    pub error_code: u32,
}

#[event]
pub struct RevealAllowedEvent {
    pub subject: Pubkey,
    pub viewer: Pubkey,
    pub asset: u8,
    pub handle: [u8; 32],
    /// 0 for a standing grant
    pub expires_at: i64,
}

#[event]
pub struct DisclosureRequestedEvent {
    pub viewer: Pubkey,
    pub subject: Pubkey,
    pub asset: u8,
    pub computation: Pubkey,
}

/// Value re-encrypted to the viewer's ephemeral key.
/// Matched to its request through `computation`.
#[event]
pub struct DisclosureFulfilledEvent {
    pub computation: Pubkey,
    pub ciphertext: [u8; 32],
    pub nonce: [u8; 16],
}

#[event]
pub struct PoolConfigUpdatedEvent {
    pub paused: bool,
    pub public_reserve_disclosure: bool,
    pub disclosure_ttl_secs: i64,
    pub max_authorization_days: u16,
}

// =============================================================================
// ACCOUNT CONTEXTS
// =============================================================================

use crate::constants::*;
use crate::state::{
    ConfidentialAccount, DisclosureGrant, EncryptionKeyRecord, OperatorGrant, SwapPool,
};
use anchor_spl::token::Mint;

// =============================================================================
// INITIALIZE
// =============================================================================

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Admin authority: pause, disclosure policy, reserve grants.
    /// CHECK: This can be any valid public key - stored as SwapPool.authority
    pub authority: UncheckedAccount<'info>,

    /// PDA seeds: ["pool"]
    #[account(
        init,
        payer = payer,
        space = SwapPool::SIZE,
        seeds = [POOL_SEED],
        bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    pub usdc_mint: Box<Account<'info, Mint>>,
    pub zama_mint: Box<Account<'info, Mint>>,

    /// fUSDC backing vault. PDA seeds: ["vault", "usdc"]
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, VAULT_USDC_SEED],
        bump,
        token::mint = usdc_mint,
        token::authority = pool,
    )]
    pub vault_usdc: Box<Account<'info, TokenAccount>>,

    /// fZama backing vault. PDA seeds: ["vault", "zama"]
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, VAULT_ZAMA_SEED],
        bump,
        token::mint = zama_mint,
        token::authority = pool,
    )]
    pub vault_zama: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct PoolAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub pool: Box<Account<'info, SwapPool>>,
}

// =============================================================================
// INIT POOL RESERVES
// =============================================================================

#[queue_computation_accounts("init_pool_reserves", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct InitPoolReserves<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_INIT_POOL_RESERVES))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("init_pool_reserves")]
#[derive(Accounts)]
pub struct InitPoolReservesCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_INIT_POOL_RESERVES))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub pool: Box<Account<'info, SwapPool>>,
}

#[init_computation_definition_accounts("init_pool_reserves", payer)]
#[derive(Accounts)]
pub struct InitInitPoolReservesCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

// =============================================================================
// LEDGER ACCOUNTS & OPERATORS
// =============================================================================

#[derive(Accounts)]
#[instruction(encryption_pubkey: [u8; 32])]
pub struct OpenAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub owner: Signer<'info>,

    /// PDA seeds: ["enc_key", encryption_pubkey]. One wallet per key.
    #[account(
        init,
        payer = payer,
        space = EncryptionKeyRecord::SIZE,
        seeds = [ENCRYPTION_KEY_SEED, encryption_pubkey.as_ref()],
        bump,
    )]
    pub key_record: Account<'info, EncryptionKeyRecord>,

    /// PDA seeds: ["account", owner]. One per wallet.
    #[account(
        init,
        payer = payer,
        space = ConfidentialAccount::SIZE,
        seeds = [ACCOUNT_SEED, owner.key().as_ref()],
        bump,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetAcceptTransfers<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, owner.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == owner.key() @ ErrorCode::InvalidOwner,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,
}

#[derive(Accounts)]
#[instruction(spender: Pubkey)]
pub struct SetOperator<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub owner: Signer<'info>,

    /// PDA seeds: ["operator", owner, spender]
    #[account(
        init_if_needed,
        payer = payer,
        space = OperatorGrant::SIZE,
        seeds = [OPERATOR_SEED, owner.key().as_ref(), spender.as_ref()],
        bump,
    )]
    pub operator_grant: Account<'info, OperatorGrant>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ConfidentialBalanceOf<'info> {
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,
}

// =============================================================================
// WRAP
// =============================================================================

#[queue_computation_accounts("credit_balance", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct WrapTokens<'info> {
    // =========================================================================
    // PAYER & USER
    // =========================================================================
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The user making the deposit (must sign for token transfer)
    #[account(mut)]
    pub user: Signer<'info>,

    // =========================================================================
    // TOKEN ACCOUNTS
    // =========================================================================
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    /// Ledger account credited in the callback
    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Source of funds; must hold the mint of `asset_id`
    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ ErrorCode::InvalidOwner,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    /// Pool vault for `asset_id`
    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,

    // =========================================================================
    // ARCIUM MPC ACCOUNTS
    // =========================================================================
    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREDIT_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("credit_balance")]
#[derive(Accounts)]
pub struct CreditBalanceCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_CREDIT_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,
}

#[derive(Accounts)]
pub struct ReclaimWrap<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Refund destination; must hold the mint of the pending asset
    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ ErrorCode::InvalidOwner,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    /// Pool vault the deposit went into
    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[init_computation_definition_accounts("credit_balance", payer)]
#[derive(Accounts)]
pub struct InitCreditBalanceCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

// =============================================================================
// UNWRAP
// =============================================================================
// The SPL transfer happens in the callback, so the vault, the recipient and
// the token program travel as callback accounts.

#[queue_computation_accounts("debit_balance", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct UnwrapTokens<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    /// Vault authority, signs the payout in the callback
    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Destination of funds, may belong to anyone
    #[account(mut)]
    pub recipient_token_account: Box<Account<'info, TokenAccount>>,

    /// Pool vault for `asset_id`
    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_DEBIT_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("debit_balance")]
#[derive(Accounts)]
pub struct DebitBalanceCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_DEBIT_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    pub pool: Box<Account<'info, SwapPool>>,

    #[account(mut)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub recipient_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[init_computation_definition_accounts("debit_balance", payer)]
#[derive(Accounts)]
pub struct InitDebitBalanceCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

// =============================================================================
// CONFIDENTIAL TRANSFER
// =============================================================================

#[queue_computation_accounts("transfer_balance", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct ConfidentialTransfer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Owner of `from_account` or one of its operators
    pub spender: Signer<'info>,

    #[account(
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, from_account.owner.as_ref()],
        bump = from_account.bump,
    )]
    pub from_account: Box<Account<'info, ConfidentialAccount>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, to_account.owner.as_ref()],
        bump = to_account.bump,
    )]
    pub to_account: Box<Account<'info, ConfidentialAccount>>,

    /// Required only when `spender` is not the owner
    #[account(
        seeds = [OPERATOR_SEED, from_account.owner.as_ref(), spender.key().as_ref()],
        bump,
    )]
    pub operator_grant: Option<Account<'info, OperatorGrant>>,

    /// Operator's own ledger account, holding the key the input is encrypted
    /// under. Required only when `spender` is not the owner.
    #[account(
        seeds = [ACCOUNT_SEED, spender.key().as_ref()],
        bump = spender_account.bump,
    )]
    pub spender_account: Option<Box<Account<'info, ConfidentialAccount>>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_TRANSFER_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("transfer_balance")]
#[derive(Accounts)]
pub struct TransferBalanceCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_TRANSFER_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub from_account: Box<Account<'info, ConfidentialAccount>>,

    #[account(mut)]
    pub to_account: Box<Account<'info, ConfidentialAccount>>,
}

#[init_computation_definition_accounts("transfer_balance", payer)]
#[derive(Accounts)]
pub struct InitTransferBalanceCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

// =============================================================================
// ADD LIQUIDITY
// =============================================================================

#[queue_computation_accounts("add_liquidity", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct AddLiquidity<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Grant from `user` to the pool PDA
    #[account(
        seeds = [OPERATOR_SEED, user.key().as_ref(), pool.key().as_ref()],
        bump,
    )]
    pub operator_grant: Option<Account<'info, OperatorGrant>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_ADD_LIQUIDITY))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("add_liquidity")]
#[derive(Accounts)]
pub struct AddLiquidityCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_ADD_LIQUIDITY))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    #[account(mut)]
    pub pool: Box<Account<'info, SwapPool>>,
}

#[init_computation_definition_accounts("add_liquidity", payer)]
#[derive(Accounts)]
pub struct InitAddLiquidityCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetReserves<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Box<Account<'info, SwapPool>>,
}

// =============================================================================
// SWAPS
// =============================================================================
// Both directions share one account layout; only the comp def differs.

#[queue_computation_accounts("swap_usdc_for_zama", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct SwapUsdcForZama<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Grant from `user` to the pool PDA
    #[account(
        seeds = [OPERATOR_SEED, user.key().as_ref(), pool.key().as_ref()],
        bump,
    )]
    pub operator_grant: Option<Account<'info, OperatorGrant>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_SWAP_USDC_FOR_ZAMA))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("swap_usdc_for_zama")]
#[derive(Accounts)]
pub struct SwapUsdcForZamaCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_SWAP_USDC_FOR_ZAMA))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    #[account(mut)]
    pub pool: Box<Account<'info, SwapPool>>,
}

#[init_computation_definition_accounts("swap_usdc_for_zama", payer)]
#[derive(Accounts)]
pub struct InitSwapUsdcForZamaCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

#[queue_computation_accounts("swap_zama_for_usdc", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64)]
pub struct SwapZamaForUsdc<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        mut,
        seeds = [ACCOUNT_SEED, user.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == user.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// Grant from `user` to the pool PDA
    #[account(
        seeds = [OPERATOR_SEED, user.key().as_ref(), pool.key().as_ref()],
        bump,
    )]
    pub operator_grant: Option<Account<'info, OperatorGrant>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_SWAP_ZAMA_FOR_USDC))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("swap_zama_for_usdc")]
#[derive(Accounts)]
pub struct SwapZamaForUsdcCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_SWAP_ZAMA_FOR_USDC))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    #[account(mut)]
    pub pool: Box<Account<'info, SwapPool>>,
}

#[init_computation_definition_accounts("swap_zama_for_usdc", payer)]
#[derive(Accounts)]
pub struct InitSwapZamaForUsdcCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct QuoteSwap<'info> {
    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Box<Account<'info, SwapPool>>,
}

// =============================================================================
// DISCLOSURE GRANTS
// =============================================================================

#[derive(Accounts)]
#[instruction(viewer: Pubkey)]
pub struct AllowReserves<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Authority, or anyone when public reserve disclosure is on
    pub caller: Signer<'info>,

    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Box<Account<'info, SwapPool>>,

    /// PDA seeds: ["disclosure", pool, viewer, 0]
    #[account(
        init_if_needed,
        payer = payer,
        space = DisclosureGrant::SIZE,
        seeds = [DISCLOSURE_SEED, pool.key().as_ref(), viewer.as_ref(), &[ASSET_USDC]],
        bump,
    )]
    pub usdc_grant: Box<Account<'info, DisclosureGrant>>,

    /// PDA seeds: ["disclosure", pool, viewer, 1]
    #[account(
        init_if_needed,
        payer = payer,
        space = DisclosureGrant::SIZE,
        seeds = [DISCLOSURE_SEED, pool.key().as_ref(), viewer.as_ref(), &[ASSET_ZAMA]],
        bump,
    )]
    pub zama_grant: Box<Account<'info, DisclosureGrant>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(viewer: Pubkey, asset_id: u8)]
pub struct AllowBalanceReveal<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub owner: Signer<'info>,

    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Box<Account<'info, SwapPool>>,

    #[account(
        seeds = [ACCOUNT_SEED, owner.key().as_ref()],
        bump = ledger_account.bump,
        constraint = ledger_account.owner == owner.key() @ ErrorCode::Unauthorized,
    )]
    pub ledger_account: Box<Account<'info, ConfidentialAccount>>,

    /// PDA seeds: ["disclosure", owner, viewer, asset_id]
    #[account(
        init_if_needed,
        payer = payer,
        space = DisclosureGrant::SIZE,
        seeds = [DISCLOSURE_SEED, owner.key().as_ref(), viewer.as_ref(), &[asset_id]],
        bump,
    )]
    pub grant: Box<Account<'info, DisclosureGrant>>,

    pub system_program: Program<'info, System>,
}

// =============================================================================
// DISCLOSURE REQUESTS
// =============================================================================

#[queue_computation_accounts("reveal_reserve", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64, asset_id: u8)]
pub struct RevealReserve<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub viewer: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, SwapPool>>,

    /// Grant for this viewer on `asset_id`
    #[account(
        seeds = [DISCLOSURE_SEED, pool.key().as_ref(), viewer.key().as_ref(), &[asset_id]],
        bump,
    )]
    pub grant: Option<Account<'info, DisclosureGrant>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_RESERVE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("reveal_reserve")]
#[derive(Accounts)]
pub struct RevealReserveCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_RESERVE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub pool: Box<Account<'info, SwapPool>>,
}

#[init_computation_definition_accounts("reveal_reserve", payer)]
#[derive(Accounts)]
pub struct InitRevealReserveCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}

#[queue_computation_accounts("reveal_balance", payer)]
#[derive(Accounts)]
#[instruction(computation_offset: u64, asset_id: u8)]
pub struct RevealBalance<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub viewer: Signer<'info>,

    #[account(seeds = [POOL_SEED], bump = pool.bump)]
    pub pool: Box<Account<'info, SwapPool>>,

    /// Ledger account whose balance is disclosed
    #[account(
        mut,
        seeds = [ACCOUNT_SEED, subject_account.owner.as_ref()],
        bump = subject_account.bump,
    )]
    pub subject_account: Box<Account<'info, ConfidentialAccount>>,

    /// Grant for this viewer on the subject's `asset_id` balance.
    /// Not needed when the viewer is the subject.
    #[account(
        seeds = [DISCLOSURE_SEED, subject_account.owner.as_ref(), viewer.key().as_ref(), &[asset_id]],
        bump,
    )]
    pub grant: Option<Account<'info, DisclosureGrant>>,

    #[account(
        init_if_needed,
        space = 9,
        payer = payer,
        seeds = [&SIGN_PDA_SEED],
        bump,
        address = derive_sign_pda!(),
    )]
    pub sign_pda_account: Account<'info, ArciumSignerAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Box<Account<'info, MXEAccount>>,

    #[account(
        mut,
        address = derive_mempool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: mempool_account, checked by the arcium program.
    pub mempool_account: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_execpool_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: executing_pool, checked by the arcium program.
    pub executing_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        address = derive_comp_pda!(computation_offset, mxe_account, ErrorCode::ClusterNotSet)
    )]
    /// CHECK: computation_account, checked by the arcium program.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(
        mut,
        address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
    )]
    pub cluster_account: Account<'info, Cluster>,

    #[account(
        mut,
        address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
    )]
    pub pool_account: Account<'info, FeePool>,

    #[account(
        mut,
        address = ARCIUM_CLOCK_ACCOUNT_ADDRESS
    )]
    pub clock_account: Account<'info, ClockAccount>,

    pub system_program: Program<'info, System>,
    pub arcium_program: Program<'info, Arcium>,
}

#[callback_accounts("reveal_balance")]
#[derive(Accounts)]
pub struct RevealBalanceCallback<'info> {
    pub arcium_program: Program<'info, Arcium>,

    #[account(address = derive_comp_def_pda!(COMP_DEF_OFFSET_REVEAL_BALANCE))]
    pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

    #[account(address = derive_mxe_pda!())]
    pub mxe_account: Account<'info, MXEAccount>,

    /// CHECK: computation_account, checked by arcium program via constraints in the callback context.
    pub computation_account: UncheckedAccount<'info>,

    #[account(address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet))]
    pub cluster_account: Account<'info, Cluster>,

    #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
    /// CHECK: instructions_sysvar, checked by the account constraint
    pub instructions_sysvar: AccountInfo<'info>,

    #[account(mut)]
    pub subject_account: Box<Account<'info, ConfidentialAccount>>,
}

#[init_computation_definition_accounts("reveal_balance", payer)]
#[derive(Accounts)]
pub struct InitRevealBalanceCompDef<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    #[account(
        mut,
        address = derive_mxe_pda!()
    )]
    pub mxe_account: Box<Account<'info, MXEAccount>>,
    #[account(mut)]
    /// CHECK: comp_def_account, checked by arcium program.
    /// Can't check it here as it's not initialized yet.
    pub comp_def_account: UncheckedAccount<'info>,
    pub arcium_program: Program<'info, Arcium>,
    pub system_program: Program<'info, System>,
}
