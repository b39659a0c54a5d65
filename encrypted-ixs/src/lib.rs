// =============================================================================
// ARCIS CIRCUITS FOR THE CONFIDENTIAL fUSDC / fZAMA SWAP
// =============================================================================
// Key Pattern:
// - Account balances are Enc<Shared, AccountBalances> under the owner's key,
//   so the owner can decrypt them from the client at any time.
// - Pool reserves are Enc<Mxe, PoolReserves>; only MPC can read them.
// - .to_arcis() decrypts, owner.from_arcis() re-encrypts.
//
// MPC Pattern: both if/else branches execute when the condition is secret.
// Debits compute a validity flag, select the unchanged state when it is
// false, and reveal ONLY the flag so the callback can reject the write.
//
// Plaintext `ready` flags mark accounts that have never been credited: their
// stored ciphertexts are placeholders and read as zero.
//
// Pricing constants mirror programs/confidential_swap/src/constants.rs.

use arcis::*;

#[encrypted]
mod circuits {
    use arcis::*;

    pub const ASSET_USDC: u8 = 0;

    pub const FEE_NUMERATOR: u64 = 997;
    pub const FEE_DENOMINATOR: u64 = 1000;
    pub const ZAMA_PRICE_IN_USDC: u64 = 2;

    // =========================================================================
    // DATA STRUCTURES
    // =========================================================================

    /// Both balances of one ledger account, encrypted together.
    #[derive(Copy, Clone, Default)]
    pub struct AccountBalances {
        pub usdc: u64,
        pub zama: u64,
    }

    /// Protocol-owned reserves.
    #[derive(Copy, Clone, Default)]
    pub struct PoolReserves {
        pub usdc: u64,
        pub zama: u64,
    }

    /// Single encrypted amount submitted by a user (swap, transfer).
    #[derive(Copy, Clone)]
    pub struct AmountInput {
        pub amount: u64,
    }

    /// Both deposit amounts of an add_liquidity call.
    #[derive(Copy, Clone)]
    pub struct LiquidityInput {
        pub usdc: u64,
        pub zama: u64,
    }

    fn scale_by_rational_fee(amount: u64, numerator: u64, denominator: u64) -> u64 {
        ((amount as u128 * numerator as u128) / denominator as u128) as u64
    }

    fn read_balances(balances_ctxt: &Enc<Shared, AccountBalances>, ready: bool) -> AccountBalances {
        if ready {
            balances_ctxt.to_arcis()
        } else {
            AccountBalances { usdc: 0, zama: 0 }
        }
    }

    fn slot(balances: AccountBalances, asset: u8) -> u64 {
        if asset == ASSET_USDC {
            balances.usdc
        } else {
            balances.zama
        }
    }

    fn with_slot(balances: AccountBalances, asset: u8, value: u64) -> AccountBalances {
        let mut out = balances;
        if asset == ASSET_USDC {
            out.usdc = value;
        } else {
            out.zama = value;
        }
        out
    }

    // =========================================================================
    // POOL SETUP
    // =========================================================================

    /// Encrypted zero reserves under the MXE key.
    #[instruction]
    pub fn init_pool_reserves(mxe: Mxe) -> Enc<Mxe, PoolReserves> {
        mxe.from_arcis(PoolReserves { usdc: 0, zama: 0 })
    }

    // =========================================================================
    // LEDGER CIRCUITS
    // =========================================================================

    /// Credit a plaintext amount (SPL deposit) to one balance slot.
    #[instruction]
    pub fn credit_balance(
        balances_ctxt: Enc<Shared, AccountBalances>,
        ready: bool,
        asset: u8,
        amount: u64,
    ) -> Enc<Shared, AccountBalances> {
        let balances = read_balances(&balances_ctxt, ready);
        let credited = with_slot(balances, asset, slot(balances, asset) + amount);
        balances_ctxt.owner.from_arcis(credited)
    }

    /// Debit a plaintext amount (SPL withdrawal) from one balance slot.
    /// Returns (has_funds, new_balances); balances are unchanged when false.
    #[instruction]
    pub fn debit_balance(
        balances_ctxt: Enc<Shared, AccountBalances>,
        ready: bool,
        asset: u8,
        amount: u64,
    ) -> (bool, Enc<Shared, AccountBalances>) {
        let balances = read_balances(&balances_ctxt, ready);
        let current = slot(balances, asset);
        let has_funds = current >= amount;

        let new_balances = if has_funds {
            with_slot(balances, asset, current - amount)
        } else {
            balances
        };

        (has_funds.reveal(), balances_ctxt.owner.from_arcis(new_balances))
    }

    /// Move an encrypted amount of one asset between two ledger accounts.
    /// Each side stays encrypted under its own owner's key.
    #[instruction]
    pub fn transfer_balance(
        input_ctxt: Enc<Shared, AmountInput>,
        asset: u8,
        from_ctxt: Enc<Shared, AccountBalances>,
        from_ready: bool,
        to_ctxt: Enc<Shared, AccountBalances>,
        to_ready: bool,
    ) -> (
        bool,
        Enc<Shared, AccountBalances>,
        Enc<Shared, AccountBalances>,
    ) {
        let input = input_ctxt.to_arcis();
        let from = read_balances(&from_ctxt, from_ready);
        let to = read_balances(&to_ctxt, to_ready);

        let from_balance = slot(from, asset);
        let has_funds = from_balance >= input.amount;

        let new_from = if has_funds {
            with_slot(from, asset, from_balance - input.amount)
        } else {
            from
        };
        let new_to = if has_funds {
            with_slot(to, asset, slot(to, asset) + input.amount)
        } else {
            to
        };

        (
            has_funds.reveal(),
            from_ctxt.owner.from_arcis(new_from),
            to_ctxt.owner.from_arcis(new_to),
        )
    }

    // =========================================================================
    // SWAP / LIQUIDITY CIRCUITS
    // =========================================================================

    /// Move both deposit amounts from the provider's balances into the reserves.
    /// No fee; zero amounts leave everything as it was.
    #[instruction]
    pub fn add_liquidity(
        input_ctxt: Enc<Shared, LiquidityInput>,
        balances_ctxt: Enc<Shared, AccountBalances>,
        ready: bool,
        reserves_ctxt: Enc<Mxe, PoolReserves>,
    ) -> (bool, Enc<Shared, AccountBalances>, Enc<Mxe, PoolReserves>) {
        let input = input_ctxt.to_arcis();
        let balances = read_balances(&balances_ctxt, ready);
        let reserves = reserves_ctxt.to_arcis();

        let has_funds = balances.usdc >= input.usdc && balances.zama >= input.zama;

        let new_balances = if has_funds {
            AccountBalances {
                usdc: balances.usdc - input.usdc,
                zama: balances.zama - input.zama,
            }
        } else {
            balances
        };
        let new_reserves = if has_funds {
            PoolReserves {
                usdc: reserves.usdc + input.usdc,
                zama: reserves.zama + input.zama,
            }
        } else {
            reserves
        };

        (
            has_funds.reveal(),
            balances_ctxt.owner.from_arcis(new_balances),
            reserves_ctxt.owner.from_arcis(new_reserves),
        )
    }

    /// fUSDC in, fZama out: out = floor(floor(in * 997 / 1000) / 2).
    /// Returns (has_funds, within_reserve, new_balances, new_reserves).
    /// within_reserve is forced to true when has_funds is false.
    #[instruction]
    pub fn swap_usdc_for_zama(
        input_ctxt: Enc<Shared, AmountInput>,
        balances_ctxt: Enc<Shared, AccountBalances>,
        ready: bool,
        reserves_ctxt: Enc<Mxe, PoolReserves>,
    ) -> (
        bool,
        bool,
        Enc<Shared, AccountBalances>,
        Enc<Mxe, PoolReserves>,
    ) {
        let input = input_ctxt.to_arcis();
        let balances = read_balances(&balances_ctxt, ready);
        let reserves = reserves_ctxt.to_arcis();

        let after_fee = scale_by_rational_fee(input.amount, FEE_NUMERATOR, FEE_DENOMINATOR);
        let zama_out = after_fee / ZAMA_PRICE_IN_USDC;

        let has_funds = balances.usdc >= input.amount;
        let within_reserve = zama_out <= reserves.zama;
        let valid = has_funds && within_reserve;

        let new_balances = if valid {
            AccountBalances {
                usdc: balances.usdc - input.amount,
                zama: balances.zama + zama_out,
            }
        } else {
            balances
        };
        let new_reserves = if valid {
            PoolReserves {
                usdc: reserves.usdc + input.amount,
                zama: reserves.zama - zama_out,
            }
        } else {
            reserves
        };

        // Only a funded swap may learn whether the reserve covered it
        let reserve_flag = if has_funds { within_reserve } else { true };

        (
            has_funds.reveal(),
            reserve_flag.reveal(),
            balances_ctxt.owner.from_arcis(new_balances),
            reserves_ctxt.owner.from_arcis(new_reserves),
        )
    }

    /// fZama in, fUSDC out: out = floor(in * 997 / 1000) * 2.
    /// Returns (has_funds, within_reserve, new_balances, new_reserves).
    /// within_reserve is forced to true when has_funds is false.
    #[instruction]
    pub fn swap_zama_for_usdc(
        input_ctxt: Enc<Shared, AmountInput>,
        balances_ctxt: Enc<Shared, AccountBalances>,
        ready: bool,
        reserves_ctxt: Enc<Mxe, PoolReserves>,
    ) -> (
        bool,
        bool,
        Enc<Shared, AccountBalances>,
        Enc<Mxe, PoolReserves>,
    ) {
        let input = input_ctxt.to_arcis();
        let balances = read_balances(&balances_ctxt, ready);
        let reserves = reserves_ctxt.to_arcis();

        let after_fee = scale_by_rational_fee(input.amount, FEE_NUMERATOR, FEE_DENOMINATOR);
        // u128 so the doubling cannot wrap before the reserve comparison
        let usdc_out_wide = after_fee as u128 * ZAMA_PRICE_IN_USDC as u128;

        let has_funds = balances.zama >= input.amount;
        let within_reserve = usdc_out_wide <= reserves.usdc as u128;
        let valid = has_funds && within_reserve;
        let usdc_out = usdc_out_wide as u64;

        let new_balances = if valid {
            AccountBalances {
                usdc: balances.usdc + usdc_out,
                zama: balances.zama - input.amount,
            }
        } else {
            balances
        };
        let new_reserves = if valid {
            PoolReserves {
                usdc: reserves.usdc - usdc_out,
                zama: reserves.zama + input.amount,
            }
        } else {
            reserves
        };

        // Only a funded swap may learn whether the reserve covered it
        let reserve_flag = if has_funds { within_reserve } else { true };

        (
            has_funds.reveal(),
            reserve_flag.reveal(),
            balances_ctxt.owner.from_arcis(new_balances),
            reserves_ctxt.owner.from_arcis(new_reserves),
        )
    }

    // =========================================================================
    // DISCLOSURE CIRCUITS
    // =========================================================================

    /// Re-encrypt one reserve to a viewer's ephemeral key.
    #[instruction]
    pub fn reveal_reserve(
        reserves_ctxt: Enc<Mxe, PoolReserves>,
        asset: u8,
        viewer: Shared,
    ) -> Enc<Shared, u64> {
        let reserves = reserves_ctxt.to_arcis();
        let value = if asset == ASSET_USDC {
            reserves.usdc
        } else {
            reserves.zama
        };
        viewer.from_arcis(value)
    }

    /// Re-encrypt one balance slot to a viewer's ephemeral key.
    #[instruction]
    pub fn reveal_balance(
        balances_ctxt: Enc<Shared, AccountBalances>,
        asset: u8,
        viewer: Shared,
    ) -> Enc<Shared, u64> {
        let balances = balances_ctxt.to_arcis();
        viewer.from_arcis(slot(balances, asset))
    }
}
