use anchor_lang::prelude::*;

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR, ZAMA_PRICE_IN_USDC};
use crate::errors::ErrorCode;

// =============================================================================
// FIXED-RATE PRICING
// =============================================================================
// Plaintext form of the swap and liquidity arithmetic run by the circuits in
// encrypted-ixs. Used for the `quote_swap` view and for clients to predict
// outcomes. Both sides must floor at the same points:
//
//   after_fee = floor(amount_in * 997 / 1000)
//   fUSDC -> fZama: out = floor(after_fee / 2)
//   fZama -> fUSDC: out = after_fee * 2
//
// The gross input (fee included) goes to the input reserve, so the fee stays
// in the pool.
//

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    UsdcForZama,
    ZamaForUsdc,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub after_fee: u64,
    pub amount_out: u64,
}

/// Input retained after the 0.3% fee, floored.
pub fn apply_fee(amount_in: u64) -> u64 {
    // 997/1000 of a u64 always fits back into u64
    ((amount_in as u128 * FEE_NUMERATOR as u128) / FEE_DENOMINATOR as u128) as u64
}

pub fn quote(direction: SwapDirection, amount_in: u64) -> Result<SwapQuote> {
    let after_fee = apply_fee(amount_in);
    let amount_out = match direction {
        SwapDirection::UsdcForZama => after_fee / ZAMA_PRICE_IN_USDC,
        SwapDirection::ZamaForUsdc => after_fee
            .checked_mul(ZAMA_PRICE_IN_USDC)
            .ok_or(ErrorCode::MathOverflow)?,
    };
    Ok(SwapQuote {
        amount_in,
        after_fee,
        amount_out,
    })
}

/// Flags the swap circuits reveal to the callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapCheck {
    pub has_funds: bool,
    /// Forced to `true` when `has_funds` is false, so an unfunded swap says
    /// nothing about the reserve.
    pub within_reserve: bool,
}

/// Predict the flags a swap will reveal for a caller holding `balance_in` of
/// the input asset against `reserve_out` of the output asset.
pub fn check_swap(
    direction: SwapDirection,
    amount_in: u64,
    balance_in: u64,
    reserve_out: u64,
) -> SwapCheck {
    let after_fee = apply_fee(amount_in) as u128;
    let out = match direction {
        SwapDirection::UsdcForZama => after_fee / ZAMA_PRICE_IN_USDC as u128,
        SwapDirection::ZamaForUsdc => after_fee * ZAMA_PRICE_IN_USDC as u128,
    };
    let has_funds = balance_in >= amount_in;
    SwapCheck {
        has_funds,
        within_reserve: !has_funds || out <= reserve_out as u128,
    }
}

/// Plaintext view of the pool reserves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlainReserves {
    pub usdc: u64,
    pub zama: u64,
}

impl PlainReserves {
    /// Deposit both assets; no fee, no ratio constraint.
    pub fn add_liquidity(&mut self, usdc: u64, zama: u64) -> Result<()> {
        self.usdc = self.usdc.checked_add(usdc).ok_or(ErrorCode::MathOverflow)?;
        self.zama = self.zama.checked_add(zama).ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Apply a swap of `amount_in` and return its quote.
    /// Leaves the reserves untouched on any error.
    pub fn apply_swap(&mut self, direction: SwapDirection, amount_in: u64) -> Result<SwapQuote> {
        let q = quote(direction, amount_in)?;
        let (reserve_in, reserve_out) = match direction {
            SwapDirection::UsdcForZama => (self.usdc, self.zama),
            SwapDirection::ZamaForUsdc => (self.zama, self.usdc),
        };
        require!(q.amount_out <= reserve_out, ErrorCode::ReserveUnderflow);
        let new_in = reserve_in
            .checked_add(amount_in)
            .ok_or(ErrorCode::MathOverflow)?;
        let new_out = reserve_out - q.amount_out;

        match direction {
            SwapDirection::UsdcForZama => {
                self.usdc = new_in;
                self.zama = new_out;
            }
            SwapDirection::ZamaForUsdc => {
                self.zama = new_in;
                self.usdc = new_out;
            }
        }
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PlainReserves {
        let mut r = PlainReserves::default();
        r.add_liquidity(2_000, 1_000).unwrap();
        r
    }

    #[test]
    fn usdc_for_zama_reference_trade() {
        let mut r = seeded();
        let q = r.apply_swap(SwapDirection::UsdcForZama, 100).unwrap();
        assert_eq!(q.after_fee, 99);
        assert_eq!(q.amount_out, 49);
        assert_eq!(r, PlainReserves { usdc: 2_100, zama: 951 });
    }

    #[test]
    fn zama_for_usdc_reference_trade() {
        let mut r = seeded();
        let q = r.apply_swap(SwapDirection::ZamaForUsdc, 50).unwrap();
        assert_eq!(q.after_fee, 49);
        assert_eq!(q.amount_out, 98);
        assert_eq!(r, PlainReserves { usdc: 1_902, zama: 1_050 });
    }

    #[test]
    fn sequential_trades_compose() {
        let mut r = seeded();
        r.apply_swap(SwapDirection::UsdcForZama, 100).unwrap();
        let q = r.apply_swap(SwapDirection::ZamaForUsdc, 50).unwrap();
        assert_eq!(q.amount_out, 98);
        assert_eq!(r, PlainReserves { usdc: 2_002, zama: 1_001 });
    }

    #[test]
    fn floors_small_amounts() {
        assert_eq!(apply_fee(1), 0);
        assert_eq!(apply_fee(1_000), 997);
        assert_eq!(quote(SwapDirection::UsdcForZama, 3).unwrap().amount_out, 0);
        assert_eq!(quote(SwapDirection::UsdcForZama, 0).unwrap().amount_out, 0);
        assert_eq!(apply_fee(u64::MAX), ((u64::MAX as u128 * 997) / 1000) as u64);
    }

    #[test]
    fn reserve_underflow_rejected_without_mutation() {
        let mut r = PlainReserves { usdc: 10, zama: 10 };
        let before = r;
        let err = r.apply_swap(SwapDirection::ZamaForUsdc, 10).unwrap_err();
        assert_eq!(err, ErrorCode::ReserveUnderflow.into());
        assert_eq!(r, before);
    }

    #[test]
    fn zero_liquidity_is_a_no_op() {
        let mut r = seeded();
        r.add_liquidity(0, 0).unwrap();
        assert_eq!(r, seeded());
    }

    #[test]
    fn liquidity_is_monotonic() {
        let mut r = seeded();
        for (u, z) in [(1, 0), (0, 5), (300, 7)] {
            let before = r;
            r.add_liquidity(u, z).unwrap();
            assert!(r.usdc >= before.usdc && r.zama >= before.zama);
        }
    }

    #[test]
    fn conservation_holds_across_swaps() {
        // Caller starts with 500 fUSDC and 500 fZama; the pool is seeded.
        let mut r = seeded();
        let mut caller = (500u64, 500u64);
        let total = |r: &PlainReserves, c: (u64, u64)| (r.usdc + c.0, r.zama + c.1);
        let start = total(&r, caller);

        let q = r.apply_swap(SwapDirection::UsdcForZama, 100).unwrap();
        caller = (caller.0 - 100, caller.1 + q.amount_out);
        assert_eq!(total(&r, caller).0, start.0);

        let q = r.apply_swap(SwapDirection::ZamaForUsdc, 30).unwrap();
        caller = (caller.0 + q.amount_out, caller.1 - 30);

        // Every unit leaving the caller lands in a reserve and vice versa.
        let end = total(&r, caller);
        assert_eq!(end.0, start.0);
        assert_eq!(end.1, start.1);
    }

    #[test]
    fn unfunded_swap_does_not_reveal_the_reserve() {
        // Same oversized amount against an empty and a deep reserve: an
        // unfunded caller sees identical flags either way.
        for direction in [SwapDirection::UsdcForZama, SwapDirection::ZamaForUsdc] {
            let against_empty = check_swap(direction, 1_000, 0, 0);
            let against_deep = check_swap(direction, 1_000, 0, u64::MAX);
            assert_eq!(against_empty, against_deep);
            assert_eq!(
                against_empty,
                SwapCheck {
                    has_funds: false,
                    within_reserve: true,
                }
            );
        }

        // A funded caller does learn it.
        assert!(!check_swap(SwapDirection::ZamaForUsdc, 1_000, 1_000, 0).within_reserve);
        assert!(check_swap(SwapDirection::ZamaForUsdc, 1_000, 1_000, 1_994).within_reserve);
        assert!(!check_swap(SwapDirection::ZamaForUsdc, 1_000, 1_000, 1_993).within_reserve);
    }

    #[test]
    fn pool_keeps_exactly_the_fee_skim() {
        // Next to the real pool, run a fee-free pool that receives only the
        // input worth the output at the fixed rate. The real pool's excess
        // must equal the skim summed per input asset.
        let mut r = PlainReserves::default();
        r.add_liquidity(1_000_000, 1_000_000).unwrap();
        let mut fair = r;
        let (mut skim_usdc, mut skim_zama) = (0u64, 0u64);

        let trades = [
            (SwapDirection::UsdcForZama, 1_000),
            (SwapDirection::ZamaForUsdc, 333),
            (SwapDirection::UsdcForZama, 7),
            (SwapDirection::ZamaForUsdc, 1),
            (SwapDirection::UsdcForZama, 12_345),
            (SwapDirection::ZamaForUsdc, 10_000),
        ];
        for (direction, amount_in) in trades {
            let q = r.apply_swap(direction, amount_in).unwrap();
            let fee = amount_in - q.after_fee;
            match direction {
                SwapDirection::UsdcForZama => {
                    let worth = q.amount_out * ZAMA_PRICE_IN_USDC;
                    let skim = amount_in - worth;
                    // Fee plus at most the odd unit lost to the halving floor.
                    assert!(skim >= fee && skim <= fee + 1);
                    skim_usdc += skim;
                    fair.usdc += worth;
                    fair.zama -= q.amount_out;
                }
                SwapDirection::ZamaForUsdc => {
                    let worth = q.amount_out / ZAMA_PRICE_IN_USDC;
                    assert_eq!(amount_in - worth, fee);
                    skim_zama += amount_in - worth;
                    fair.zama += worth;
                    fair.usdc -= q.amount_out;
                }
            }
        }

        assert_eq!(r.usdc - fair.usdc, skim_usdc);
        assert_eq!(r.zama - fair.zama, skim_zama);
        assert!(skim_usdc > 0 && skim_zama > 0);
    }
}
