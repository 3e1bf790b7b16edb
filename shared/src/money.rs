//! Money helpers
//!
//! All monetary arithmetic is done in `Decimal` and rounded to two
//! decimal places, half-up. Amounts never pass through `f64`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to storage precision.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount * percent / 100`, rounded to storage precision.
#[inline]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round_money(amount * percent / Decimal::ONE_HUNDRED)
}

/// Clamp an amount at zero (amounts in this ledger never go negative).
#[inline]
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn percent_of_margin() {
        // 20% organizer margin on a 90.00 line
        assert_eq!(percent_of(dec!(90.00), dec!(20)), dec!(18.00));
        // Tricky percentage stays exact at 2dp
        assert_eq!(percent_of(dec!(100.00), dec!(33.33)), dec!(33.33));
    }

    #[test]
    fn accumulation_stays_exact() {
        // Sum 0.01 one thousand times; f64 would drift here
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += dec!(0.01);
        }
        assert_eq!(total, dec!(10.00));
    }

    #[test]
    fn clamps_below_zero() {
        assert_eq!(clamp_non_negative(dec!(-3.50)), Decimal::ZERO);
        assert_eq!(clamp_non_negative(dec!(3.50)), dec!(3.50));
    }
}
