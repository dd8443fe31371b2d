//! Signed percentage change between two periods.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Percentage reported when a metric grows from a zero baseline.
pub const ZERO_BASELINE_GROWTH: i64 = 100;

/// Percentage change from `previous` to `current`, rounded to the nearest integer.
///
/// Changes beyond the `i64` or `Decimal` range saturate at `i64::MIN`/`i64::MAX`.
/// A non-positive `previous` is a zero baseline: any positive `current`
/// reports [`ZERO_BASELINE_GROWTH`], otherwise `0`.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> i64 {
    if previous > Decimal::ZERO {
        let saturated = if current < previous { i64::MIN } else { i64::MAX };
        let change = current
            .checked_sub(previous)
            .and_then(|delta| delta.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        return match change {
            Some(change) => change
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(saturated),
            None => saturated,
        };
    }
    if current > Decimal::ZERO {
        ZERO_BASELINE_GROWTH
    } else {
        0
    }
}

/// [`percent_change`] for counts.
#[must_use]
pub fn count_change(current: usize, previous: usize) -> i64 {
    percent_change(Decimal::from(current), Decimal::from(previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn growth_and_decline_have_correct_sign() {
        assert_eq!(count_change(150, 100), 50);
        assert_eq!(count_change(50, 100), -50);
    }

    #[test]
    fn zero_baseline_policy() {
        assert_eq!(count_change(10, 0), 100);
        assert_eq!(count_change(0, 0), 0);
    }

    #[test]
    fn drop_to_zero_is_minus_hundred() {
        assert_eq!(count_change(0, 7), -100);
    }

    #[test]
    fn rounds_to_nearest_integer() {
        // 1/3 growth -> 33.33%
        assert_eq!(count_change(4, 3), 33);
        // 2/3 growth -> 66.67%
        assert_eq!(count_change(5, 3), 67);
        assert_eq!(percent_change(dec!(12.5), dec!(10)), 25);
    }

    #[test]
    fn extreme_ratios_saturate() {
        assert_eq!(percent_change(dec!(1e27), dec!(0.01)), i64::MAX);
        assert_eq!(percent_change(Decimal::MIN, dec!(0.0001)), i64::MIN);
        assert_eq!(percent_change(Decimal::MAX, Decimal::MAX), 0);
    }

    #[test]
    fn decimal_inputs() {
        assert_eq!(percent_change(dec!(99.90), dec!(111)), -10);
    }
}
