//! Common utility functions for tax calculations.
//!
//! Rate arithmetic and rounding shared by the bracket model, the progressive
//! calculator, and report rendering.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8687.495)), dec!(8687.50));
/// assert_eq!(round_half_up(dec!(835.154)), dec!(835.15));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage rate (`15` means 15%) to an amount. The result is exact.
pub fn apply_rate(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Like [`apply_rate`], but returns `None` instead of panicking when the
/// product does not fit in a `Decimal`.
pub fn checked_apply_rate(
    amount: Decimal,
    rate: Decimal,
) -> Option<Decimal> {
    amount.checked_mul(rate)?.checked_div(Decimal::ONE_HUNDRED)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is zero.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_leaves_whole_amounts_unchanged() {
        assert_eq!(round_half_up(dec!(1670)), dec!(1670.00));
    }

    #[test]
    fn round_half_up_carries_into_whole_units() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // apply_rate tests
    // =========================================================================

    #[test]
    fn apply_rate_treats_rate_as_percentage() {
        assert_eq!(apply_rate(dec!(8350), dec!(10)), dec!(835));
    }

    #[test]
    fn apply_rate_is_exact_for_cents() {
        assert_eq!(apply_rate(dec!(1), dec!(15)), dec!(0.15));
        assert_eq!(apply_rate(dec!(16050), dec!(25)), dec!(4012.50));
    }

    #[test]
    fn apply_rate_of_zero_is_zero() {
        assert_eq!(apply_rate(dec!(50000), dec!(0)), dec!(0));
    }

    #[test]
    fn checked_apply_rate_matches_apply_rate_in_range() {
        assert_eq!(checked_apply_rate(dec!(16050), dec!(25)), Some(dec!(4012.50)));
    }

    #[test]
    fn checked_apply_rate_reports_overflow() {
        assert_eq!(checked_apply_rate(Decimal::MAX, dec!(35)), None);
    }

    // =========================================================================
    // percentage_of tests
    // =========================================================================

    #[test]
    fn percentage_of_divides_and_scales() {
        assert_eq!(percentage_of(dec!(8687.50), dec!(50000)), dec!(17.375));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(10), dec!(0)), dec!(0));
    }
}
