//! Small decimal helpers shared by the engine stages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints going away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use isr_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(9270.984976)), dec!(9270.98));
/// assert_eq!(round_half_up(dec!(729.015)), dec!(729.02));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Applies a rate expressed in percent (10.88 means 10.88 %).
///
/// ```
/// use rust_decimal_macros::dec;
/// use isr_core::calculations::common::apply_percent;
///
/// assert_eq!(apply_percent(dec!(2831.48), dec!(10.88)), dec!(308.065024));
/// ```
pub fn apply_percent(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount * (rate_percent / Decimal::ONE_HUNDRED)
}
