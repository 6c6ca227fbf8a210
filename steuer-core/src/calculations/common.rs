//! Shared helpers for the tax calculations.

use rust_decimal::Decimal;

/// Clamps a value at zero.
///
/// The tax functions never return negative amounts; deductions that exceed
/// the income floor the result instead.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use steuer_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(12.5)), dec!(12.5));
/// assert_eq!(floor_at_zero(dec!(-3)), dec!(0));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
