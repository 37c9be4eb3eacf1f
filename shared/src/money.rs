//! Money helpers built on rust_decimal
//!
//! All split arithmetic happens on `Decimal`. Values cross the wire as JSON
//! floats and are converted here, at the boundary. Display is always two
//! decimal places, half away from zero.

use rust_decimal::prelude::*;

/// Decimal places used for display
pub const DECIMAL_PLACES: u32 = 2;

/// Convert a wire float into a `Decimal`
///
/// Returns `None` for NaN and infinities so callers can reject the value
/// instead of silently treating it as zero.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Convert a `Decimal` back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round a monetary value to 2 decimal places (half away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `value * percentage / 100`, saturating at the `Decimal` range
///
/// The exact product is used whenever it fits; otherwise the rate is applied
/// first and the result saturates at `Decimal::MAX` / `Decimal::MIN`.
pub fn percentage_of(value: Decimal, percentage: Decimal) -> Decimal {
    match value.checked_mul(percentage) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => value.saturating_mul(percentage / Decimal::ONE_HUNDRED),
    }
}

/// Sum of monetary values, saturating at the `Decimal` range
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Render a monetary value with exactly two decimals, e.g. `27.50`
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Render a percentage rounded to a whole number, e.g. `10`
pub fn format_percentage(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
