//! Tip helpers for presentation layers
//!
//! The engine accepts any tip percentage. Screens that take free-form input
//! clamp it here before calling the engine.

use rust_decimal::Decimal;

/// Quick-pick tip percentages offered next to the custom input
pub const TIP_PRESETS: [Decimal; 2] = [Decimal::ZERO, Decimal::TEN];

/// Upper bound for user-entered tips
pub const MAX_TIP_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Clamp a user-entered tip percentage into `[0, 100]`
pub fn clamp_tip_percentage(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_TIP_PERCENTAGE)
}

/// Whether a tip matches one of the presets (otherwise it is "custom")
pub fn is_preset(value: Decimal) -> bool {
    TIP_PRESETS.contains(&value)
}
