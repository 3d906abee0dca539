use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a decimal with exactly `dp` fractional digits, rounding half away
/// from zero (12.25 -> "12.3", 10 -> "10.0").
pub fn format_decimal(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Formats a fractional rate as a percentage with `dp` fractional digits
/// (0.0707 -> "7.1" for `dp = 1`).
pub fn format_percent(rate: Decimal, dp: u32) -> String {
    format_decimal(rate * Decimal::ONE_HUNDRED, dp)
}
