use rust_decimal::Decimal;

use crate::errors::{Error, Result};

/// Turns the `None` of a checked `Decimal` operation into `InvalidInput`.
///
/// `Decimal` holds 28 significant digits, so extreme rates or amounts can
/// overflow or collapse to zero long before they become meaningless.
pub fn in_range(value: Option<Decimal>, what: &str) -> Result<Decimal> {
    value.ok_or_else(|| {
        Error::invalid_input(format!(
            "{} is outside the representable numeric range",
            what
        ))
    })
}
