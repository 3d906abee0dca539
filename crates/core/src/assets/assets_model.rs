//! Asset domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One holding within a portfolio.
///
/// `allocation` is in percentage points (0-100). `expected_return` and
/// `volatility` are fractional annualized figures (0.08 = 8%) supplied by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    pub allocation: Decimal,
    pub expected_return: Decimal,
    pub volatility: Decimal,
    /// Per-asset floor. Overrides the global constraint floor when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_allocation: Option<Decimal>,
    /// Per-asset ceiling. Overrides the global constraint ceiling when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_allocation: Option<Decimal>,
}

impl Asset {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        allocation: Decimal,
        expected_return: Decimal,
        volatility: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            allocation,
            expected_return,
            volatility,
            min_allocation: None,
            max_allocation: None,
        }
    }

    /// Sets per-asset allocation bounds.
    pub fn with_bounds(mut self, min_allocation: Decimal, max_allocation: Decimal) -> Self {
        self.min_allocation = Some(min_allocation);
        self.max_allocation = Some(max_allocation);
        self
    }

    /// Allocation as a fraction of the portfolio (0-1).
    pub fn weight(&self) -> Decimal {
        self.allocation / Decimal::ONE_HUNDRED
    }
}

/// Sum of allocation percentages across a list of assets.
pub fn allocation_total(assets: &[Asset]) -> Decimal {
    assets.iter().map(|a| a.allocation).sum()
}
