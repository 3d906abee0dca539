use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::format_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceDirection {
    Reduce,
    Increase,
}

impl RebalanceDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebalanceDirection::Reduce => "reduce",
            RebalanceDirection::Increase => "increase",
        }
    }
}

/// One suggested allocation change. `difference` is the absolute drift in
/// percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceAction {
    pub symbol: String,
    pub direction: RebalanceDirection,
    pub difference: Decimal,
}

impl fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} by {}%",
            self.direction.as_str(),
            self.symbol,
            format_decimal(self.difference, 1)
        )
    }
}

/// Symbols that appear on only one side of a rebalancing comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedSymbols {
    /// Held now but missing from the target
    pub only_in_current: Vec<String>,
    /// Targeted but not currently held
    pub only_in_target: Vec<String>,
}

impl UnmatchedSymbols {
    pub fn is_empty(&self) -> bool {
        self.only_in_current.is_empty() && self.only_in_target.is_empty()
    }
}
