use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk/return summary of an allocation.
///
/// All three figures are fractional (0.08 = 8%), except the Sharpe ratio which
/// is a plain ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub expected_return: Decimal,
    pub expected_risk: Decimal,
    pub sharpe_ratio: Decimal,
}
