//! Allocation optimization models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::Asset;
use crate::constants::{
    DEFAULT_MAX_ALLOCATION, DEFAULT_MAX_ASSETS, DEFAULT_MIN_ALLOCATION, FULL_ALLOCATION,
};
use crate::errors::{Error, Result};

/// Global bounds applied across all assets in one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizationConstraints {
    /// Per-asset floor in percentage points
    pub min_allocation: Decimal,
    /// Per-asset ceiling in percentage points
    pub max_allocation: Decimal,
    /// Advisory ceiling on the number of holdings. Never enforced by truncation.
    pub max_assets: usize,
    /// Desired annual return (fractional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_return: Option<Decimal>,
    /// Risk budget (fractional volatility)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_risk: Option<Decimal>,
}

impl Default for OptimizationConstraints {
    fn default() -> Self {
        Self {
            min_allocation: DEFAULT_MIN_ALLOCATION,
            max_allocation: DEFAULT_MAX_ALLOCATION,
            max_assets: DEFAULT_MAX_ASSETS,
            target_return: None,
            max_risk: None,
        }
    }
}

impl OptimizationConstraints {
    pub fn new(min_allocation: Decimal, max_allocation: Decimal, max_assets: usize) -> Self {
        Self {
            min_allocation,
            max_allocation,
            max_assets,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bounds("constraints", self.min_allocation, self.max_allocation)
    }

    /// Effective `(min, max)` for an asset: its own bounds when present, the
    /// global bounds otherwise.
    pub fn bounds_for(&self, asset: &Asset) -> Result<(Decimal, Decimal)> {
        let min = asset.min_allocation.unwrap_or(self.min_allocation);
        let max = asset.max_allocation.unwrap_or(self.max_allocation);
        validate_bounds(&asset.symbol, min, max)?;
        Ok((min, max))
    }
}

fn validate_bounds(owner: &str, min: Decimal, max: Decimal) -> Result<()> {
    let in_range = |v: Decimal| v >= Decimal::ZERO && v <= FULL_ALLOCATION;
    if !in_range(min) || !in_range(max) {
        return Err(Error::invalid_input(format!(
            "Allocation bounds for {} must lie within [0, 100], got [{}, {}]",
            owner, min, max
        )));
    }
    if min > max {
        return Err(Error::invalid_input(format!(
            "Minimum allocation for {} ({}) exceeds maximum ({})",
            owner, min, max
        )));
    }
    Ok(())
}

/// Output of one optimization pass. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Assets with clamped and renormalized allocations
    pub assets: Vec<Asset>,
    pub expected_return: Decimal,
    pub expected_risk: Decimal,
    pub sharpe_ratio: Decimal,
    pub is_optimal: bool,
    pub suggestions: Vec<String>,
}
