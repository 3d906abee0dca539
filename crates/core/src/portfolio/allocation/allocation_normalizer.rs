//! Clamps allocations to their bounds, rescales them to 100% and scores the
//! result.

use log::debug;
use rust_decimal::Decimal;

use crate::assets::{allocation_total, Asset};
use crate::constants::{
    CONSOLIDATION_ASSET_COUNT, DISPLAY_DECIMAL_PRECISION, FULL_ALLOCATION, HIGH_RISK_THRESHOLD,
    LOW_SHARPE_THRESHOLD, OPTIMAL_RISK_THRESHOLD, OPTIMAL_SHARPE_THRESHOLD,
};
use crate::errors::{Error, Result};
use crate::portfolio::performance::{compute_metrics, PortfolioMetrics};
use crate::utils::{format_decimal, format_percent};

use super::{OptimizationConstraints, OptimizationResult};

/// Normalizes an allocation and computes its metrics and advisory suggestions.
///
/// 1. Each allocation is clamped to its effective bounds (per-asset bounds when
///    set, otherwise the global constraint bounds).
/// 2. Allocations are rescaled proportionally so they sum to 100. Rescaling may
///    push individual values back outside the clamp range.
/// 3. Metrics are computed on the normalized allocation.
///
/// The input slice is left untouched; the adjusted assets are returned in the
/// result.
pub fn optimize_portfolio(
    assets: &[Asset],
    constraints: &OptimizationConstraints,
) -> Result<OptimizationResult> {
    constraints.validate()?;
    if assets.is_empty() {
        return Err(Error::invalid_input("Cannot optimize an empty portfolio"));
    }

    let mut adjusted = clamp_allocations(assets, constraints)?;
    normalize_allocations(&mut adjusted)?;

    let metrics = compute_metrics(&adjusted)?;
    let suggestions = build_suggestions(&metrics, adjusted.len(), constraints);
    let is_optimal = metrics.sharpe_ratio > OPTIMAL_SHARPE_THRESHOLD
        && metrics.expected_risk < OPTIMAL_RISK_THRESHOLD;

    debug!(
        "Optimized {} assets: optimal={}, {} suggestion(s)",
        adjusted.len(),
        is_optimal,
        suggestions.len()
    );

    Ok(OptimizationResult {
        assets: adjusted,
        expected_return: metrics.expected_return,
        expected_risk: metrics.expected_risk,
        sharpe_ratio: metrics.sharpe_ratio,
        is_optimal,
        suggestions,
    })
}

/// Returns a copy of `assets` with every allocation clamped to its effective
/// bounds.
pub fn clamp_allocations(
    assets: &[Asset],
    constraints: &OptimizationConstraints,
) -> Result<Vec<Asset>> {
    assets
        .iter()
        .map(|asset| {
            let (min, max) = constraints.bounds_for(asset)?;
            let mut clamped = asset.clone();
            clamped.allocation = asset.allocation.clamp(min, max);
            Ok(clamped)
        })
        .collect()
}

/// Rescales allocations in place so they sum to 100.
///
/// Fails with `InvalidInput` when the total is zero or negative, which would
/// otherwise divide by zero.
pub fn normalize_allocations(assets: &mut [Asset]) -> Result<()> {
    let total = allocation_total(assets);
    if total <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Total allocation must be positive to normalize, got {}",
            total
        )));
    }
    if total == FULL_ALLOCATION {
        return Ok(());
    }

    let factor = FULL_ALLOCATION / total;
    for asset in assets.iter_mut() {
        asset.allocation *= factor;
    }
    Ok(())
}

fn build_suggestions(
    metrics: &PortfolioMetrics,
    asset_count: usize,
    constraints: &OptimizationConstraints,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.expected_risk > HIGH_RISK_THRESHOLD {
        suggestions.push(format!(
            "Portfolio risk of {}% is high. Consider shifting allocation toward lower-volatility assets.",
            format_percent(metrics.expected_risk, 1)
        ));
    }
    if metrics.sharpe_ratio < LOW_SHARPE_THRESHOLD {
        suggestions.push(format!(
            "Sharpe ratio of {} is below 1.0. Consider adding assets with higher expected returns.",
            format_decimal(metrics.sharpe_ratio, DISPLAY_DECIMAL_PRECISION)
        ));
    }
    if asset_count > CONSOLIDATION_ASSET_COUNT {
        suggestions.push(format!(
            "Portfolio holds {} assets. Consider consolidating into {} or fewer positions.",
            asset_count, CONSOLIDATION_ASSET_COUNT
        ));
    }
    if let Some(target) = constraints.target_return {
        if metrics.expected_return < target {
            suggestions.push(format!(
                "Expected return of {}% falls short of the {}% target.",
                format_percent(metrics.expected_return, 1),
                format_percent(target, 1)
            ));
        }
    }
    if let Some(max_risk) = constraints.max_risk {
        if metrics.expected_risk > max_risk {
            suggestions.push(format!(
                "Expected risk of {}% exceeds the {}% risk limit.",
                format_percent(metrics.expected_risk, 1),
                format_percent(max_risk, 1)
            ));
        }
    }
    if asset_count > constraints.max_assets {
        suggestions.push(format!(
            "Portfolio holds {} assets, above the limit of {}.",
            asset_count, constraints.max_assets
        ));
    }

    suggestions
}
