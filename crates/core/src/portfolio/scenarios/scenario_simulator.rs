use log::{debug, warn};
use rust_decimal::prelude::*;

use super::impact_matrix::{scenario_impact, scenario_recommendation};
use super::scenario_model::*;
use crate::assets::classify_symbol;
use crate::constants::{DECIMAL_PRECISION, FULL_ALLOCATION, SCENARIO_HORIZON_MONTHS};
use crate::errors::{Error, Result};
use crate::utils::in_range;

/// Applies a scenario's category shocks to every holding in the snapshot.
///
/// Each holding starts at `total_value × allocation / 100`; the portfolio's
/// initial value is the sum of those, so allocations that do not add up to
/// 100 are valued as given (with a warning).
pub fn run_scenario(portfolio: &PortfolioSnapshot, scenario: ScenarioType) -> Result<ScenarioResult> {
    validate_snapshot(portfolio)?;

    let mut before_allocation = Vec::with_capacity(portfolio.assets.len());
    let mut after_allocation = Vec::with_capacity(portfolio.assets.len());
    let mut asset_performance = Vec::with_capacity(portfolio.assets.len());

    for position in &portfolio.assets {
        let category = classify_symbol(&position.symbol);
        let impact = scenario_impact(scenario, category);
        let initial = in_range(
            portfolio
                .total_value
                .checked_mul(position.allocation)
                .and_then(|value| value.checked_div(FULL_ALLOCATION)),
            "Holding value",
        )?;
        let shocked = in_range(
            initial.checked_mul(Decimal::ONE + impact),
            "Shocked holding value",
        )?;
        let name = if position.name.is_empty() {
            position.symbol.clone()
        } else {
            position.name.clone()
        };

        before_allocation.push(AssetValue {
            symbol: position.symbol.clone(),
            name: name.clone(),
            category,
            value: initial,
        });
        after_allocation.push(AssetValue {
            symbol: position.symbol.clone(),
            name: name.clone(),
            category,
            value: shocked,
        });
        asset_performance.push(AssetPerformance {
            symbol: position.symbol.clone(),
            name,
            category,
            change: impact,
        });
    }

    let initial_value = sum_values(&before_allocation, "Initial portfolio value")?;
    let final_value = sum_values(&after_allocation, "Final portfolio value")?;

    if initial_value.is_zero() {
        return Err(Error::invalid_input(
            "Portfolio has no value to simulate: total value or allocations are zero",
        ));
    }
    if initial_value != portfolio.total_value {
        warn!(
            "Scenario {}: allocations cover {} of total value {}",
            scenario, initial_value, portfolio.total_value
        );
    }

    let value_change = in_range(final_value.checked_sub(initial_value), "Value change")?;
    let percent_change = in_range(value_change.checked_div(initial_value), "Percent change")?;

    // Stable, so equal shocks keep input order.
    asset_performance.sort_by(|a, b| b.change.cmp(&a.change));

    let portfolio_trajectory = build_trajectory(initial_value, percent_change)?;

    debug!(
        "Scenario {}: {} -> {} ({})",
        scenario, initial_value, final_value, percent_change
    );

    Ok(ScenarioResult {
        scenario_type: scenario,
        initial_value: initial_value.round_dp(DECIMAL_PRECISION),
        final_value: final_value.round_dp(DECIMAL_PRECISION),
        value_change: value_change.round_dp(DECIMAL_PRECISION),
        percent_change: percent_change.round_dp(DECIMAL_PRECISION),
        before_allocation: round_values(before_allocation),
        after_allocation: round_values(after_allocation),
        portfolio_trajectory,
        asset_performance,
        recommendation: scenario_recommendation(scenario).to_string(),
    })
}

/// Runs every scenario against the same snapshot, worst outcome first.
pub fn compare_scenarios(portfolio: &PortfolioSnapshot) -> Result<Vec<ScenarioResult>> {
    let mut results = ScenarioType::ALL
        .into_iter()
        .map(|scenario| run_scenario(portfolio, scenario))
        .collect::<Result<Vec<_>>>()?;
    results.sort_by(|a, b| a.percent_change.cmp(&b.percent_change));
    Ok(results)
}

fn validate_snapshot(portfolio: &PortfolioSnapshot) -> Result<()> {
    if portfolio.total_value < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Total value cannot be negative, got {}",
            portfolio.total_value
        )));
    }
    if let Some(position) = portfolio
        .assets
        .iter()
        .find(|p| p.allocation < Decimal::ZERO)
    {
        return Err(Error::invalid_input(format!(
            "Allocation for {} cannot be negative, got {}",
            position.symbol, position.allocation
        )));
    }
    Ok(())
}

/// Spreads the horizon's total change evenly as a compounded monthly rate:
/// `(1 + total)^(1/6) - 1`.
fn build_trajectory(initial_value: Decimal, percent_change: Decimal) -> Result<Vec<TrajectoryPoint>> {
    let months = Decimal::from(SCENARIO_HORIZON_MONTHS);
    let growth = Decimal::ONE + percent_change;

    let monthly_factor = if growth.is_zero() {
        Decimal::ZERO
    } else {
        growth
            .checked_powd(Decimal::ONE / months)
            .ok_or_else(|| Error::invalid_input("Monthly scenario rate could not be computed"))?
    };

    let mut points = Vec::with_capacity(SCENARIO_HORIZON_MONTHS as usize + 1);
    let mut value = initial_value;
    points.push(TrajectoryPoint {
        label: "Start".to_string(),
        value: value.round_dp(DECIMAL_PRECISION),
    });
    for month in 1..=SCENARIO_HORIZON_MONTHS {
        value = in_range(value.checked_mul(monthly_factor), "Trajectory value")?;
        points.push(TrajectoryPoint {
            label: format!("Month {}", month),
            value: value.round_dp(DECIMAL_PRECISION),
        });
    }
    Ok(points)
}

fn sum_values(values: &[AssetValue], what: &str) -> Result<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |total, a| {
        in_range(total.checked_add(a.value), what)
    })
}

fn round_values(values: Vec<AssetValue>) -> Vec<AssetValue> {
    values
        .into_iter()
        .map(|mut a| {
            a.value = a.value.round_dp(DECIMAL_PRECISION);
            a
        })
        .collect()
}
