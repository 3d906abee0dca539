use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use crate::assets::Asset;
use crate::errors::{Error, Result};
use crate::utils::in_range;

use super::PortfolioMetrics;

/// Computes expected return, expected risk and Sharpe ratio of an allocation.
///
/// Risk treats the holdings as uncorrelated: `sqrt(Σ (w_i × σ_i)²)`. There are
/// no covariance terms, so the figure understates risk whenever holdings move
/// together.
///
/// Fails with `InvalidInput` on negative volatility, on figures too large for
/// `Decimal`, or when the resulting risk is zero (the Sharpe ratio would be
/// undefined).
pub fn compute_metrics(assets: &[Asset]) -> Result<PortfolioMetrics> {
    let mut expected_return = Decimal::ZERO;
    let mut variance = Decimal::ZERO;

    for asset in assets {
        if asset.volatility < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Volatility of {} is negative ({})",
                asset.symbol, asset.volatility
            )));
        }
        let weight = asset.weight();
        let weighted_return = in_range(
            weight.checked_mul(asset.expected_return),
            "Weighted expected return",
        )?;
        expected_return = in_range(expected_return.checked_add(weighted_return), "Expected return")?;
        let weighted_vol = in_range(weight.checked_mul(asset.volatility), "Weighted volatility")?;
        let contribution = in_range(weighted_vol.checked_mul(weighted_vol), "Variance")?;
        variance = in_range(variance.checked_add(contribution), "Variance")?;
    }

    let expected_risk = variance
        .sqrt()
        .ok_or_else(|| Error::invalid_input("Portfolio variance is negative"))?;

    if expected_risk.is_zero() {
        return Err(Error::invalid_input(
            "Expected risk is zero; Sharpe ratio is undefined",
        ));
    }

    let sharpe_ratio = in_range(expected_return.checked_div(expected_risk), "Sharpe ratio")?;
    debug!(
        "Metrics for {} assets: return={}, risk={}, sharpe={}",
        assets.len(),
        expected_return,
        expected_risk,
        sharpe_ratio
    );

    Ok(PortfolioMetrics {
        expected_return,
        expected_risk,
        sharpe_ratio,
    })
}
