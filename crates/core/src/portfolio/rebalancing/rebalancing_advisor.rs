use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::assets::Asset;
use crate::constants::REBALANCE_THRESHOLD;

use super::{RebalanceAction, RebalanceDirection, UnmatchedSymbols};

/// Human-readable rebalancing suggestions, e.g. `"reduce AAPL by 10.0%"`.
///
/// Only symbols present in both lists are compared; see [`unmatched_symbols`]
/// for the rest. Output follows the order of `current`.
pub fn suggest_rebalancing(current: &[Asset], target: &[Asset]) -> Vec<String> {
    rebalancing_actions(current, target)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Structured form of [`suggest_rebalancing`]. An action is emitted when the
/// drift strictly exceeds the rebalance threshold (5 percentage points).
///
/// When `target` lists a symbol more than once, its first entry is the target.
pub fn rebalancing_actions(current: &[Asset], target: &[Asset]) -> Vec<RebalanceAction> {
    let mut targets: HashMap<&str, Decimal> = HashMap::with_capacity(target.len());
    for asset in target {
        targets.entry(asset.symbol.as_str()).or_insert(asset.allocation);
    }

    current
        .iter()
        .filter_map(|asset| {
            let target_allocation = targets.get(asset.symbol.as_str())?;
            let drift = asset.allocation.saturating_sub(*target_allocation);
            if drift.abs() <= REBALANCE_THRESHOLD {
                return None;
            }
            let direction = if drift > Decimal::ZERO {
                RebalanceDirection::Reduce
            } else {
                RebalanceDirection::Increase
            };
            Some(RebalanceAction {
                symbol: asset.symbol.clone(),
                direction,
                difference: drift.abs(),
            })
        })
        .collect()
}

/// Symbols that [`suggest_rebalancing`] silently skips because they are held
/// on only one side.
pub fn unmatched_symbols(current: &[Asset], target: &[Asset]) -> UnmatchedSymbols {
    let current_symbols: HashSet<&str> = current.iter().map(|a| a.symbol.as_str()).collect();
    let target_symbols: HashSet<&str> = target.iter().map(|a| a.symbol.as_str()).collect();

    UnmatchedSymbols {
        only_in_current: current
            .iter()
            .filter(|a| !target_symbols.contains(a.symbol.as_str()))
            .map(|a| a.symbol.clone())
            .collect(),
        only_in_target: target
            .iter()
            .filter(|a| !current_symbols.contains(a.symbol.as_str()))
            .map(|a| a.symbol.clone())
            .collect(),
    }
}
