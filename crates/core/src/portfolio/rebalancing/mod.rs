//! Drift detection between a current and a target allocation.

mod rebalancing_advisor;
mod rebalancing_model;

pub use rebalancing_advisor::*;
pub use rebalancing_model::*;
