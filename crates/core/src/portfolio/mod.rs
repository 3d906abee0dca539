//! Portfolio analytics: allocation normalization, metrics, rebalancing,
//! intrinsic valuation and scenario simulation.

pub mod allocation;
pub mod performance;
pub mod rebalancing;
pub mod scenarios;
pub mod valuation;

pub use allocation::*;
pub use performance::*;
pub use rebalancing::*;
pub use scenarios::*;
pub use valuation::*;
