//! Scenario stress tests: fixed category shocks applied to a portfolio over a
//! six-month horizon.

mod impact_matrix;
mod scenario_model;
mod scenario_simulator;

pub use impact_matrix::{scenario_impact, scenario_recommendation};
pub use scenario_model::*;
pub use scenario_simulator::{compare_scenarios, run_scenario};
