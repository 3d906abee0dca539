mod metrics_calculator;
pub mod performance_model;

pub use metrics_calculator::compute_metrics;
pub use performance_model::*;
