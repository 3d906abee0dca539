//! Intrinsic-value models (DCF, dividend discount, Graham, ratios) and the
//! service that feeds them from a fundamentals provider.

mod fundamentals;
mod valuation_calculator;
mod valuation_model;
mod valuation_service;
mod valuation_traits;

pub use fundamentals::*;
pub use valuation_calculator::*;
pub use valuation_model::*;
pub use valuation_service::ValuationService;
pub use valuation_traits::ValuationServiceTrait;
