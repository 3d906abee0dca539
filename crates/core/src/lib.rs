//! Quantfolio Core - portfolio optimization, valuation and scenario engine.
//!
//! Every engine operation is a pure, synchronous function over plain
//! structured inputs. The only async surface is the collaborator layer in
//! [`market_data`] and the [`ValuationService`] built on it.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod market_data;
pub mod portfolio;
pub mod utils;

// Re-export common types from asset and portfolio modules
pub use assets::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
