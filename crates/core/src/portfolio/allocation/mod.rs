//! Allocation normalization against global and per-asset constraints.

mod allocation_model;
mod allocation_normalizer;

pub use allocation_model::*;
pub use allocation_normalizer::*;
