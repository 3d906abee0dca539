//! Assets module - holding model and scenario category classification.

mod asset_category;
mod assets_model;

pub use asset_category::{classify_symbol, AssetCategory};
pub use assets_model::{allocation_total, Asset};
