//! Market data collaborators: the provider seam the valuation service reads
//! through, and the fundamentals cache that sits in front of it.

mod cached_provider;
mod fundamentals_cache;
mod market_data_model;
mod market_data_traits;

pub use cached_provider::CachedFundamentalsProvider;
pub use fundamentals_cache::{InMemoryFundamentalsCache, DEFAULT_FUNDAMENTALS_TTL_SECS};
pub use market_data_model::{CachedFundamentals, Quote};
pub use market_data_traits::{FundamentalsCache, FundamentalsProvider};
