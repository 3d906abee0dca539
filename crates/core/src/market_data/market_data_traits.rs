use async_trait::async_trait;

use super::market_data_model::{CachedFundamentals, Quote};
use crate::errors::Result;
use crate::portfolio::valuation::Fundamentals;

/// Source of prices and company fundamentals. Implementations live outside
/// the engine (HTTP clients, fixtures, request payloads).
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals>;
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;
}

/// Per-symbol fundamentals store with freshness tracking.
pub trait FundamentalsCache: Send + Sync {
    /// Returns the entry only while it is still valid.
    fn get(&self, symbol: &str) -> Option<CachedFundamentals>;
    fn set(&self, symbol: &str, fundamentals: Fundamentals);
    fn is_valid(&self, symbol: &str) -> bool;
    fn invalidate(&self, symbol: &str);
}
