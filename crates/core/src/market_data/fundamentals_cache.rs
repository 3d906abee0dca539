//! In-memory fundamentals cache with a fixed time-to-live.
//!
//! Expired entries are dropped when a lookup finds them and on every write, so
//! right after a write the map only holds entries younger than the TTL.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use log::debug;

use super::market_data_model::CachedFundamentals;
use super::market_data_traits::FundamentalsCache;
use crate::portfolio::valuation::Fundamentals;

/// Default time-to-live for cached fundamentals, in seconds.
pub const DEFAULT_FUNDAMENTALS_TTL_SECS: i64 = 900;

pub struct InMemoryFundamentalsCache {
    entries: DashMap<String, CachedFundamentals>,
    ttl: Duration,
}

impl InMemoryFundamentalsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| now - entry.fetched_at < self.ttl);
    }

    fn key(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    fn is_fresh(&self, entry: &CachedFundamentals) -> bool {
        Utc::now() - entry.fetched_at < self.ttl
    }
}

impl Default for InMemoryFundamentalsCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_FUNDAMENTALS_TTL_SECS))
    }
}

impl FundamentalsCache for InMemoryFundamentalsCache {
    fn get(&self, symbol: &str) -> Option<CachedFundamentals> {
        let key = Self::key(symbol);
        let cached = self.entries.get(&key).map(|entry| entry.value().clone())?;
        if self.is_fresh(&cached) {
            return Some(cached);
        }

        // A concurrent set may have refreshed the entry since the read.
        self.entries.remove_if(&key, |_, entry| !self.is_fresh(entry));
        debug!("Evicted expired fundamentals for {}", key);
        None
    }

    fn set(&self, symbol: &str, fundamentals: Fundamentals) {
        self.purge_expired();
        let key = Self::key(symbol);
        self.entries.insert(
            key.clone(),
            CachedFundamentals {
                symbol: key,
                fundamentals,
                fetched_at: Utc::now(),
            },
        );
    }

    fn is_valid(&self, symbol: &str) -> bool {
        self.entries
            .get(&Self::key(symbol))
            .is_some_and(|entry| self.is_fresh(entry.value()))
    }

    fn invalidate(&self, symbol: &str) {
        self.entries.remove(&Self::key(symbol));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Fundamentals {
        Fundamentals {
            eps: Some(dec!(4.5)),
            book_value_per_share: Some(dec!(22)),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_then_get_is_case_insensitive() {
        let cache = InMemoryFundamentalsCache::default();
        cache.set("aapl", sample());

        let cached = cache.get(" AAPL ").unwrap();
        assert_eq!(cached.symbol, "AAPL");
        assert_eq!(cached.fundamentals, sample());
        assert!(cache.is_valid("Aapl"));
    }

    #[test]
    fn test_zero_ttl_entries_are_never_valid() {
        let cache = InMemoryFundamentalsCache::new(Duration::zero());
        cache.set("MSFT", sample());

        assert!(!cache.is_valid("MSFT"));
        assert_eq!(cache.len(), 1);

        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_is_evicted_on_lookup() {
        let cache = InMemoryFundamentalsCache::new(Duration::zero());
        cache.set("MSFT", sample());
        assert_eq!(cache.len(), 1);

        assert!(cache.get("MSFT").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_drops_expired_entries_for_other_symbols() {
        let cache = InMemoryFundamentalsCache::new(Duration::zero());
        for symbol in ["AAA", "BBB", "CCC"] {
            cache.set(symbol, sample());
        }
        // Each write purges the previous, already expired, entry
        assert_eq!(cache.len(), 1);
        assert!(cache.entries.contains_key("CCC"));
    }

    #[test]
    fn test_fresh_entries_survive_writes() {
        let cache = InMemoryFundamentalsCache::default();
        for symbol in ["AAA", "BBB", "CCC"] {
            cache.set(symbol, sample());
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("AAA").is_some());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let cache = InMemoryFundamentalsCache::default();
        cache.set("VTI", sample());
        cache.invalidate("vti");
        assert!(!cache.is_valid("VTI"));
        assert!(cache.get("VTI").is_none());
    }

    #[test]
    fn test_set_overwrites_previous_entry() {
        let cache = InMemoryFundamentalsCache::default();
        cache.set("KO", sample());
        let updated = Fundamentals {
            dividend_per_share: Some(dec!(1.94)),
            ..Default::default()
        };
        cache.set("KO", updated.clone());
        assert_eq!(cache.get("KO").unwrap().fundamentals, updated);
        assert_eq!(cache.len(), 1);
    }
}
