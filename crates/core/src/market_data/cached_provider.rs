use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::market_data_model::Quote;
use super::market_data_traits::{FundamentalsCache, FundamentalsProvider};
use crate::errors::Result;
use crate::portfolio::valuation::Fundamentals;

/// Serves fundamentals from the cache while they are valid and refreshes them
/// from the wrapped provider otherwise. Quotes always go to the provider.
pub struct CachedFundamentalsProvider {
    inner: Arc<dyn FundamentalsProvider>,
    cache: Arc<dyn FundamentalsCache>,
}

impl CachedFundamentalsProvider {
    pub fn new(inner: Arc<dyn FundamentalsProvider>, cache: Arc<dyn FundamentalsCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl FundamentalsProvider for CachedFundamentalsProvider {
    async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        if let Some(cached) = self.cache.get(symbol) {
            debug!("Fundamentals cache hit for {}", symbol);
            return Ok(cached.fundamentals);
        }

        let fundamentals = self.inner.get_fundamentals(symbol).await?;
        self.cache.set(symbol, fundamentals.clone());
        Ok(fundamentals)
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        self.inner.get_quote(symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::market_data::InMemoryFundamentalsCache;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        fundamentals_calls: AtomicUsize,
    }

    #[async_trait]
    impl FundamentalsProvider for CountingProvider {
        async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
            self.fundamentals_calls.fetch_add(1, Ordering::SeqCst);
            if symbol == "MISSING" {
                return Err(Error::Provider(format!("no data for {}", symbol)));
            }
            Ok(Fundamentals {
                eps: Some(dec!(6.1)),
                ..Default::default()
            })
        }

        async fn get_quote(&self, symbol: &str) -> Result<Quote> {
            Ok(Quote {
                symbol: symbol.to_string(),
                price: dec!(101.5),
                currency: "USD".to_string(),
                timestamp: Utc::now(),
            })
        }
    }

    fn setup(ttl: Duration) -> (Arc<CountingProvider>, CachedFundamentalsProvider) {
        let inner = Arc::new(CountingProvider {
            fundamentals_calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(InMemoryFundamentalsCache::new(ttl));
        let provider = CachedFundamentalsProvider::new(inner.clone(), cache);
        (inner, provider)
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let (inner, provider) = setup(Duration::minutes(5));

        let first = provider.get_fundamentals("AAPL").await.unwrap();
        let second = provider.get_fundamentals("aapl").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.fundamentals_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let (inner, provider) = setup(Duration::zero());

        provider.get_fundamentals("AAPL").await.unwrap();
        provider.get_fundamentals("AAPL").await.unwrap();

        assert_eq!(inner.fundamentals_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_errors_are_not_cached() {
        let (inner, provider) = setup(Duration::minutes(5));

        assert!(provider.get_fundamentals("MISSING").await.is_err());
        assert!(provider.get_fundamentals("MISSING").await.is_err());
        assert_eq!(inner.fundamentals_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_quotes_pass_through() {
        let (_, provider) = setup(Duration::minutes(5));
        let quote = provider.get_quote("MSFT").await.unwrap();
        assert_eq!(quote.symbol, "MSFT");
        assert_eq!(quote.price, dec!(101.5));
    }
}
