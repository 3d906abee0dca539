use std::sync::Arc;

use async_trait::async_trait;
use quantfolio_core::{
    errors::{Error as CoreError, Result as CoreResult},
    market_data::{
        CachedFundamentalsProvider, FundamentalsCache, FundamentalsProvider,
        InMemoryFundamentalsCache, Quote,
    },
    portfolio::valuation::{Fundamentals, ValuationService, ValuationServiceTrait},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub fundamentals_cache: Arc<dyn FundamentalsCache>,
    pub valuation_service: Arc<dyn ValuationServiceTrait + Send + Sync>,
}

/// Upstream behind the fundamentals cache. The server has no market-data
/// feed, so anything not already cached from a request is reported as
/// missing input.
struct RequestOnlyProvider;

#[async_trait]
impl FundamentalsProvider for RequestOnlyProvider {
    async fn get_fundamentals(&self, symbol: &str) -> CoreResult<Fundamentals> {
        Err(CoreError::invalid_input(format!(
            "No valid fundamentals cached for '{}'; include them in the request",
            symbol
        )))
    }

    async fn get_quote(&self, symbol: &str) -> CoreResult<Quote> {
        Err(CoreError::invalid_input(format!(
            "No quote source configured for '{}'; include currentPrice in the request",
            symbol
        )))
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("QF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let fundamentals_cache: Arc<dyn FundamentalsCache> =
        Arc::new(InMemoryFundamentalsCache::new(config.fundamentals_ttl));
    let provider = Arc::new(CachedFundamentalsProvider::new(
        Arc::new(RequestOnlyProvider),
        fundamentals_cache.clone(),
    ));
    let valuation_service = Arc::new(ValuationService::new(provider));

    tracing::info!(
        "Fundamentals cache TTL: {}s",
        config.fundamentals_ttl.num_seconds()
    );

    Arc::new(AppState {
        fundamentals_cache,
        valuation_service,
    })
}
