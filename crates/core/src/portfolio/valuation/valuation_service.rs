use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use super::valuation_calculator::valuate;
use super::valuation_model::{ValuationAssumptions, ValuationModel, ValuationReport};
use super::valuation_traits::ValuationServiceTrait;
use crate::errors::Result;
use crate::market_data::FundamentalsProvider;

#[derive(Clone)]
pub struct ValuationService {
    provider: Arc<dyn FundamentalsProvider>,
}

impl ValuationService {
    pub fn new(provider: Arc<dyn FundamentalsProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn valuate_symbol(
        &self,
        symbol: &str,
        model: ValuationModel,
        assumptions: &ValuationAssumptions,
    ) -> Result<ValuationReport> {
        let quote = self.provider.get_quote(symbol).await?;
        debug!(
            "Quote for {}: {} {} at {}",
            symbol, quote.price, quote.currency, quote.timestamp
        );
        self.valuate_at_price(symbol, quote.price, model, assumptions)
            .await
    }

    async fn valuate_at_price(
        &self,
        symbol: &str,
        current_price: Decimal,
        model: ValuationModel,
        assumptions: &ValuationAssumptions,
    ) -> Result<ValuationReport> {
        let fundamentals = self.provider.get_fundamentals(symbol).await?;
        let report = valuate(symbol, current_price, &fundamentals, model, assumptions)?;

        info!(
            "Valuated {} with {}: {} ({} model(s), {} skipped)",
            symbol,
            model.display_name(),
            report.overall.recommendation,
            report.results.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
