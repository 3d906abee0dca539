use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;

use super::{ValuationAssumptions, ValuationModel, ValuationReport};

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values a symbol at its latest quoted price using fundamentals from the
    /// configured provider.
    async fn valuate_symbol(
        &self,
        symbol: &str,
        model: ValuationModel,
        assumptions: &ValuationAssumptions,
    ) -> Result<ValuationReport>;

    /// Same as [`valuate_symbol`](Self::valuate_symbol) but at a caller-supplied
    /// price; only fundamentals are resolved through the provider.
    async fn valuate_at_price(
        &self,
        symbol: &str,
        current_price: Decimal,
        model: ValuationModel,
        assumptions: &ValuationAssumptions,
    ) -> Result<ValuationReport>;
}
