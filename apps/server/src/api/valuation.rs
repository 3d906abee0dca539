use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use quantfolio_core::portfolio::valuation::{
    valuate, Fundamentals, ValuationAssumptions, ValuationModel, ValuationReport,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValuationBody {
    symbol: String,
    current_price: Option<Decimal>,
    fundamentals: Option<Fundamentals>,
    model: Option<String>,
    #[serde(default)]
    assumptions: ValuationAssumptions,
}

/// Fundamentals in the body are cached for later requests and used directly.
/// Without them, the cached copy for the symbol is used if still valid.
async fn valuate_symbol(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValuationBody>,
) -> ApiResult<Json<ValuationReport>> {
    let symbol = body.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("symbol is required".to_string()));
    }
    let model = match body.model.as_deref() {
        Some(name) => name.parse::<ValuationModel>()?,
        None => ValuationModel::default(),
    };

    if let Some(fundamentals) = &body.fundamentals {
        state.fundamentals_cache.set(&symbol, fundamentals.clone());
    }

    let report = match (body.fundamentals, body.current_price) {
        (Some(fundamentals), Some(price)) => {
            valuate(&symbol, price, &fundamentals, model, &body.assumptions)?
        }
        (None, Some(price)) => {
            state
                .valuation_service
                .valuate_at_price(&symbol, price, model, &body.assumptions)
                .await?
        }
        (_, None) => {
            state
                .valuation_service
                .valuate_symbol(&symbol, model, &body.assumptions)
                .await?
        }
    };

    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/valuation", post(valuate_symbol))
}
