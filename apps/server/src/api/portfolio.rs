use std::sync::Arc;

use axum::{routing::post, Json, Router};
use quantfolio_core::{
    assets::Asset,
    portfolio::{
        allocation::{optimize_portfolio, OptimizationConstraints, OptimizationResult},
        performance::{compute_metrics, PortfolioMetrics},
        rebalancing::{
            rebalancing_actions, unmatched_symbols, RebalanceAction, UnmatchedSymbols,
        },
    },
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeBody {
    assets: Vec<Asset>,
    #[serde(default)]
    constraints: OptimizationConstraints,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsBody {
    assets: Vec<Asset>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RebalanceBody {
    current: Vec<Asset>,
    target: Vec<Asset>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RebalanceResponse {
    suggestions: Vec<String>,
    actions: Vec<RebalanceAction>,
    unmatched: UnmatchedSymbols,
}

async fn optimize(Json(body): Json<OptimizeBody>) -> ApiResult<Json<OptimizationResult>> {
    let result = optimize_portfolio(&body.assets, &body.constraints)?;
    Ok(Json(result))
}

async fn metrics(Json(body): Json<MetricsBody>) -> ApiResult<Json<PortfolioMetrics>> {
    let metrics = compute_metrics(&body.assets)?;
    Ok(Json(metrics))
}

async fn rebalance(Json(body): Json<RebalanceBody>) -> ApiResult<Json<RebalanceResponse>> {
    let actions = rebalancing_actions(&body.current, &body.target);
    let unmatched = unmatched_symbols(&body.current, &body.target);
    if !unmatched.is_empty() {
        tracing::debug!(
            "Rebalance skipped {} unmatched symbol(s)",
            unmatched.only_in_current.len() + unmatched.only_in_target.len()
        );
    }
    Ok(Json(RebalanceResponse {
        suggestions: actions.iter().map(ToString::to_string).collect(),
        actions,
        unmatched,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio/optimize", post(optimize))
        .route("/portfolio/metrics", post(metrics))
        .route("/portfolio/rebalance", post(rebalance))
}
