use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use quantfolio_core::portfolio::scenarios::{
    compare_scenarios, run_scenario, PortfolioSnapshot, ScenarioInfo, ScenarioResult,
    ScenarioType,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunScenarioBody {
    portfolio: PortfolioSnapshot,
    scenario_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareScenariosBody {
    portfolio: PortfolioSnapshot,
}

async fn list_scenarios() -> Json<Vec<ScenarioInfo>> {
    Json(ScenarioType::ALL.into_iter().map(ScenarioInfo::from).collect())
}

async fn run(Json(body): Json<RunScenarioBody>) -> ApiResult<Json<ScenarioResult>> {
    let scenario: ScenarioType = body.scenario_type.parse()?;
    let result = run_scenario(&body.portfolio, scenario)?;
    Ok(Json(result))
}

async fn compare(Json(body): Json<CompareScenariosBody>) -> ApiResult<Json<Vec<ScenarioResult>>> {
    let results = compare_scenarios(&body.portfolio)?;
    Ok(Json(results))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/scenarios", get(list_scenarios))
        .route("/scenarios/run", post(run))
        .route("/scenarios/compare", post(compare))
}
