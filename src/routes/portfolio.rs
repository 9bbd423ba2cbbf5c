use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Holding, PortfolioSummary, TechnicalIndicatorSet};
use crate::services::{indicators, portfolio_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/holdings", get(list_holdings).put(upsert_holding))
        .route("/holdings/:id", delete(delete_holding))
        .route("/indicators", get(list_indicators))
}

/// GET /api/portfolio/summary
/// Totals plus per-holding weights over the cached holdings
pub async fn get_summary(State(state): State<AppState>) -> Json<PortfolioSummary> {
    info!("GET /api/portfolio/summary");
    Json(portfolio_service::summarize(&state.cache.holdings()))
}

pub async fn list_holdings(State(state): State<AppState>) -> Json<Vec<Holding>> {
    info!("GET /api/portfolio/holdings");
    Json(state.cache.holdings())
}

/// PUT /api/portfolio/holdings
/// Insert or replace one holding; the full set is saved upstream
#[axum::debug_handler]
pub async fn upsert_holding(
    State(state): State<AppState>,
    Json(holding): Json<Holding>,
) -> Result<Json<Vec<Holding>>, AppError> {
    info!("PUT /api/portfolio/holdings - {}", holding.symbol);
    state.cache.upsert_holding(holding).await.map_err(|e| {
        error!("Failed to save holding: {}", e);
        e
    })?;
    Ok(Json(state.cache.holdings()))
}

pub async fn delete_holding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/portfolio/holdings/{}", id);
    state.cache.remove_holding(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/portfolio/indicators
/// Synthetic, illustrative indicators for every cached holding
pub async fn list_indicators(State(state): State<AppState>) -> Json<Vec<TechnicalIndicatorSet>> {
    info!("GET /api/portfolio/indicators");
    let holdings = state.cache.holdings();
    Json(holdings.iter().map(indicators::synthesize).collect())
}
