use axum::extract::{Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::services::data_cache::{CacheStatus, RefreshOutcome};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(clear_cache))
        .route("/status", get(get_status))
        .route("/refresh", post(refresh))
        .route("/refresh/holdings", post(refresh_holdings))
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    /// Bypass the TTL check (default: false)
    pub force: Option<bool>,
}

/// POST /api/cache/refresh?force=true
pub async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Json<RefreshOutcome> {
    let force = params.force.unwrap_or(false);
    info!("POST /api/cache/refresh - force: {}", force);

    let outcome = if force {
        state.cache.force_refresh().await
    } else {
        state.cache.soft_refresh().await
    };
    Json(outcome)
}

pub async fn refresh_holdings(State(state): State<AppState>) -> Result<Json<CacheStatus>, AppError> {
    info!("POST /api/cache/refresh/holdings");
    state.cache.refresh_holdings().await?;
    Ok(Json(state.cache.status()))
}

/// GET /api/cache/status
pub async fn get_status(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.cache.status())
}

/// DELETE /api/cache
/// Drop all cached data, as on logout
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    info!("DELETE /api/cache");
    state.cache.clear().await;
    StatusCode::NO_CONTENT
}
