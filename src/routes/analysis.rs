use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::info;

use crate::errors::AppError;
use crate::models::AnalysisReport;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(generate_analysis))
        .route("/reports", get(list_reports))
        .route("/reports/:id", delete(delete_report))
}

/// POST /api/analysis
/// Always answers with a report. A failed model call is itself the report (score 0).
#[axum::debug_handler]
pub async fn generate_analysis(State(state): State<AppState>) -> Json<AnalysisReport> {
    info!("POST /api/analysis - Generating portfolio analysis");
    state.cache.soft_refresh().await;
    Json(state.analysis.generate_report(&state.cache).await)
}

pub async fn list_reports(State(state): State<AppState>) -> Json<Vec<AnalysisReport>> {
    info!("GET /api/reports");
    Json(state.cache.reports())
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/reports/{}", id);
    state.cache.delete_report(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
