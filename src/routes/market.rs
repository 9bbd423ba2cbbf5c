use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{InvestmentGoals, MacroBundle, NewsItem, NewsQueryParams};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news))
        .route("/macro", get(get_macro))
        .route("/goals", get(get_goals).put(update_goals))
}

pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQueryParams>,
) -> Json<Vec<NewsItem>> {
    info!("GET /api/news - limit: {:?}", params.limit);
    let news = state.cache.news();
    let limit = params.limit.unwrap_or(news.len());
    Json(news.into_iter().take(limit).collect())
}

pub async fn get_macro(State(state): State<AppState>) -> Result<Json<MacroBundle>, AppError> {
    info!("GET /api/macro");
    state
        .cache
        .macro_data()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Macro data not loaded yet".to_string()))
}

pub async fn get_goals(State(state): State<AppState>) -> Json<InvestmentGoals> {
    info!("GET /api/goals");
    Json(state.cache.goals().unwrap_or_default())
}

#[axum::debug_handler]
pub async fn update_goals(
    State(state): State<AppState>,
    Json(goals): Json<InvestmentGoals>,
) -> Result<Json<InvestmentGoals>, AppError> {
    info!("PUT /api/goals");
    state.cache.set_goals(goals.clone()).await?;
    Ok(Json(goals))
}
