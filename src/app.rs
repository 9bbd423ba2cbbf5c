use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{analysis, cache, health, market, portfolio};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/portfolio", portfolio::router())
        .nest("/api/cache", cache::router())
        .nest("/api", analysis::router().merge(market::router()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
