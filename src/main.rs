use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use portfolio_advisor::app;
use portfolio_advisor::external::chat_provider::ChatCompletionProvider;
use portfolio_advisor::external::openai_compat::{LlmConfig, OpenAiCompatibleProvider};
use portfolio_advisor::external::rest_store::{RestPortfolioStore, StoreConfig};
use portfolio_advisor::logging::{init_logging, LoggingConfig};
use portfolio_advisor::services::analysis_service::AnalysisService;
use portfolio_advisor::services::data_cache::{CacheConfig, DataCache};
use portfolio_advisor::services::refresh_scheduler::{RefreshScheduler, SchedulerConfig};
use portfolio_advisor::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let store = RestPortfolioStore::new(StoreConfig::from_env())
        .context("Failed to create portfolio store client")?;

    let llm_config = LlmConfig::from_env();
    let provider: Option<Arc<dyn ChatCompletionProvider>> =
        match OpenAiCompatibleProvider::new(&llm_config) {
            Ok(provider) => {
                tracing::info!("🤖 Chat provider: {} via {}", llm_config.model, llm_config.endpoint);
                Some(Arc::new(provider))
            }
            Err(e) => {
                tracing::warn!("Chat provider unavailable: {}", e);
                None
            }
        };

    let cache = Arc::new(DataCache::new(Arc::new(store), CacheConfig::from_env()));
    let mut analysis = AnalysisService::new(provider);
    if let Ok(context) = std::env::var("MARKET_CONTEXT") {
        tracing::info!("Using market context from MARKET_CONTEXT");
        analysis = analysis.with_market_context(context);
    }
    let analysis = Arc::new(analysis);

    cache.soft_refresh().await;

    let scheduler_config = SchedulerConfig::from_env().context("Invalid scheduler configuration")?;
    let mut scheduler = if scheduler_config.enabled {
        let calendar = scheduler_config.calendar().context("Invalid market calendar")?;
        let mut scheduler = RefreshScheduler::new(cache.clone(), calendar, scheduler_config.interval);
        scheduler.start().await.context("Failed to start refresh scheduler")?;
        Some(scheduler)
    } else {
        tracing::info!("Refresh scheduler disabled");
        None
    };

    let state = AppState { cache, analysis };
    let app = app::create_app(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .context("Invalid BIND_ADDR")?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Portfolio advisor running at http://{}/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.stop().await.context("Failed to stop refresh scheduler")?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
