use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnalysisReport, Holding, InvestmentGoals, MacroBundle, NewsItem};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: HTTP {status}")]
    BadResponse { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),
}

/// REST collaborators behind the dashboard. Saves are full replacements,
/// never deltas.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn fetch_holdings(&self) -> Result<Vec<Holding>, StoreError>;

    async fn save_holdings(&self, holdings: &[Holding]) -> Result<(), StoreError>;

    async fn fetch_reports(&self) -> Result<Vec<AnalysisReport>, StoreError>;

    async fn save_reports(&self, reports: &[AnalysisReport]) -> Result<(), StoreError>;

    async fn fetch_news(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError>;

    async fn fetch_goals(&self) -> Result<InvestmentGoals, StoreError>;

    async fn save_goals(&self, goals: &InvestmentGoals) -> Result<(), StoreError>;

    async fn fetch_macro(&self) -> Result<MacroBundle, StoreError>;
}
