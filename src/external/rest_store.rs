use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::external::portfolio_store::{PortfolioStore, StoreError};
use crate::models::{AnalysisReport, Holding, InvestmentGoals, MacroBundle, NewsItem};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PORTFOLIO_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            timeout: Duration::from_secs(
                std::env::var("STORE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15),
            ),
        }
    }
}

/// Live quote as returned by `GET /stock/{symbol}`
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    current_price: f64,
    name: Option<String>,
}

/// HTTP client for the portfolio backend
pub struct RestPortfolioStore {
    base_url: String,
    client: Client,
}

impl RestPortfolioStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        decode(resp).await
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::BadResponse { status: resp.status().as_u16() });
        }
        Ok(())
    }

    /// Overlay the latest quote on a stored holding. A failed quote keeps the stored values.
    async fn with_live_quote(&self, mut holding: Holding) -> Holding {
        match self.get_json::<QuoteResponse>(&format!("stock/{}", holding.symbol)).await {
            Ok(quote) => {
                holding.current_price = quote.current_price;
                if let Some(name) = quote.name.filter(|n| !n.trim().is_empty()) {
                    holding.name = name;
                }
            }
            Err(e) => {
                warn!("Quote refresh failed for {}, keeping stored price: {}", holding.symbol, e);
            }
        }
        holding
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(StoreError::BadResponse { status: status.as_u16() });
    }

    resp.json::<T>()
        .await
        .map_err(|e| StoreError::Parse(e.to_string()))
}

#[async_trait]
impl PortfolioStore for RestPortfolioStore {
    async fn fetch_holdings(&self) -> Result<Vec<Holding>, StoreError> {
        let stored: Vec<Holding> = self.get_json("assets").await?;
        debug!("Loaded {} holdings, refreshing quotes", stored.len());

        let quotes = stored.into_iter().map(|h| self.with_live_quote(h));
        Ok(join_all(quotes).await)
    }

    async fn save_holdings(&self, holdings: &[Holding]) -> Result<(), StoreError> {
        self.post_json("assets", holdings).await
    }

    async fn fetch_reports(&self) -> Result<Vec<AnalysisReport>, StoreError> {
        self.get_json("reports").await
    }

    async fn save_reports(&self, reports: &[AnalysisReport]) -> Result<(), StoreError> {
        self.post_json("reports", reports).await
    }

    async fn fetch_news(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.get_json(&format!("news?limit={}", limit)).await
    }

    async fn fetch_goals(&self) -> Result<InvestmentGoals, StoreError> {
        self.get_json("goals").await
    }

    async fn save_goals(&self, goals: &InvestmentGoals) -> Result<(), StoreError> {
        self.post_json("goals", goals).await
    }

    async fn fetch_macro(&self) -> Result<MacroBundle, StoreError> {
        self.get_json("macro").await
    }
}
