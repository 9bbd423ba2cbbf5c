#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use portfolio_advisor::errors::LlmError;
use portfolio_advisor::external::chat_provider::{ChatCompletion, ChatCompletionProvider, ChatMessage};
use portfolio_advisor::external::portfolio_store::{PortfolioStore, StoreError};
use portfolio_advisor::models::{
    AnalysisReport, AssetClass, Holding, InvestmentGoals, MacroBundle, NewsItem,
};

pub fn holding(id: &str, symbol: &str, quantity: f64, cost_price: f64, current_price: f64) -> Holding {
    Holding {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: format!("{} Corp", symbol),
        asset_class: AssetClass::Equity,
        quantity,
        cost_price,
        current_price,
        currency: "USD".to_string(),
    }
}

/// Backend double holding everything in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub holdings: Mutex<Vec<Holding>>,
    pub reports: Mutex<Vec<AnalysisReport>>,
    pub news: Mutex<Vec<NewsItem>>,
    pub goals: Mutex<InvestmentGoals>,
    pub fetches: AtomicUsize,
    pub offline: AtomicBool,
}

impl MemoryStore {
    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        let store = Self::default();
        *store.holdings.lock() = holdings;
        store
    }

    pub fn holdings_fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn fetch_holdings(&self) -> Result<Vec<Holding>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.holdings.lock().clone())
    }

    async fn save_holdings(&self, holdings: &[Holding]) -> Result<(), StoreError> {
        self.check()?;
        *self.holdings.lock() = holdings.to_vec();
        Ok(())
    }

    async fn fetch_reports(&self) -> Result<Vec<AnalysisReport>, StoreError> {
        self.check()?;
        Ok(self.reports.lock().clone())
    }

    async fn save_reports(&self, reports: &[AnalysisReport]) -> Result<(), StoreError> {
        self.check()?;
        *self.reports.lock() = reports.to_vec();
        Ok(())
    }

    async fn fetch_news(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.check()?;
        Ok(self.news.lock().iter().take(limit).cloned().collect())
    }

    async fn fetch_goals(&self) -> Result<InvestmentGoals, StoreError> {
        self.check()?;
        Ok(self.goals.lock().clone())
    }

    async fn save_goals(&self, goals: &InvestmentGoals) -> Result<(), StoreError> {
        self.check()?;
        *self.goals.lock() = goals.clone();
        Ok(())
    }

    async fn fetch_macro(&self) -> Result<MacroBundle, StoreError> {
        self.check()?;
        Ok(MacroBundle::default())
    }
}

/// Chat endpoint double. `None` reply simulates a timeout.
pub struct CannedProvider {
    reply: Option<String>,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn new(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn timing_out() -> Self {
        Self { reply: None, calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletionProvider for CannedProvider {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<ChatCompletion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(content) => Ok(ChatCompletion {
                content: content.clone(),
                model: "canned".to_string(),
            }),
            None => Err(LlmError::Timeout),
        }
    }
}
