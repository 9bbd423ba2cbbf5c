//! Fakes shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::errors::LlmError;
use crate::external::chat_provider::{ChatCompletion, ChatCompletionProvider, ChatMessage};
use crate::external::portfolio_store::{PortfolioStore, StoreError};
use crate::models::{
    AnalysisReport, AssetClass, Holding, InvestmentGoals, MacroBundle, MacroPoint, NewsItem,
};

pub fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding {
            id: "h1".to_string(),
            symbol: "600519".to_string(),
            name: "Kweichow Moutai".to_string(),
            asset_class: AssetClass::Equity,
            quantity: 10.0,
            cost_price: 1500.0,
            current_price: 1650.0,
            currency: "CNY".to_string(),
        },
        Holding {
            id: "h2".to_string(),
            symbol: "510300".to_string(),
            name: "CSI 300 ETF".to_string(),
            asset_class: AssetClass::Fund,
            quantity: 1000.0,
            cost_price: 4.0,
            current_price: 3.5,
            currency: "CNY".to_string(),
        },
    ]
}

pub fn sample_report(id: &str) -> AnalysisReport {
    AnalysisReport {
        id: id.to_string(),
        timestamp: Utc::now(),
        summary: format!("summary {}", id),
        content: "body".to_string(),
        score: 70,
        model_name: Some("deepseek-chat".to_string()),
    }
}

/// In-memory store that counts every call and can be told to fail per operation.
#[derive(Default)]
pub struct SpyStore {
    holdings: Mutex<Vec<Holding>>,
    reports: Mutex<Vec<AnalysisReport>>,
    news: Mutex<Vec<NewsItem>>,
    goals: Mutex<InvestmentGoals>,
    saved_holdings: Mutex<Option<Vec<Holding>>>,
    saved_reports: Mutex<Vec<AnalysisReport>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    delay: Mutex<Option<Duration>>,
}

impl SpyStore {
    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        let store = Self::default();
        *store.holdings.lock() = holdings;
        store
    }

    pub fn set_holdings(&self, holdings: Vec<Holding>) {
        *self.holdings.lock() = holdings;
    }

    pub fn push_report(&self, report: AnalysisReport) {
        self.reports.lock().push(report);
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().remove(op);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub fn saved_reports(&self) -> Vec<AnalysisReport> {
        self.saved_reports.lock().clone()
    }

    pub fn saved_holdings(&self) -> Option<Vec<Holding>> {
        self.saved_holdings.lock().clone()
    }

    async fn enter(&self, op: &'static str) -> Result<(), StoreError> {
        *self.calls.lock().entry(op).or_default() += 1;
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().contains(op) {
            return Err(StoreError::Network(format!("{} unavailable", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for SpyStore {
    async fn fetch_holdings(&self) -> Result<Vec<Holding>, StoreError> {
        self.enter("fetch_holdings").await?;
        Ok(self.holdings.lock().clone())
    }

    async fn save_holdings(&self, holdings: &[Holding]) -> Result<(), StoreError> {
        self.enter("save_holdings").await?;
        *self.saved_holdings.lock() = Some(holdings.to_vec());
        Ok(())
    }

    async fn fetch_reports(&self) -> Result<Vec<AnalysisReport>, StoreError> {
        self.enter("fetch_reports").await?;
        Ok(self.reports.lock().clone())
    }

    async fn save_reports(&self, reports: &[AnalysisReport]) -> Result<(), StoreError> {
        self.enter("save_reports").await?;
        *self.saved_reports.lock() = reports.to_vec();
        Ok(())
    }

    async fn fetch_news(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        self.enter("fetch_news").await?;
        Ok(self.news.lock().iter().take(limit).cloned().collect())
    }

    async fn fetch_goals(&self) -> Result<InvestmentGoals, StoreError> {
        self.enter("fetch_goals").await?;
        Ok(self.goals.lock().clone())
    }

    async fn save_goals(&self, goals: &InvestmentGoals) -> Result<(), StoreError> {
        self.enter("save_goals").await?;
        *self.goals.lock() = goals.clone();
        Ok(())
    }

    async fn fetch_macro(&self) -> Result<MacroBundle, StoreError> {
        self.enter("fetch_macro").await?;
        Ok(MacroBundle {
            cpi: vec![MacroPoint { date: "2024-01".to_string(), value: 0.3 }],
            ..MacroBundle::default()
        })
    }
}

/// Chat provider returning a fixed reply (or error) and recording what it was sent.
pub struct ScriptedProvider {
    reply: Result<String, fn() -> LlmError>,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<ChatMessage>>>,
}

impl ScriptedProvider {
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn failing(error: fn() -> LlmError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.last_messages.lock().clone()
    }
}

#[async_trait]
impl ChatCompletionProvider for ScriptedProvider {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<ChatCompletion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock() = Some(messages);

        match &self.reply {
            Ok(content) => Ok(ChatCompletion {
                content: content.clone(),
                model: "scripted-model".to_string(),
            }),
            Err(make_error) => Err(make_error()),
        }
    }
}
