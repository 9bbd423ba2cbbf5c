use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::external::portfolio_store::{PortfolioStore, StoreError};
use crate::models::{AnalysisReport, Holding, InvestmentGoals, MacroBundle, NewsItem};

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub news_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            news_limit: 20,
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            news_limit: std::env::var("NEWS_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.news_limit),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Served from cache, nothing fetched
    Fresh,
    /// A full fetch ran; `failures` fetches were absorbed
    Refreshed { failures: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub last_updated: Option<DateTime<Utc>>,
    pub fresh: bool,
    pub holdings: usize,
    pub reports: usize,
    pub news: usize,
    pub goals_set: bool,
    pub macro_loaded: bool,
    pub holdings_loaded: bool,
    pub reports_loaded: bool,
}

#[derive(Debug, Default)]
struct CacheState {
    holdings: Vec<Holding>,
    reports: Vec<AnalysisReport>,
    news: Vec<NewsItem>,
    goals: Option<InvestmentGoals>,
    macro_data: Option<MacroBundle>,
    /// Full-replacement saves are only safe once the partition came from the store
    holdings_loaded: bool,
    reports_loaded: bool,
    /// Start of the last refresh in which every partition fetch succeeded
    last_fetch: Option<Instant>,
    last_updated: Option<DateTime<Utc>>,
}

/// Last-fetched snapshot of the user's dashboard data.
///
/// Full refreshes are single-flight: a caller arriving while one runs waits
/// for it, and a waiting soft refresh then returns without fetching again.
/// Macro data is its own partition, loaded once and reloaded only on force.
///
/// Holdings and reports are saved upstream as whole lists, so neither list is
/// written back until it has been fetched at least once.
pub struct DataCache {
    store: Arc<dyn PortfolioStore>,
    config: CacheConfig,
    state: RwLock<CacheState>,
    refresh_gate: Mutex<()>,
}

impl DataCache {
    pub fn new(store: Arc<dyn PortfolioStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            state: RwLock::new(CacheState::default()),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Fresh means: within TTL of the last complete fetch, and holdings are non-empty.
    pub fn is_fresh(&self) -> bool {
        let state = self.state.read();
        !state.holdings.is_empty()
            && state
                .last_fetch
                .is_some_and(|at| at.elapsed() < self.config.ttl)
    }

    pub async fn soft_refresh(&self) -> RefreshOutcome {
        if self.is_fresh() {
            debug!("Cache is fresh, skipping refresh");
            return RefreshOutcome::Fresh;
        }

        let _gate = self.refresh_gate.lock().await;
        if self.is_fresh() {
            debug!("Cache refreshed by a concurrent caller");
            return RefreshOutcome::Fresh;
        }

        self.refresh(false).await
    }

    pub async fn force_refresh(&self) -> RefreshOutcome {
        let _gate = self.refresh_gate.lock().await;
        self.refresh(true).await
    }

    async fn refresh(&self, force: bool) -> RefreshOutcome {
        let started = Instant::now();
        let load_macro = force || self.state.read().macro_data.is_none();
        info!("🔄 Refreshing cache (force: {}, macro: {})", force, load_macro);

        let store = self.store.as_ref();
        let macro_fetch = async {
            if load_macro {
                Some(store.fetch_macro().await)
            } else {
                None
            }
        };

        let (holdings, reports, news, goals, macro_data) = tokio::join!(
            store.fetch_holdings(),
            store.fetch_reports(),
            store.fetch_news(self.config.news_limit),
            store.fetch_goals(),
            macro_fetch,
        );

        let mut failures = 0;
        let mut state = self.state.write();

        if absorb(&mut state.holdings, holdings, "holdings", &mut failures) {
            state.holdings_loaded = true;
        }
        // Reports recorded before the history first loaded stay on top of it
        let reports = reports.map(|mut fetched| {
            if state.reports_loaded || state.reports.is_empty() {
                return fetched;
            }
            let mut merged = std::mem::take(&mut state.reports);
            merged.append(&mut fetched);
            merged
        });
        if absorb(&mut state.reports, reports, "reports", &mut failures) {
            state.reports_loaded = true;
        }
        absorb(&mut state.news, news, "news", &mut failures);
        match goals {
            Ok(goals) => state.goals = Some(goals),
            Err(e) => {
                warn!("Failed to fetch goals, keeping cached value: {}", e);
                failures += 1;
            }
        }

        // Macro failures leave the partition empty so the next refresh retries it,
        // but do not hold back the TTL clock.
        match macro_data {
            Some(Ok(bundle)) => state.macro_data = Some(bundle),
            Some(Err(e)) => error!("Failed to fetch macro data: {}", e),
            None => {}
        }

        if failures == 0 {
            state.last_fetch = Some(started);
            state.last_updated = Some(Utc::now());
            info!(
                "✅ Cache refreshed ({} holdings, {} reports, {} news) in {}ms",
                state.holdings.len(),
                state.reports.len(),
                state.news.len(),
                started.elapsed().as_millis()
            );
        } else {
            warn!("Cache refresh finished with {} failed fetches", failures);
        }

        RefreshOutcome::Refreshed { failures }
    }

    /// Reload holdings only. Used by the trading-hours scheduler; leaves the TTL clock alone.
    pub async fn refresh_holdings(&self) -> Result<usize, StoreError> {
        let _gate = self.refresh_gate.lock().await;
        match self.store.fetch_holdings().await {
            Ok(holdings) => {
                let count = holdings.len();
                let mut state = self.state.write();
                state.holdings = holdings;
                state.holdings_loaded = true;
                state.last_updated = Some(Utc::now());
                debug!("Holdings refreshed ({} positions)", count);
                Ok(count)
            }
            Err(e) => {
                warn!("Holdings refresh failed: {}", e);
                Err(e)
            }
        }
    }

    /// Put a new report at the front of the history and push the whole list to the store.
    /// Until the stored history has been loaded the report is kept locally only.
    pub async fn record_report(&self, report: AnalysisReport) {
        let reports = {
            let mut state = self.state.write();
            state.reports.insert(0, report);
            if !state.reports_loaded {
                warn!("Report history not loaded yet, keeping new report in cache only");
                return;
            }
            state.reports.clone()
        };

        if let Err(e) = self.store.save_reports(&reports).await {
            error!("Failed to persist report history: {}", e);
        }
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), AppError> {
        let reports = {
            let mut state = self.state.write();
            if !state.reports_loaded {
                return Err(not_loaded("Report history"));
            }
            let before = state.reports.len();
            state.reports.retain(|r| r.id != id);
            if state.reports.len() == before {
                return Err(AppError::NotFound(format!("Report {} not found", id)));
            }
            state.reports.clone()
        };

        self.store.save_reports(&reports).await?;
        Ok(())
    }

    /// Insert or replace (by id) a holding and save the full set.
    pub async fn upsert_holding(&self, holding: Holding) -> Result<(), AppError> {
        holding.validate()?;

        let holdings = {
            let mut state = self.state.write();
            if !state.holdings_loaded {
                return Err(not_loaded("Holdings"));
            }
            match state.holdings.iter_mut().find(|h| h.id == holding.id) {
                Some(existing) => *existing = holding,
                None => state.holdings.push(holding),
            }
            state.holdings.clone()
        };

        self.store.save_holdings(&holdings).await?;
        Ok(())
    }

    pub async fn remove_holding(&self, id: &str) -> Result<(), AppError> {
        let holdings = {
            let mut state = self.state.write();
            if !state.holdings_loaded {
                return Err(not_loaded("Holdings"));
            }
            let before = state.holdings.len();
            state.holdings.retain(|h| h.id != id);
            if state.holdings.len() == before {
                return Err(AppError::NotFound(format!("Holding {} not found", id)));
            }
            state.holdings.clone()
        };

        self.store.save_holdings(&holdings).await?;
        Ok(())
    }

    pub async fn set_goals(&self, goals: InvestmentGoals) -> Result<(), AppError> {
        goals.validate()?;
        self.store.save_goals(&goals).await?;
        self.state.write().goals = Some(goals);
        Ok(())
    }

    /// Drop everything, as on logout. Waits for an in-flight refresh so its
    /// results cannot land after the reset.
    pub async fn clear(&self) {
        let _gate = self.refresh_gate.lock().await;
        *self.state.write() = CacheState::default();
        info!("Cache cleared");
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.state.read().holdings.clone()
    }

    pub fn reports(&self) -> Vec<AnalysisReport> {
        self.state.read().reports.clone()
    }

    pub fn news(&self) -> Vec<NewsItem> {
        self.state.read().news.clone()
    }

    pub fn goals(&self) -> Option<InvestmentGoals> {
        self.state.read().goals.clone()
    }

    pub fn macro_data(&self) -> Option<MacroBundle> {
        self.state.read().macro_data.clone()
    }

    pub fn status(&self) -> CacheStatus {
        let fresh = self.is_fresh();
        let state = self.state.read();
        CacheStatus {
            last_updated: state.last_updated,
            fresh,
            holdings: state.holdings.len(),
            reports: state.reports.len(),
            news: state.news.len(),
            goals_set: state.goals.as_ref().is_some_and(|g| g.is_set()),
            macro_loaded: state.macro_data.is_some(),
            holdings_loaded: state.holdings_loaded,
            reports_loaded: state.reports_loaded,
        }
    }
}

fn not_loaded(what: &str) -> AppError {
    AppError::Unavailable(format!("{} not loaded from the store yet, refresh first", what))
}

/// Store a fetched partition or count the failure. Returns whether the fetch succeeded.
fn absorb<T>(slot: &mut T, fetched: Result<T, StoreError>, what: &str, failures: &mut usize) -> bool {
    match fetched {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(e) => {
            warn!("Failed to fetch {}, keeping cached value: {}", what, e);
            *failures += 1;
            false
        }
    }
}
