use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::services::data_cache::DataCache;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub utc_offset_hours: i32,
    pub sessions: Vec<TradingSession>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(10 * 60),
            utc_offset_hours: 8,
            sessions: TradingSession::exchange_default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let sessions = match std::env::var("MARKET_SESSIONS") {
            Ok(raw) => raw
                .split(',')
                .map(TradingSession::parse)
                .collect::<Result<Vec<_>, _>>()?,
            Err(_) => defaults.sessions,
        };

        Ok(Self {
            enabled: std::env::var("SCHEDULER_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enabled),
            interval: std::env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.interval),
            utc_offset_hours: std::env::var("MARKET_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.utc_offset_hours),
            sessions,
        })
    }

    pub fn calendar(&self) -> Result<TradingCalendar, AppError> {
        let offset = FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            AppError::Validation(format!("Invalid UTC offset: {}h", self.utc_offset_hours))
        })?;
        Ok(TradingCalendar::new(offset, self.sessions.clone()))
    }
}

/// Half-open trading window `[open, close)`, in minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    pub open: u32,
    pub close: u32,
}

impl TradingSession {
    /// Morning 09:30-11:30 and afternoon 13:00-15:00.
    pub fn exchange_default() -> Vec<Self> {
        vec![
            TradingSession { open: 9 * 60 + 30, close: 11 * 60 + 30 },
            TradingSession { open: 13 * 60, close: 15 * 60 },
        ]
    }

    /// Parse `HH:MM-HH:MM`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = || AppError::Validation(format!("Invalid trading session: {}", raw));

        let (open, close) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let open = parse_minutes(open).ok_or_else(invalid)?;
        let close = parse_minutes(close).ok_or_else(invalid)?;
        if open >= close {
            return Err(invalid());
        }
        Ok(Self { open, close })
    }

    fn contains(&self, minute_of_day: u32) -> bool {
        minute_of_day >= self.open && minute_of_day < self.close
    }
}

fn parse_minutes(raw: &str) -> Option<u32> {
    let (h, m) = raw.trim().split_once(':')?;
    let (h, m): (u32, u32) = (h.parse().ok()?, m.parse().ok()?);
    (h < 24 && m < 60).then_some(h * 60 + m)
}

/// Weekday trading windows in the venue's local time.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    offset: FixedOffset,
    sessions: Vec<TradingSession>,
}

impl TradingCalendar {
    pub fn new(offset: FixedOffset, sessions: Vec<TradingSession>) -> Self {
        Self { offset, sessions }
    }

    pub fn is_open(&self, at: DateTime<Utc>) -> bool {
        let local = at.with_timezone(&self.offset);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }

        let minute_of_day = local.hour() * 60 + local.minute();
        self.sessions.iter().any(|s| s.contains(minute_of_day))
    }
}

/// One timer tick: refresh holdings if the market is open. Returns whether a refresh ran.
pub async fn run_tick(cache: &DataCache, calendar: &TradingCalendar, now: DateTime<Utc>) -> bool {
    if !calendar.is_open(now) {
        debug!("Outside trading hours, skipping holdings refresh");
        return false;
    }

    match cache.refresh_holdings().await {
        Ok(count) => info!("⏱️ Scheduled holdings refresh complete ({} positions)", count),
        Err(e) => warn!("⏱️ Scheduled holdings refresh failed: {}", e),
    }
    true
}

/// Periodic holdings refresh during trading hours.
///
/// Each `start` builds its own `JobScheduler`; `stop` shuts it down and drops it,
/// so the scheduler can be started again afterwards.
pub struct RefreshScheduler {
    scheduler: Option<JobScheduler>,
    cache: Arc<DataCache>,
    calendar: Arc<TradingCalendar>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(cache: Arc<DataCache>, calendar: TradingCalendar, interval: Duration) -> Self {
        Self {
            scheduler: None,
            cache,
            calendar: Arc::new(calendar),
            interval,
        }
    }

    pub async fn start(&mut self) -> Result<(), AppError> {
        if self.scheduler.is_some() {
            return Ok(());
        }

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {}", e)))?;

        let cache = self.cache.clone();
        let calendar = self.calendar.clone();

        let job = Job::new_repeated_async(self.interval, move |_uuid, _l| {
            let cache = cache.clone();
            let calendar = calendar.clone();
            Box::pin(async move {
                run_tick(&cache, &calendar, Utc::now()).await;
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create refresh job: {}", e)))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add refresh job: {}", e)))?;

        scheduler
            .start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {}", e)))?;

        self.scheduler = Some(scheduler);
        info!("📅 Holdings refresh scheduled every {:?} during trading hours", self.interval);
        Ok(())
    }

    /// Cancel the timer. No tick fires after this returns.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        let Some(mut scheduler) = self.scheduler.take() else {
            return Ok(());
        };

        info!("🛑 Stopping refresh scheduler...");
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::External(format!("Failed to stop scheduler: {}", e)))?;
        info!("✅ Refresh scheduler stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }
}
