use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::LlmError;
use crate::external::chat_provider::{ChatCompletionProvider, ChatMessage};
use crate::models::{demo_news, AnalysisReport, AnalysisResult, Holding, InvestmentGoals, NewsItem};
use crate::services::data_cache::DataCache;
use crate::services::indicators::synthesize;
use crate::services::portfolio_service::aggregate;
use crate::services::prompt_builder::{build_analysis_prompt, PromptInput, MARKET_CONTEXT, SYSTEM_ROLE};
use crate::services::response_parser::parse_analysis_reply;

pub const NO_HOLDINGS_SUMMARY: &str = "No holdings";
pub const NO_HOLDINGS_CONTENT: &str = "Add holdings to your portfolio to receive an analysis report.";
pub const FAILURE_SUMMARY: &str = "Report generation failed";
pub const FAILURE_MODEL: &str = "Error";
pub const EMPTY_REPLY_CONTENT: &str = "Unable to generate an analysis report, please try again later.";

/// Drives one "generate analysis" action: indicators, prompt, a single remote
/// exchange, reply parsing. Every call yields a result; remote failures become
/// a score-0 result naming the cause. There is no retry.
pub struct AnalysisService {
    provider: Option<Arc<dyn ChatCompletionProvider>>,
    market_context: String,
}

impl AnalysisService {
    pub fn new(provider: Option<Arc<dyn ChatCompletionProvider>>) -> Self {
        if provider.is_none() {
            warn!("No chat provider configured, analysis requests will produce failure reports");
        }
        Self {
            provider,
            market_context: MARKET_CONTEXT.to_string(),
        }
    }

    pub fn with_market_context(mut self, context: impl Into<String>) -> Self {
        self.market_context = context.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn analyze(
        &self,
        holdings: &[Holding],
        news: &[NewsItem],
        goals: Option<&InvestmentGoals>,
    ) -> AnalysisResult {
        if holdings.is_empty() {
            info!("Analysis requested with no holdings, skipping model call");
            return no_holdings_result();
        }

        let fallback_news;
        let news = if news.is_empty() {
            fallback_news = demo_news();
            &fallback_news[..]
        } else {
            news
        };

        let snapshot = aggregate(holdings);
        info!(
            "Generating analysis for {} holdings (value: {:.2}, P&L: {:.2}%)",
            holdings.len(),
            snapshot.total_value,
            snapshot.pnl_percentage
        );

        let indicators: Vec<_> = holdings.iter().map(synthesize).collect();
        let prompt = build_analysis_prompt(&PromptInput {
            holdings,
            indicators: &indicators,
            news,
            goals,
            market_context: &self.market_context,
        });

        match self.request(prompt).await {
            Ok((content, model)) => {
                let content = if content.trim().is_empty() {
                    EMPTY_REPLY_CONTENT.to_string()
                } else {
                    content
                };
                let result = parse_analysis_reply(&content, &model);
                info!("Analysis complete (model: {}, score: {})", model, result.score);
                result
            }
            Err(e) => {
                error!("Analysis request failed: {}", e);
                failure_result(&e)
            }
        }
    }

    /// Analyze the cached portfolio and record the outcome at the front of the
    /// report history. The no-holdings result is returned but not recorded.
    pub async fn generate_report(&self, cache: &DataCache) -> AnalysisReport {
        let holdings = cache.holdings();
        if holdings.is_empty() {
            return no_holdings_result().into();
        }

        let news = cache.news();
        let goals = cache.goals();

        let report: AnalysisReport = self.analyze(&holdings, &news, goals.as_ref()).await.into();
        cache.record_report(report.clone()).await;
        report
    }

    async fn request(&self, prompt: String) -> Result<(String, String), LlmError> {
        let provider = self.provider.as_ref().ok_or(LlmError::Disabled)?;

        let completion = provider
            .complete(vec![ChatMessage::system(SYSTEM_ROLE), ChatMessage::user(prompt)])
            .await?;

        Ok((completion.content, completion.model))
    }
}

fn no_holdings_result() -> AnalysisResult {
    AnalysisResult {
        score: 0,
        summary: NO_HOLDINGS_SUMMARY.to_string(),
        content: NO_HOLDINGS_CONTENT.to_string(),
        model_name: None,
    }
}

fn failure_result(cause: &LlmError) -> AnalysisResult {
    AnalysisResult {
        score: 0,
        summary: FAILURE_SUMMARY.to_string(),
        content: format!(
            "**Error**: the AI analysis service is temporarily unavailable.\n\nReason: {}\n\n\
             Check that the backend server is running and the network is reachable, then try again.",
            cause
        ),
        model_name: Some(FAILURE_MODEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_cache::CacheConfig;
    use crate::services::report_format::{DEFAULT_SCORE, META_OPEN};
    use crate::test_support::{sample_holdings, ScriptedProvider, SpyStore};

    #[tokio::test]
    async fn test_no_holdings_skips_provider() {
        let provider = Arc::new(ScriptedProvider::replying("<meta>score: 90</meta>x"));
        let service = AnalysisService::new(Some(provider.clone()));

        let result = service.analyze(&[], &[], None).await;

        assert_eq!(result.summary, NO_HOLDINGS_SUMMARY);
        assert_eq!(result.score, 0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_reply_is_parsed() {
        let provider = Arc::new(ScriptedProvider::replying(
            "<meta>\nscore: 81\nsummary: Healthy but concentrated\n</meta>\n# Report",
        ));
        let service = AnalysisService::new(Some(provider.clone()));

        let result = service.analyze(&sample_holdings(), &[], None).await;

        assert_eq!(result.score, 81);
        assert_eq!(result.summary, "Healthy but concentrated");
        assert_eq!(result.content, "# Report");
        assert_eq!(result.model_name.as_deref(), Some("scripted-model"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_uses_demo_news_and_system_role() {
        let provider = Arc::new(ScriptedProvider::replying("plain"));
        let service = AnalysisService::new(Some(provider.clone()));

        service.analyze(&sample_holdings(), &[], None).await;

        let messages = provider.last_messages().expect("provider was called");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_ROLE);
        assert!(messages[1].content.contains("Fed Signals Potential Rate Cut in Q3"));
        assert!(messages[1].content.contains(META_OPEN));
    }

    #[tokio::test]
    async fn test_custom_market_context_reaches_prompt() {
        let provider = Arc::new(ScriptedProvider::replying("plain"));
        let service = AnalysisService::new(Some(provider.clone()))
            .with_market_context("Bond yields spiking after the CPI print");

        service.analyze(&sample_holdings(), &[], None).await;

        let prompt = &provider.last_messages().expect("provider was called")[1].content;
        assert!(prompt.contains("Bond yields spiking after the CPI print"));
        assert!(!prompt.contains(MARKET_CONTEXT));
    }

    #[tokio::test]
    async fn test_empty_reply_gets_placeholder_body() {
        let provider = Arc::new(ScriptedProvider::replying("   "));
        let service = AnalysisService::new(Some(provider));

        let result = service.analyze(&sample_holdings(), &[], None).await;

        assert_eq!(result.score, DEFAULT_SCORE);
        assert_eq!(result.content, EMPTY_REPLY_CONTENT);
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_zero_score_result() {
        let provider = Arc::new(ScriptedProvider::failing(|| LlmError::ApiError("HTTP 502".into())));
        let service = AnalysisService::new(Some(provider));

        let result = service.analyze(&sample_holdings(), &[], None).await;

        assert_eq!(result.score, 0);
        assert_eq!(result.summary, FAILURE_SUMMARY);
        assert!(result.content.contains("HTTP 502"));
        assert_eq!(result.model_name.as_deref(), Some(FAILURE_MODEL));
    }

    #[tokio::test]
    async fn test_missing_provider_becomes_failure_result() {
        let service = AnalysisService::new(None);
        assert!(!service.is_enabled());

        let result = service.analyze(&sample_holdings(), &[], None).await;
        assert_eq!(result.score, 0);
        assert!(result.content.contains("disabled"));
    }

    #[tokio::test]
    async fn test_generate_report_records_failure_in_history() {
        let store = Arc::new(SpyStore::with_holdings(sample_holdings()));
        let cache = DataCache::new(store.clone(), CacheConfig::default());
        cache.force_refresh().await;

        let provider = Arc::new(ScriptedProvider::failing(|| LlmError::Timeout));
        let service = AnalysisService::new(Some(provider));

        let report = service.generate_report(&cache).await;

        assert_eq!(report.score, 0);
        assert!(report.content.contains("timed out"));
        assert_eq!(cache.reports().first(), Some(&report));
        assert_eq!(store.saved_reports().first(), Some(&report));
    }

    #[tokio::test]
    async fn test_generate_report_without_holdings_records_nothing() {
        let store = Arc::new(SpyStore::default());
        let cache = DataCache::new(store.clone(), CacheConfig::default());
        let provider = Arc::new(ScriptedProvider::replying("x"));
        let service = AnalysisService::new(Some(provider.clone()));

        let report = service.generate_report(&cache).await;

        assert_eq!(report.summary, NO_HOLDINGS_SUMMARY);
        assert_eq!(provider.calls(), 0);
        assert!(cache.reports().is_empty());
        assert_eq!(store.total_calls(), 0);
    }
}
