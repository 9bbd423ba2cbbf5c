//! End-to-end checks of the analysis pipeline against in-memory collaborators.

mod common;

use std::sync::Arc;

use common::{holding, CannedProvider, MemoryStore};
use portfolio_advisor::services::analysis_service::{AnalysisService, NO_HOLDINGS_SUMMARY};
use portfolio_advisor::services::data_cache::{CacheConfig, DataCache};
use portfolio_advisor::services::indicators::synthesize;
use portfolio_advisor::services::portfolio_service::aggregate;
use portfolio_advisor::services::report_format::{DEFAULT_SCORE, DEFAULT_SUMMARY};
use portfolio_advisor::services::response_parser::parse_analysis_reply;

#[test]
fn aggregate_pnl_identity_holds() {
    let sets = vec![
        vec![holding("a", "AAPL", 10.0, 150.0, 180.0)],
        vec![
            holding("a", "AAPL", 3.0, 100.0, 90.0),
            holding("b", "MSFT", 7.5, 300.0, 320.25),
        ],
        vec![holding("c", "FREE", 100.0, 0.0, 2.0)],
    ];

    for holdings in sets {
        let snapshot = aggregate(&holdings);
        assert!((snapshot.total_pnl - (snapshot.total_value - snapshot.total_cost)).abs() < 1e-9);
        assert!(snapshot.pnl_percentage.is_finite());
    }

    let zero_cost = aggregate(&[holding("c", "FREE", 100.0, 0.0, 2.0)]);
    assert_eq!(zero_cost.pnl_percentage, 0.0);
}

#[test]
fn aggregate_empty_is_all_zero() {
    let snapshot = aggregate(&[]);
    assert_eq!(snapshot.total_value, 0.0);
    assert_eq!(snapshot.total_cost, 0.0);
    assert_eq!(snapshot.total_pnl, 0.0);
    assert_eq!(snapshot.pnl_percentage, 0.0);
}

#[test]
fn indicators_are_deterministic() {
    let h = holding("a", "NVDA", 1.0, 400.0, 480.0);
    assert_eq!(synthesize(&h), synthesize(&h));
}

#[test]
fn parser_extracts_meta_block() {
    let result = parse_analysis_reply("<meta>score: 77\nsummary: ok</meta>BODY", "m");
    assert_eq!(result.score, 77);
    assert_eq!(result.summary, "ok");
    assert_eq!(result.content, "BODY");
}

#[test]
fn parser_falls_back_without_meta_block() {
    let raw = "## Overview\nJust prose, no metadata.";
    let result = parse_analysis_reply(raw, "m");
    assert_eq!(result.score, DEFAULT_SCORE);
    assert_eq!(result.summary, DEFAULT_SUMMARY);
    assert_eq!(result.content, raw);
}

#[tokio::test]
async fn empty_portfolio_never_calls_the_model() {
    let store = Arc::new(MemoryStore::default());
    let provider = Arc::new(CannedProvider::new("unused"));
    let cache = DataCache::new(store, CacheConfig::default());
    let service = AnalysisService::new(Some(provider.clone()));

    cache.force_refresh().await;
    let report = service.generate_report(&cache).await;

    assert_eq!(report.summary, NO_HOLDINGS_SUMMARY);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn remote_failure_is_recorded_as_report() {
    let store = Arc::new(MemoryStore::with_holdings(vec![holding("a", "AAPL", 10.0, 150.0, 180.0)]));
    let provider = Arc::new(CannedProvider::timing_out());
    let cache = DataCache::new(store.clone(), CacheConfig::default());
    let service = AnalysisService::new(Some(provider));

    cache.force_refresh().await;
    let report = service.generate_report(&cache).await;

    assert_eq!(report.score, 0);
    assert!(report.content.contains("timed out"));
    assert_eq!(cache.reports().len(), 1);
    assert_eq!(cache.reports()[0].id, report.id);
    assert_eq!(store.reports.lock().len(), 1);
}

#[tokio::test]
async fn successful_report_goes_to_front_of_history() {
    let store = Arc::new(MemoryStore::with_holdings(vec![holding("a", "AAPL", 10.0, 150.0, 180.0)]));
    let provider = Arc::new(CannedProvider::new("<meta>score: 81\nsummary: steady</meta>\n## Detail"));
    let cache = DataCache::new(store, CacheConfig::default());
    let service = AnalysisService::new(Some(provider));

    cache.force_refresh().await;
    let first = service.generate_report(&cache).await;
    let second = service.generate_report(&cache).await;

    let reports = cache.reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].id, second.id);
    assert_eq!(reports[1].id, first.id);
    assert_eq!(second.score, 81);
    assert_eq!(second.summary, "steady");
    assert_eq!(second.content, "## Detail");
    assert_eq!(second.model_name.as_deref(), Some("canned"));
}
