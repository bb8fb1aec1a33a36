//! Unit tests for batch analysis

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use btock::config::RuntimeConfig;
use btock::core::runtime::{AnalysisRuntime, INSUFFICIENT_DATA_MESSAGE, NO_DATA_MESSAGE};
use btock::indicators::registry::IndicatorCategory;
use btock::metrics::Metrics;
use btock::models::indicators::Candle;
use btock::models::session::SessionStatus;
use btock::services::market_data::{InMemoryMarketData, MarketDataError, MarketDataProvider};
use btock::signals::categories::CategoryWeights;
use btock::signals::engine::ScoringConfig;

use crate::support::rising_candles;

fn market() -> InMemoryMarketData {
    InMemoryMarketData::new()
        .with_bars("AAPL", rising_candles(250, 100.0, 0.5))
        .with_bars("MSFT", rising_candles(250, 300.0, 0.25))
        .with_bars("SHORT", rising_candles(50, 10.0, 0.1))
}

fn runtime(provider: impl MarketDataProvider + 'static) -> AnalysisRuntime {
    AnalysisRuntime::new(RuntimeConfig::default(), Arc::new(provider))
}

struct FailingProvider;

impl MarketDataProvider for FailingProvider {
    fn get_daily_bars(&self, _symbol: &str, _limit: usize) -> Result<Vec<Candle>, MarketDataError> {
        Err(MarketDataError::Provider("boom".to_string()))
    }

    fn get_latest_price(&self, _symbol: &str) -> Result<Option<f64>, MarketDataError> {
        Ok(None)
    }
}

/// Raises the cancel flag while fetching `trigger`.
struct CancellingProvider {
    inner: InMemoryMarketData,
    trigger: &'static str,
    cancel: Arc<AtomicBool>,
}

impl MarketDataProvider for CancellingProvider {
    fn get_daily_bars(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError> {
        if symbol == self.trigger {
            self.cancel.store(true, Ordering::SeqCst);
        }
        self.inner.get_daily_bars(symbol, limit)
    }

    fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError> {
        self.inner.get_latest_price(symbol)
    }
}

#[test]
fn results_follow_cleaned_input_order() {
    let session = runtime(market()).run([" msft", "aapl", "MSFT", "n/a", "missing"]);

    let tickers: Vec<&str> = session.results.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["MSFT", "AAPL", "MISSING"]);
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.session_id.len(), 8);
}

#[test]
fn scored_results_carry_last_close_as_price() {
    let session = runtime(market()).run(["AAPL"]);
    let result = &session.results[0];

    assert!(result.is_success());
    assert_eq!(result.current_price(), Some(224.5));
    let score = result.final_score().unwrap();
    assert!((-1.0..=1.0).contains(&score));
    assert!(result.signal().is_some());
}

#[test]
fn latest_price_overrides_last_close() {
    let session = runtime(market().with_price("AAPL", 123.456)).run(["AAPL"]);
    assert_eq!(session.results[0].current_price(), Some(123.46));
}

#[test]
fn unusable_latest_price_falls_back_to_last_close() {
    for price in [0.0, -5.0, f64::NAN] {
        let session = runtime(market().with_price("AAPL", price)).run(["AAPL"]);
        assert_eq!(session.results[0].current_price(), Some(224.5), "{price}");
    }
}

#[test]
fn unknown_ticker_reports_no_data() {
    let session = runtime(market()).run(["MISSING"]);
    let result = &session.results[0];
    assert!(!result.is_success());
    assert_eq!(result.error_message(), Some(NO_DATA_MESSAGE));
    assert_eq!(result.current_price(), None);
}

#[test]
fn short_history_reports_insufficient_data_with_price() {
    let session = runtime(market()).run(["SHORT"]);
    let result = &session.results[0];
    assert_eq!(result.error_message(), Some(INSUFFICIENT_DATA_MESSAGE));
    assert_eq!(result.current_price(), Some(14.9));
}

#[test]
fn history_limit_applies_to_fetched_bars() {
    let config = RuntimeConfig {
        history_bars: 150,
        ..RuntimeConfig::default()
    };
    let session = AnalysisRuntime::new(config, Arc::new(market())).run(["AAPL"]);
    assert_eq!(session.results[0].error_message(), Some(INSUFFICIENT_DATA_MESSAGE));
}

#[test]
fn provider_errors_become_error_rows() {
    let session = runtime(FailingProvider).run(["AAPL", "MSFT"]);
    assert_eq!(session.results.len(), 2);
    for result in &session.results {
        assert_eq!(result.error_message(), Some("Analysis error: provider error: boom"));
    }
    assert_eq!(session.summary().success_rate, 0.0);
}

#[test]
fn cancel_before_start_analyzes_nothing() {
    let cancel = AtomicBool::new(true);
    let session = runtime(market()).run_with_cancel(["AAPL", "MSFT"], &cancel);
    assert!(session.results.is_empty());
    assert_eq!(session.status, SessionStatus::Cancelled);
}

#[test]
fn cancel_mid_run_keeps_finished_results() {
    let cancel = Arc::new(AtomicBool::new(false));
    let provider = CancellingProvider {
        inner: market(),
        trigger: "MSFT",
        cancel: cancel.clone(),
    };
    let session = runtime(provider).run_with_cancel(["AAPL", "MSFT", "SHORT"], &cancel);

    let tickers: Vec<&str> = session.results.iter().map(|r| r.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    assert_eq!(session.status, SessionStatus::Cancelled);
}

#[test]
fn invalid_configured_weights_fall_back_to_defaults() {
    let config = RuntimeConfig {
        scoring: ScoringConfig {
            weights: CategoryWeights::new(-1.0, 1.0, 1.0, 1.0, 1.0),
            ..ScoringConfig::default()
        },
        ..RuntimeConfig::default()
    };
    let runtime = AnalysisRuntime::new(config, Arc::new(market()));
    assert_eq!(runtime.weights(), CategoryWeights::default());
    assert_eq!(runtime.run(["AAPL"]).weights, CategoryWeights::default());
}

#[test]
fn configured_weights_are_normalized() {
    let config = RuntimeConfig {
        scoring: ScoringConfig {
            weights: CategoryWeights::new(2.0, 2.0, 0.0, 0.0, 0.0),
            ..ScoringConfig::default()
        },
        ..RuntimeConfig::default()
    };
    let runtime = AnalysisRuntime::new(config, Arc::new(market()));
    assert_eq!(runtime.weights(), CategoryWeights::new(0.5, 0.5, 0.0, 0.0, 0.0));
}

#[test]
fn scored_tickers_keep_an_indicator_breakdown() {
    let session = runtime(market()).run(["AAPL", "MISSING"]);

    let breakdown = &session.indicator_scores["AAPL"];
    let expected: usize = IndicatorCategory::ALL
        .iter()
        .map(|category| category.members().len())
        .sum();
    assert_eq!(breakdown.len(), expected);
    assert!(breakdown.iter().all(|s| (-1.0..=1.0).contains(&s.score)));
    assert!(!session.indicator_scores.contains_key("MISSING"));
}

#[test]
fn outcomes_are_counted_in_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let runtime = runtime(market()).with_metrics(metrics.clone());
    runtime.run(["AAPL", "MISSING"]);

    let exported = metrics.export().unwrap();
    assert!(exported.contains(r#"tickers_analyzed_total{outcome="scored"} 1"#));
    assert!(exported.contains(r#"tickers_analyzed_total{outcome="failed"} 1"#));
}
