//! Batch analysis over a list of tickers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::common::math;
use crate::config::RuntimeConfig;
use crate::indicators::calculator::IndicatorCalculator;
use crate::indicators::validation::validate_price;
use crate::metrics::Metrics;
use crate::models::session::{AnalysisSession, SessionStatus};
use crate::models::signal::AnalysisResult;
use crate::models::ticker::unique_tickers;
use crate::services::market_data::MarketDataProvider;
use crate::signals::aggregation::{Aggregator, IndicatorScore};
use crate::signals::categories::CategoryWeights;
use crate::signals::engine::ScoringEngine;
use crate::signals::weights::WeightValidator;

pub const NO_DATA_MESSAGE: &str = "No data available";
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient data for analysis";
pub const PRICE_DECIMALS: i32 = 2;

/// Runs the scoring pipeline over tickers one at a time, in input order.
///
/// A ticker that cannot be analyzed becomes an error row; it never aborts the run.
pub struct AnalysisRuntime {
    config: RuntimeConfig,
    weights: CategoryWeights,
    engine: ScoringEngine,
    provider: Arc<dyn MarketDataProvider>,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisRuntime {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        let weights = match WeightValidator::normalize(&config.scoring.weights) {
            Ok(weights) => weights,
            Err(e) => {
                warn!(error = %e, "configured weights rejected, using defaults");
                CategoryWeights::default()
            }
        };

        Self {
            config,
            weights,
            engine: ScoringEngine::new(config.scoring.thresholds),
            provider,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Normalized weights actually used for scoring.
    pub fn weights(&self) -> CategoryWeights {
        self.weights
    }

    pub fn run<I, S>(&self, tickers: I) -> AnalysisSession
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_cancel(tickers, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but stops before the next ticker once `cancel`
    /// is set. Results collected so far are kept.
    pub fn run_with_cancel<I, S>(&self, tickers: I, cancel: &AtomicBool) -> AnalysisSession
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tickers = unique_tickers(tickers);
        let mut session = AnalysisSession::new(self.weights, self.engine.thresholds());
        info!(
            session_id = %session.session_id,
            tickers = tickers.len(),
            "starting analysis session"
        );

        for ticker in &tickers {
            if cancel.load(Ordering::SeqCst) {
                warn!(
                    session_id = %session.session_id,
                    analyzed = session.results.len(),
                    remaining = tickers.len() - session.results.len(),
                    "analysis cancelled"
                );
                session.status = SessionStatus::Cancelled;
                break;
            }

            let (result, breakdown) = self.analyze_one(ticker);
            self.record(&result);
            match breakdown {
                Some(scores) => session.push_with_breakdown(result, scores),
                None => session.push(result),
            }
        }

        let summary = session.summary();
        info!(
            session_id = %summary.session_id,
            total = summary.total_tickers,
            successful = summary.successful_tickers,
            "analysis session finished"
        );
        session
    }

    /// Fetch, calculate and score a single cleaned ticker.
    pub fn analyze_one(&self, ticker: &str) -> (AnalysisResult, Option<Vec<IndicatorScore>>) {
        let bars = match self.provider.get_daily_bars(ticker, self.config.history_bars) {
            Ok(bars) => bars,
            Err(e) => return (self.failure(ticker, None, format!("Analysis error: {e}")), None),
        };
        let Some(last) = bars.last() else {
            return (self.failure(ticker, None, NO_DATA_MESSAGE), None);
        };

        let current_price = match self.provider.get_latest_price(ticker) {
            Ok(Some(price)) if validate_price(price).is_ok() => price,
            Ok(_) => last.close,
            Err(e) => return (self.failure(ticker, None, format!("Analysis error: {e}")), None),
        };
        let current_price = math::round_to(current_price, PRICE_DECIMALS);

        let indicators = match IndicatorCalculator::calculate_all(&bars) {
            Ok(indicators) => indicators,
            Err(e) => {
                debug!(ticker, error = %e, "indicator calculation failed");
                return (
                    self.failure(ticker, Some(current_price), INSUFFICIENT_DATA_MESSAGE),
                    None,
                );
            }
        };

        let score = self.engine.analyze_ticker(&indicators, &self.weights);
        debug!(
            ticker,
            final_score = score.final_weighted_score,
            signal = %score.signal,
            "ticker analyzed"
        );

        let result = AnalysisResult::scored(
            ticker,
            current_price,
            score.category_scores,
            score.final_weighted_score,
            score.signal,
        );
        (result, Some(Aggregator::indicator_scores(&indicators)))
    }

    fn failure(
        &self,
        ticker: &str,
        current_price: Option<f64>,
        message: impl Into<String>,
    ) -> AnalysisResult {
        let result = AnalysisResult::failed(ticker, current_price, message);
        warn!(ticker, error = result.error_message().unwrap_or_default(), "ticker analysis failed");
        result
    }

    fn record(&self, result: &AnalysisResult) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        match result.signal() {
            Some(signal) => metrics.record_scored(signal),
            None => metrics.record_failed(),
        }
    }
}
