//! Per-ticker scoring pipeline: category scores, final weighted score, signal.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::math;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::Signal;
use crate::signals::aggregation::Aggregator;
use crate::signals::categories::{CategoryScores, CategoryWeights};
use crate::signals::decision::SignalThresholds;

/// Decimal places kept on reported scores.
pub const SCORE_DECIMALS: i32 = 4;

/// Weights and thresholds for one analysis run. Read-only while scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    pub thresholds: SignalThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerScore {
    pub category_scores: CategoryScores,
    pub final_weighted_score: f64,
    pub signal: Signal,
}

impl TickerScore {
    /// All-zero scores with a HOLD signal.
    pub fn neutral() -> Self {
        Self {
            category_scores: CategoryScores::default(),
            final_weighted_score: 0.0,
            signal: Signal::Hold,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    thresholds: SignalThresholds,
}

impl ScoringEngine {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> SignalThresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, buy: f64, sell: f64) {
        self.thresholds.set(buy, sell);
    }

    /// Score one ticker's indicators. Never fails: a non-finite intermediate
    /// result yields [`TickerScore::neutral`].
    pub fn analyze_ticker(&self, indicators: &IndicatorSet, weights: &CategoryWeights) -> TickerScore {
        let category_scores = Aggregator::category_scores(indicators);
        let final_score = Aggregator::calculate_final_score(&category_scores, weights);

        if !category_scores.is_finite() || !final_score.is_finite() {
            warn!(?category_scores, final_score, "non-finite score, falling back to neutral");
            return TickerScore::neutral();
        }

        let final_weighted_score = math::round_to(final_score, SCORE_DECIMALS);
        let signal = self.thresholds.classify(final_weighted_score);
        debug!(final_weighted_score, signal = %signal, "ticker scored");

        TickerScore {
            category_scores: category_scores.rounded(SCORE_DECIMALS),
            final_weighted_score,
            signal,
        }
    }
}
