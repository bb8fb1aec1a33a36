//! Analysis session: one batch run over a list of tickers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::common::math;
use crate::models::signal::{AnalysisResult, Signal};
use crate::signals::aggregation::IndicatorScore;
use crate::signals::categories::CategoryWeights;
use crate::signals::decision::SignalThresholds;

pub const SESSION_ID_LEN: usize = 8;

/// Short random identifier, the first eight characters of a v4 UUID.
pub fn generate_session_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(SESSION_ID_LEN);
    id
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Completed,
    /// Stopped before every ticker was analyzed.
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub weights: CategoryWeights,
    pub thresholds: SignalThresholds,
    #[serde(default)]
    pub status: SessionStatus,
    pub results: Vec<AnalysisResult>,
    /// Per-ticker indicator breakdown of the scored results.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indicator_scores: BTreeMap<String, Vec<IndicatorScore>>,
}

impl AnalysisSession {
    pub fn new(weights: CategoryWeights, thresholds: SignalThresholds) -> Self {
        Self {
            session_id: generate_session_id(),
            created_at: Utc::now(),
            weights,
            thresholds,
            status: SessionStatus::Completed,
            results: Vec::new(),
            indicator_scores: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, result: AnalysisResult) {
        self.results.push(result);
    }

    pub fn push_with_breakdown(&mut self, result: AnalysisResult, scores: Vec<IndicatorScore>) {
        self.indicator_scores.insert(result.ticker.clone(), scores);
        self.results.push(result);
    }

    pub fn successful(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn summary(&self) -> SessionSummary {
        let total_tickers = self.results.len();
        let successful_tickers = self.successful().count();
        let success_rate = if total_tickers > 0 {
            successful_tickers as f64 / total_tickers as f64 * 100.0
        } else {
            0.0
        };

        SessionSummary {
            session_id: self.session_id.clone(),
            created_at: self.created_at,
            weights: self.weights,
            total_tickers,
            successful_tickers,
            success_rate,
        }
    }

    pub fn stats(&self) -> SummaryStats {
        SummaryStats::from_results(&self.results)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub weights: CategoryWeights,
    pub total_tickers: usize,
    pub successful_tickers: usize,
    /// Percentage, 0 when the session is empty.
    pub success_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDistribution {
    #[serde(rename = "BUY")]
    pub buy: usize,
    #[serde(rename = "HOLD")]
    pub hold: usize,
    #[serde(rename = "SELL")]
    pub sell: usize,
}

impl SignalDistribution {
    pub fn count(&self, signal: Signal) -> usize {
        match signal {
            Signal::Buy => self.buy,
            Signal::Hold => self.hold,
            Signal::Sell => self.sell,
        }
    }
}

impl FromIterator<Signal> for SignalDistribution {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut dist, signal| {
            match signal {
                Signal::Buy => dist.buy += 1,
                Signal::Hold => dist.hold += 1,
                Signal::Sell => dist.sell += 1,
            }
            dist
        })
    }
}

/// Final score statistics; `std` is the population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ScoreStats {
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        Some(Self {
            mean: math::mean(scores)?,
            median: math::median(scores)?,
            std: math::std_dev(scores)?,
            min: math::lowest(scores)?,
            max: math::highest(scores)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_analyzed: usize,
    pub successful: usize,
    pub errors: usize,
    pub signal_distribution: SignalDistribution,
    /// Absent when no result succeeded.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score_stats: Option<ScoreStats>,
}

impl SummaryStats {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let successful: Vec<&AnalysisResult> = results.iter().filter(|r| r.is_success()).collect();
        let scores: Vec<f64> = successful.iter().filter_map(|r| r.final_score()).collect();

        Self {
            total_analyzed: results.len(),
            successful: successful.len(),
            errors: results.len() - successful.len(),
            signal_distribution: successful.iter().filter_map(|r| r.signal()).collect(),
            score_stats: ScoreStats::from_scores(&scores),
        }
    }
}
