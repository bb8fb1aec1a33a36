use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signals::categories::CategoryScores;
pub use crate::signals::decision::SignalThresholds;

/// Trading recommendation derived from the final weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
        }
    }

    /// Case-insensitive parse of `BUY`, `HOLD` or `SELL`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Signal::Buy),
            "HOLD" => Some(Signal::Hold),
            "SELL" => Some(Signal::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-ticker result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// Either a full score or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Scored {
        current_price: f64,
        category_scores: CategoryScores,
        final_weighted_score: f64,
        signal: Signal,
    },
    Failed {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        current_price: Option<f64>,
        error_message: String,
    },
}

impl AnalysisResult {
    pub fn scored(
        ticker: impl Into<String>,
        current_price: f64,
        category_scores: CategoryScores,
        final_weighted_score: f64,
        signal: Signal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            outcome: AnalysisOutcome::Scored {
                current_price,
                category_scores,
                final_weighted_score,
                signal,
            },
        }
    }

    pub fn failed(
        ticker: impl Into<String>,
        current_price: Option<f64>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            outcome: AnalysisOutcome::Failed {
                current_price,
                error_message: error_message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AnalysisOutcome::Scored { .. })
    }

    pub fn current_price(&self) -> Option<f64> {
        match &self.outcome {
            AnalysisOutcome::Scored { current_price, .. } => Some(*current_price),
            AnalysisOutcome::Failed { current_price, .. } => *current_price,
        }
    }

    pub fn category_scores(&self) -> Option<&CategoryScores> {
        match &self.outcome {
            AnalysisOutcome::Scored {
                category_scores, ..
            } => Some(category_scores),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn final_score(&self) -> Option<f64> {
        match &self.outcome {
            AnalysisOutcome::Scored {
                final_weighted_score,
                ..
            } => Some(*final_weighted_score),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn signal(&self) -> Option<Signal> {
        match &self.outcome {
            AnalysisOutcome::Scored { signal, .. } => Some(*signal),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            AnalysisOutcome::Failed { error_message, .. } => Some(error_message),
            AnalysisOutcome::Scored { .. } => None,
        }
    }
}
