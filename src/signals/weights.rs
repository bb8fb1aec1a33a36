//! Weight validation and normalization

use crate::indicators::registry::IndicatorCategory;
use thiserror::Error;
use tracing::{info, warn};

use super::categories::CategoryWeights;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("weight for {category} cannot be negative (got {value})")]
    Negative {
        category: IndicatorCategory,
        value: f64,
    },
    #[error("weight for {0} is not a finite number")]
    NonFinite(IndicatorCategory),
    #[error("total weight cannot be zero, assign at least one positive weight")]
    ZeroTotal,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

pub struct WeightValidator;

impl WeightValidator {
    /// Rescale `weights` so they sum to 1.0.
    ///
    /// Rejects negative or non-finite entries and an all-zero vector. Weights
    /// that already sum to exactly 1.0 (within rounding) are returned as-is.
    pub fn normalize(weights: &CategoryWeights) -> Result<CategoryWeights, WeightError> {
        for (category, value) in weights.iter() {
            if !value.is_finite() {
                return Err(WeightError::NonFinite(category));
            }
            if value < 0.0 {
                return Err(WeightError::Negative { category, value });
            }
        }

        let total = weights.total();
        if total == 0.0 {
            return Err(WeightError::ZeroTotal);
        }
        if (total - 1.0).abs() <= 1e-12 {
            return Ok(*weights);
        }
        if (total - 1.0).abs() > CategoryWeights::SUM_TOLERANCE {
            info!(total, "normalizing category weights to 1.0");
        }
        Ok(weights.scaled(total))
    }

    /// Returns `(normalized, true)` on success, `(weights unchanged, false)` otherwise.
    pub fn validate_and_normalize(weights: &CategoryWeights) -> (CategoryWeights, bool) {
        match Self::normalize(weights) {
            Ok(normalized) => (normalized, true),
            Err(e) => {
                warn!(error = %e, "rejected category weights");
                (*weights, false)
            }
        }
    }

    pub fn default_weights() -> CategoryWeights {
        CategoryWeights::default()
    }
}
