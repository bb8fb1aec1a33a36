//! Category-based aggregation logic

use serde::{Deserialize, Serialize};

use crate::indicators::registry::IndicatorCategory;
use crate::models::indicators::IndicatorSet;
use crate::signals::categories::{CategoryScores, CategoryWeights};
use crate::signals::scoring::normalize_indicator;

/// Normalized score of one category member, kept for breakdowns and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub name: String,
    pub category: IndicatorCategory,
    pub raw_value: f64,
    pub score: f64,
}

/// Aggregate scores by category
pub struct Aggregator;

impl Aggregator {
    /// Mean normalized score over the category members present in `indicators`.
    ///
    /// Absent members are skipped rather than counted as zero; a category with
    /// no members present scores 0.0.
    pub fn score_category(indicators: &IndicatorSet, category: IndicatorCategory) -> f64 {
        let (sum, count) = category
            .members()
            .iter()
            .filter_map(|&name| indicators.get(name).map(|v| normalize_indicator(name, v)))
            .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn category_scores(indicators: &IndicatorSet) -> CategoryScores {
        IndicatorCategory::ALL
            .into_iter()
            .map(|category| (category, Self::score_category(indicators, category)))
            .collect()
    }

    /// Every present category member with its normalized score, in category order.
    pub fn indicator_scores(indicators: &IndicatorSet) -> Vec<IndicatorScore> {
        IndicatorCategory::ALL
            .into_iter()
            .flat_map(|category| {
                category.members().iter().filter_map(move |&name| {
                    indicators.get(name).map(|raw_value| IndicatorScore {
                        name: name.to_string(),
                        category,
                        raw_value,
                        score: normalize_indicator(name, raw_value),
                    })
                })
            })
            .collect()
    }

    /// Weighted sum of category scores, clamped to `[-1, 1]`.
    ///
    /// Weights that do not sum to 1.0 are rescaled first; all-zero weights
    /// give 0.0.
    pub fn calculate_final_score(scores: &CategoryScores, weights: &CategoryWeights) -> f64 {
        let total = weights.total();
        if total == 0.0 {
            return 0.0;
        }
        let weights = if weights.is_normalized() {
            *weights
        } else {
            weights.scaled(total)
        };

        let score: f64 = IndicatorCategory::ALL
            .into_iter()
            .map(|category| scores.get(category) * weights.get(category))
            .sum();

        if score.is_nan() {
            return 0.0;
        }
        score.clamp(-1.0, 1.0)
    }
}
