//! Category weights and per-category scores

use crate::common::math;
use crate::indicators::registry::IndicatorCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::weights::WeightError;

/// Weight of each category in the final score.
///
/// Raw user input may have any non-negative values; run it through
/// [`WeightValidator`](super::weights::WeightValidator) before scoring so the
/// five weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryWeights {
    #[serde(default)]
    pub momentum: f64,
    #[serde(default)]
    pub trend: f64,
    #[serde(default)]
    pub volatility: f64,
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub support_resistance: f64,
}

impl CategoryWeights {
    pub const MOMENTUM: f64 = 0.20;
    pub const TREND: f64 = 0.30;
    pub const VOLATILITY: f64 = 0.15;
    pub const STRENGTH: f64 = 0.20;
    pub const SUPPORT_RESISTANCE: f64 = 0.15;

    /// Tolerance used when checking that weights sum to 1.0.
    pub const SUM_TOLERANCE: f64 = 0.001;

    pub fn new(
        momentum: f64,
        trend: f64,
        volatility: f64,
        strength: f64,
        support_resistance: f64,
    ) -> Self {
        Self {
            momentum,
            trend,
            volatility,
            strength,
            support_resistance,
        }
    }

    /// All five categories set to the same weight.
    pub fn uniform(weight: f64) -> Self {
        Self::new(weight, weight, weight, weight, weight)
    }

    pub fn get(&self, category: IndicatorCategory) -> f64 {
        match category {
            IndicatorCategory::Momentum => self.momentum,
            IndicatorCategory::Trend => self.trend,
            IndicatorCategory::Volatility => self.volatility,
            IndicatorCategory::Strength => self.strength,
            IndicatorCategory::SupportResistance => self.support_resistance,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorCategory, f64)> + '_ {
        IndicatorCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Verify weights sum to 1.0
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= Self::SUM_TOLERANCE
    }

    /// Every weight divided by `divisor`.
    pub fn scaled(&self, divisor: f64) -> Self {
        Self::new(
            self.momentum / divisor,
            self.trend / divisor,
            self.volatility / divisor,
            self.strength / divisor,
            self.support_resistance / divisor,
        )
    }

    /// Build from a `category name -> weight` map. Missing categories weigh
    /// zero; unknown names are rejected.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, WeightError> {
        let mut weights = Self::uniform(0.0);
        for (name, &value) in map {
            let category = IndicatorCategory::parse(name)
                .ok_or_else(|| WeightError::UnknownCategory(name.clone()))?;
            match category {
                IndicatorCategory::Momentum => weights.momentum = value,
                IndicatorCategory::Trend => weights.trend = value,
                IndicatorCategory::Volatility => weights.volatility = value,
                IndicatorCategory::Strength => weights.strength = value,
                IndicatorCategory::SupportResistance => weights.support_resistance = value,
            }
        }
        Ok(weights)
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(c, w)| (c.as_str().to_string(), w))
            .collect()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::new(
            Self::MOMENTUM,
            Self::TREND,
            Self::VOLATILITY,
            Self::STRENGTH,
            Self::SUPPORT_RESISTANCE,
        )
    }
}

/// Mean normalized score of each category, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub momentum: f64,
    pub trend: f64,
    pub volatility: f64,
    pub strength: f64,
    pub support_resistance: f64,
}

impl CategoryScores {
    pub fn get(&self, category: IndicatorCategory) -> f64 {
        match category {
            IndicatorCategory::Momentum => self.momentum,
            IndicatorCategory::Trend => self.trend,
            IndicatorCategory::Volatility => self.volatility,
            IndicatorCategory::Strength => self.strength,
            IndicatorCategory::SupportResistance => self.support_resistance,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorCategory, f64)> + '_ {
        IndicatorCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, score)| score.is_finite())
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            momentum: math::round_to(self.momentum, decimals),
            trend: math::round_to(self.trend, decimals),
            volatility: math::round_to(self.volatility, decimals),
            strength: math::round_to(self.strength, decimals),
            support_resistance: math::round_to(self.support_resistance, decimals),
        }
    }
}

impl FromIterator<(IndicatorCategory, f64)> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = (IndicatorCategory, f64)>>(iter: I) -> Self {
        let mut scores = Self::default();
        for (category, score) in iter {
            match category {
                IndicatorCategory::Momentum => scores.momentum = score,
                IndicatorCategory::Trend => scores.trend = score,
                IndicatorCategory::Volatility => scores.volatility = score,
                IndicatorCategory::Strength => scores.strength = score,
                IndicatorCategory::SupportResistance => scores.support_resistance = score,
            }
        }
        scores
    }
}
