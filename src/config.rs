//! Environment-driven configuration

use std::collections::HashMap;
use std::env;
use tracing::warn;

use crate::signals::categories::CategoryWeights;
use crate::signals::decision::SignalThresholds;
use crate::signals::engine::ScoringConfig;
use crate::signals::weights::WeightValidator;

pub const DEFAULT_ENVIRONMENT: &str = "sandbox";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HISTORY_BARS: usize = 365;

pub const WEIGHTS_VAR: &str = "BTOCK_WEIGHTS";
pub const BUY_THRESHOLD_VAR: &str = "BTOCK_BUY_THRESHOLD";
pub const SELL_THRESHOLD_VAR: &str = "BTOCK_SELL_THRESHOLD";

/// Deployment environment name (`ENVIRONMENT`), lower-cased.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.trim().to_lowercase())
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Connection string for the results database. Persistence is disabled when unset.
pub fn get_database_url() -> Option<String> {
    env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
}

impl ScoringConfig {
    /// Defaults overridden by `BTOCK_WEIGHTS`, `BTOCK_BUY_THRESHOLD` and
    /// `BTOCK_SELL_THRESHOLD`. Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let weights = env::var(WEIGHTS_VAR)
            .ok()
            .map(|raw| parse_weights(&raw))
            .unwrap_or_default();

        let mut thresholds = SignalThresholds::default();
        let buy = threshold_var(BUY_THRESHOLD_VAR).unwrap_or(thresholds.buy());
        let sell = threshold_var(SELL_THRESHOLD_VAR).unwrap_or(thresholds.sell());
        thresholds.set(buy, sell);

        Self { weights, thresholds }
    }
}

/// JSON object of category to weight, validated and normalized.
fn parse_weights(raw: &str) -> CategoryWeights {
    let map: HashMap<String, f64> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            warn!(var = WEIGHTS_VAR, error = %e, "weights are not a JSON object of numbers, using defaults");
            return CategoryWeights::default();
        }
    };

    match CategoryWeights::from_map(&map).and_then(|w| WeightValidator::normalize(&w)) {
        Ok(weights) => weights,
        Err(e) => {
            warn!(var = WEIGHTS_VAR, error = %e, "invalid weights, using defaults");
            CategoryWeights::default()
        }
    }
}

fn threshold_var(name: &str) -> Option<f64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "threshold is not a number, ignoring");
            None
        }
    }
}

/// Settings for a batch analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeConfig {
    /// Daily bars requested per ticker.
    pub history_bars: usize,
    pub scoring: ScoringConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            history_bars: DEFAULT_HISTORY_BARS,
            scoring: ScoringConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            history_bars: DEFAULT_HISTORY_BARS,
            scoring: ScoringConfig::from_env(),
        }
    }
}
