//! BUY/HOLD/SELL classification

use serde::{Deserialize, Serialize};

use crate::models::signal::Signal;

/// Score cut-offs for BUY and SELL. Always `sell < buy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawThresholds")]
pub struct SignalThresholds {
    buy: f64,
    sell: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
    #[serde(alias = "buy_threshold")]
    buy: f64,
    #[serde(alias = "sell_threshold")]
    sell: f64,
}

impl From<RawThresholds> for SignalThresholds {
    fn from(raw: RawThresholds) -> Self {
        Self::new(raw.buy, raw.sell)
    }
}

impl SignalThresholds {
    pub const DEFAULT_BUY: f64 = 0.5;
    pub const DEFAULT_SELL: f64 = -0.5;
    /// Gap enforced below `buy` when `sell` would not be strictly lower.
    pub const MIN_GAP: f64 = 0.1;

    /// Clamp both thresholds to `[-1, 1]` and push `sell` below `buy` when needed.
    pub fn new(buy: f64, sell: f64) -> Self {
        let mut thresholds = Self::default();
        thresholds.set(buy, sell);
        thresholds
    }

    pub fn set(&mut self, buy: f64, sell: f64) {
        let buy = if buy.is_nan() { self.buy } else { buy };
        let sell = if sell.is_nan() { self.sell } else { sell };

        self.buy = buy.clamp(-1.0, 1.0);
        self.sell = sell.clamp(-1.0, 1.0);
        if self.sell >= self.buy {
            self.sell = self.buy - Self::MIN_GAP;
        }
    }

    pub fn buy(&self) -> f64 {
        self.buy
    }

    pub fn sell(&self) -> f64 {
        self.sell
    }

    pub fn classify(&self, final_score: f64) -> Signal {
        classify(final_score, self.buy, self.sell)
    }
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy: Self::DEFAULT_BUY,
            sell: Self::DEFAULT_SELL,
        }
    }
}

/// Both boundaries are inclusive.
pub fn classify(final_score: f64, buy_threshold: f64, sell_threshold: f64) -> Signal {
    if final_score >= buy_threshold {
        Signal::Buy
    } else if final_score <= sell_threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}
