//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// True range of every bar after the first.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|w| math::true_range(w[1].high, w[1].low, w[0].close))
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility by averaging true range over a period,
/// using Wilder's smoothing.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }
    math::wilder_series(&true_ranges(candles), period)
        .last()
        .copied()
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, 14)
}

/// ATR as a percentage of price.
pub fn atr_percent(atr: f64, price: f64) -> f64 {
    if price > 0.0 {
        atr / price * 100.0
    } else {
        0.0
    }
}
