//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::{Candle, MacdIndicator};

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Option<MacdIndicator> {
    if fast_period >= slow_period || candles.len() < slow_period + signal_period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = math::ema_series(&closes, fast_period);
    let slow = math::ema_series(&closes, slow_period);
    if slow.is_empty() || fast.len() < slow.len() {
        return None;
    }

    let offset = fast.len() - slow.len();
    let macd_values: Vec<f64> = fast[offset..]
        .iter()
        .zip(&slow)
        .map(|(f, s)| f - s)
        .collect();

    let macd = *macd_values.last()?;
    let signal = math::ema(&macd_values, signal_period)?;

    Some(MacdIndicator {
        macd,
        signal,
        histogram: macd - signal,
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}
