//! Stochastic oscillator and Stochastic RSI

use crate::common::math;
use crate::indicators::momentum::rsi::rsi_series;
use crate::models::indicators::{Candle, StochasticIndicator};

/// %K series: position of the close inside the rolling high/low window, 0..100.
///
/// A window with no range reports the midpoint (50).
pub fn stochastic_k_series(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let len = closes.len().min(highs.len()).min(lows.len());
    if period == 0 || len < period {
        return Vec::new();
    }

    (period - 1..len)
        .filter_map(|i| {
            let start = i + 1 - period;
            let highest = math::highest(&highs[start..=i])?;
            let lowest = math::lowest(&lows[start..=i])?;
            let range = highest - lowest;
            Some(if range > 0.0 {
                100.0 * (closes[i] - lowest) / range
            } else {
                50.0
            })
        })
        .collect()
}

fn stochastic_from_k(k_series: &[f64], smooth: usize) -> Option<StochasticIndicator> {
    let k = *k_series.last()?;
    let d = math::sma(k_series, smooth)?;
    Some(StochasticIndicator { k, d })
}

/// Calculate Stochastic %K and %D (SMA of %K)
pub fn calculate_stochastic(
    candles: &[Candle],
    period: usize,
    smooth: usize,
) -> Option<StochasticIndicator> {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let k_series = stochastic_k_series(&highs, &lows, &closes, period);
    stochastic_from_k(&k_series, smooth)
}

/// Stochastic oscillator applied to the RSI series instead of prices
pub fn calculate_stochastic_rsi(
    candles: &[Candle],
    rsi_period: usize,
    period: usize,
    smooth: usize,
) -> Option<StochasticIndicator> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let rsi = rsi_series(&closes, rsi_period);
    let k_series = stochastic_k_series(&rsi, &rsi, &rsi, period);
    stochastic_from_k(&k_series, smooth)
}
