//! Simple and exponential moving averages of the close

use crate::common::math;
use crate::models::indicators::Candle;

fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn calculate_sma(candles: &[Candle], period: usize) -> Option<f64> {
    math::sma(&closes(candles), period)
}

pub fn calculate_ema(candles: &[Candle], period: usize) -> Option<f64> {
    math::ema(&closes(candles), period)
}

/// Percentage distance of `price` above (+) or below (-) a moving average.
pub fn price_vs_ma(price: f64, moving_average: f64) -> Option<f64> {
    math::percent_change(price, moving_average)
}
