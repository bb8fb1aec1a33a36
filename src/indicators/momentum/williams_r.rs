//! Williams %R indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Williams %R on its -100..0 scale
///
/// %R = -100 * (Highest High - Close) / (Highest High - Lowest Low)
pub fn calculate_williams_r(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let window = &candles[candles.len() - period..];
    let highs: Vec<f64> = window.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = window.iter().map(|c| c.low).collect();
    let highest = math::highest(&highs)?;
    let lowest = math::lowest(&lows)?;
    let close = window.last()?.close;

    let range = highest - lowest;
    if range <= 0.0 {
        return Some(-50.0);
    }
    Some(-100.0 * (highest - close) / range)
}
