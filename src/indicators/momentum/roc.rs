//! ROC (Rate of Change) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Percentage change of the close over `period` bars
pub fn calculate_roc(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() <= period {
        return None;
    }
    let current = candles.last()?.close;
    let base = candles[candles.len() - 1 - period].close;
    math::percent_change(current, base)
}
