//! CCI (Commodity Channel Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

const CCI_CONSTANT: f64 = 0.015;

/// CCI = (TP - SMA(TP)) / (0.015 * Mean Deviation), TP = (H + L + C) / 3
pub fn calculate_cci(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let typical: Vec<f64> = candles[candles.len() - period..]
        .iter()
        .map(|c| (c.high + c.low + c.close) / 3.0)
        .collect();
    let average = math::mean(&typical)?;
    let mean_deviation = typical.iter().map(|tp| (tp - average).abs()).sum::<f64>() / period as f64;
    let current = *typical.last()?;

    if mean_deviation == 0.0 {
        return Some(0.0);
    }
    Some((current - average) / (CCI_CONSTANT * mean_deviation))
}
