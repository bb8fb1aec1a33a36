//! High/low range statistics of recent bars

use crate::common::math;
use crate::models::indicators::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStats {
    /// Mean high-low range over the lookback.
    pub average_range: f64,
    /// High-low range of the last bar.
    pub current_range: f64,
    /// Where the last close sits in the last bar's range, 0 (low) to 1 (high).
    pub position_in_range: f64,
    /// Current range over average range.
    pub volatility_ratio: f64,
}

/// Range statistics over the last `lookback` bars.
///
/// A bar with no range puts the close at the midpoint (0.5); an average range
/// of zero gives a neutral ratio of 1.0.
pub fn calculate_range_stats(candles: &[Candle], lookback: usize) -> Option<RangeStats> {
    if lookback == 0 || candles.len() < lookback {
        return None;
    }

    let ranges: Vec<f64> = candles[candles.len() - lookback..]
        .iter()
        .map(Candle::range)
        .collect();
    let average_range = math::mean(&ranges)?;
    let last = candles.last()?;
    let current_range = last.range();

    let position_in_range = if current_range > 0.0 {
        (last.close - last.low) / current_range
    } else {
        0.5
    };
    let volatility_ratio = if average_range > 0.0 {
        current_range / average_range
    } else {
        1.0
    };

    Some(RangeStats {
        average_range,
        current_range,
        position_in_range,
        volatility_ratio,
    })
}
