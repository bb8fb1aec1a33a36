//! Elder bull/bear power

use crate::indicators::trend::moving_average::calculate_ema;
use crate::models::indicators::Candle;

/// Bull power = High - EMA, bear power = Low - EMA, on the last bar.
pub fn calculate_elder_power(candles: &[Candle], period: usize) -> Option<(f64, f64)> {
    let ema = calculate_ema(candles, period)?;
    let last = candles.last()?;
    Some((last.high - ema, last.low - ema))
}
