//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::indicators::volatility::atr::true_ranges;
use crate::models::indicators::{AdxIndicator, Candle};

/// Calculate ADX indicator
///
/// ADX measures trend strength regardless of direction. True range and
/// directional movement are Wilder-smoothed into +DI/-DI, and ADX is the
/// Wilder-smoothed DX series.
pub fn calculate_adx(candles: &[Candle], period: usize) -> Option<AdxIndicator> {
    if period == 0 || candles.len() < 2 * period + 1 {
        return None;
    }

    let (plus_dm, minus_dm): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|w| {
            let up_move = w[1].high - w[0].high;
            let down_move = w[0].low - w[1].low;
            let plus = if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            };
            let minus = if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            };
            (plus, minus)
        })
        .unzip();

    let atr = math::wilder_series(&true_ranges(candles), period);
    let plus_smoothed = math::wilder_series(&plus_dm, period);
    let minus_smoothed = math::wilder_series(&minus_dm, period);

    let directional: Vec<(f64, f64)> = atr
        .iter()
        .zip(plus_smoothed.iter().zip(&minus_smoothed))
        .map(|(&tr, (&plus, &minus))| {
            if tr > 0.0 {
                (100.0 * plus / tr, 100.0 * minus / tr)
            } else {
                (0.0, 0.0)
            }
        })
        .collect();

    let dx: Vec<f64> = directional
        .iter()
        .map(|&(plus_di, minus_di)| {
            let sum = plus_di + minus_di;
            if sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / sum
            } else {
                0.0
            }
        })
        .collect();

    let value = *math::wilder_series(&dx, period).last()?;
    let &(plus_di, minus_di) = directional.last()?;

    Some(AdxIndicator {
        value,
        plus_di,
        minus_di,
    })
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Option<AdxIndicator> {
    calculate_adx(candles, 14)
}

/// |DI+ - DI-| / (DI+ + DI-), 0 when both are zero.
pub fn directional_strength(plus_di: f64, minus_di: f64) -> f64 {
    let sum = plus_di + minus_di;
    if sum > 0.0 {
        (plus_di - minus_di).abs() / sum
    } else {
        0.0
    }
}
