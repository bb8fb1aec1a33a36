//! Ultimate Oscillator

use crate::models::indicators::Candle;

const WEIGHTS: [f64; 3] = [4.0, 2.0, 1.0];

/// Ultimate Oscillator over three lookbacks (typically 7, 14, 28)
///
/// BP = Close - min(Low, Previous Close)
/// TR = max(High, Previous Close) - min(Low, Previous Close)
/// UO = 100 * (4 * Avg(short) + 2 * Avg(medium) + Avg(long)) / 7
pub fn calculate_ultimate_oscillator(candles: &[Candle], periods: [usize; 3]) -> Option<f64> {
    let longest = periods.into_iter().max()?;
    if periods.contains(&0) || candles.len() < longest + 1 {
        return None;
    }

    let (buying_pressure, true_ranges): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|w| {
            let prev_close = w[0].close;
            let bar = &w[1];
            let floor = bar.low.min(prev_close);
            let ceiling = bar.high.max(prev_close);
            (bar.close - floor, ceiling - floor)
        })
        .unzip();

    let mut weighted = 0.0;
    for (period, weight) in periods.into_iter().zip(WEIGHTS) {
        let start = true_ranges.len() - period;
        let bp_sum: f64 = buying_pressure[start..].iter().sum();
        let tr_sum: f64 = true_ranges[start..].iter().sum();
        if tr_sum <= 0.0 {
            return None;
        }
        weighted += weight * bp_sum / tr_sum;
    }

    Some(100.0 * weighted / WEIGHTS.iter().sum::<f64>())
}
