//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// RSI series using Wilder's smoothing of gains and losses.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period + 1 {
        return Vec::new();
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = changes.iter().map(|c| c.max(0.0)).collect();
    let losses: Vec<f64> = changes.iter().map(|c| (-c).max(0.0)).collect();

    let avg_gains = math::wilder_series(&gains, period);
    let avg_losses = math::wilder_series(&losses, period);

    avg_gains
        .iter()
        .zip(&avg_losses)
        .map(|(&gain, &loss)| rsi_from_averages(gain, loss))
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // Flat series has no direction.
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate the latest RSI value
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    rsi_series(&closes, period).last().copied()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}
