//! Unit tests for momentum indicators

use btock::indicators::momentum::*;

use crate::support::*;

#[test]
fn rsi_insufficient_data() {
    let candles = rising_candles(10, 100.0, 1.0);
    assert!(calculate_rsi_default(&candles).is_none());
}

#[test]
fn rsi_of_uptrend_is_100() {
    let candles = rising_candles(30, 100.0, 1.0);
    assert_eq!(calculate_rsi_default(&candles), Some(100.0));
}

#[test]
fn rsi_of_downtrend_is_0() {
    let candles = falling_candles(30, 200.0, 1.0);
    assert_eq!(calculate_rsi_default(&candles), Some(0.0));
}

#[test]
fn rsi_of_flat_series_is_neutral() {
    let candles = flat_candles(30, 50.0);
    assert_eq!(calculate_rsi_default(&candles), Some(50.0));
}

#[test]
fn rsi_stays_in_range_for_mixed_moves() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0).collect();
    let series = rsi_series(&closes, 14);
    assert_eq!(series.len(), closes.len() - 14);
    assert!(series.iter().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn stochastic_closing_on_high_is_100() {
    let candles = closing_on_high(30, 100.0, 1.0);
    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert_close(stoch.k, 100.0);
    assert_close(stoch.d, 100.0);
}

#[test]
fn stochastic_without_range_is_midpoint() {
    let candles = flat_candles(30, 10.0);
    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert_eq!(stoch.k, 50.0);
    assert_eq!(stoch.d, 50.0);
}

#[test]
fn stochastic_rsi_of_saturated_rsi_is_midpoint() {
    // RSI pinned at 100 has no range for the stochastic window.
    let candles = rising_candles(60, 100.0, 1.0);
    let stoch_rsi = calculate_stochastic_rsi(&candles, 14, 14, 3).unwrap();
    assert_eq!(stoch_rsi.k, 50.0);
    assert_eq!(stoch_rsi.d, 50.0);
}

#[test]
fn stochastic_rsi_needs_rsi_history() {
    let candles = rising_candles(20, 100.0, 1.0);
    assert!(calculate_stochastic_rsi(&candles, 14, 14, 3).is_none());
}

#[test]
fn williams_r_extremes() {
    let at_high = closing_on_high(20, 100.0, 1.0);
    assert_close(calculate_williams_r(&at_high, 14).unwrap(), 0.0);

    let mut at_low = closing_on_high(20, 100.0, 1.0);
    let last = at_low.last_mut().unwrap();
    last.close = 80.0;
    last.low = 80.0;
    assert_close(calculate_williams_r(&at_low, 14).unwrap(), -100.0);

    assert_eq!(calculate_williams_r(&flat_candles(20, 5.0), 14), Some(-50.0));
    assert!(calculate_williams_r(&flat_candles(5, 5.0), 14).is_none());
}

#[test]
fn roc_is_percent_change_over_period() {
    let candles = rising_candles(20, 100.0, 1.0);
    let roc = calculate_roc(&candles, 12).unwrap();
    assert_close(roc, (119.0 - 107.0) / 107.0 * 100.0);
    assert!(calculate_roc(&candles[..12], 12).is_none());
}

#[test]
fn ultimate_oscillator_of_bars_closing_on_high_is_100() {
    let candles = closing_on_high(40, 100.0, 1.0);
    let uo = calculate_ultimate_oscillator(&candles, [7, 14, 28]).unwrap();
    assert_close(uo, 100.0);
}

#[test]
fn ultimate_oscillator_without_range_is_undefined() {
    let candles = flat_candles(40, 100.0);
    assert!(calculate_ultimate_oscillator(&candles, [7, 14, 28]).is_none());
    assert!(calculate_ultimate_oscillator(&candles[..20], [7, 14, 28]).is_none());
}
