//! Unit tests for the full indicator calculator

use btock::indicators::calculator::IndicatorCalculator;
use btock::indicators::registry::names::*;
use btock::indicators::registry::IndicatorCategory;
use btock::indicators::IndicatorError;

use crate::support::*;

const PIVOT_KEYS: [&str; 19] = [
    PIVOT_CLASSIC,
    R1_CLASSIC,
    S1_CLASSIC,
    R2_CLASSIC,
    S2_CLASSIC,
    PIVOT_FIBONACCI,
    R1_FIBONACCI,
    S1_FIBONACCI,
    R2_FIBONACCI,
    S2_FIBONACCI,
    R1_CAMARILLA,
    S1_CAMARILLA,
    R2_CAMARILLA,
    S2_CAMARILLA,
    PIVOT_WOODIE,
    R1_WOODIE,
    S1_WOODIE,
    PIVOT_DEMARK,
    R1_DEMARK,
];

#[test]
fn requires_minimum_history() {
    let candles = rising_candles(150, 100.0, 0.5);
    let err = IndicatorCalculator::calculate_all(&candles).unwrap_err();
    assert_eq!(
        err,
        IndicatorError::InsufficientData {
            needed: 200,
            available: 150
        }
    );
}

#[test]
fn rejects_malformed_candles() {
    let mut candles = rising_candles(220, 100.0, 0.5);
    candles[10].low = candles[10].high + 1.0;
    let err = IndicatorCalculator::calculate_all(&candles).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidCandle { index: 10, .. }));
}

#[test]
fn produces_every_scored_and_auxiliary_indicator() {
    let candles = rising_candles(250, 100.0, 0.5);
    let indicators = IndicatorCalculator::calculate_all(&candles).unwrap();

    for category in IndicatorCategory::ALL {
        for name in category.members() {
            assert!(indicators.contains(name), "missing {name}");
        }
    }
    for name in PIVOT_KEYS.iter().chain(&[S1_DEMARK, MA5, MA10, MA20, MA50, MA200, ATR, DI_PLUS, DI_MINUS]) {
        assert!(indicators.contains(name), "missing {name}");
    }
    assert!(indicators.iter().all(|(_, v)| v.is_finite()));
}

#[test]
fn uptrend_reads_bullish() {
    let candles = rising_candles(250, 100.0, 0.5);
    let indicators = IndicatorCalculator::calculate_all(&candles).unwrap();
    let price = candles.last().unwrap().close;

    assert_eq!(indicators.get(RSI), Some(100.0));
    assert!(indicators.get(MACD).unwrap() > 0.0);
    assert!(indicators.get(PRICE_VS_MA200).unwrap() > 0.0);
    assert!(indicators.get(MA5).unwrap() > indicators.get(MA200).unwrap());
    assert!(indicators.get(DI_PLUS).unwrap() > indicators.get(DI_MINUS).unwrap());
    assert_close(indicators.get(PIVOT_CLASSIC).unwrap(), {
        let last = candles.last().unwrap();
        (last.high + last.low + last.close) / 3.0
    });
    assert!(indicators.get(ATR_PERCENT).unwrap() > 0.0);
    assert!(price > 0.0);
}

#[test]
fn flat_history_falls_back_to_neutral_values() {
    let candles = flat_candles(220, 50.0);
    let indicators = IndicatorCalculator::calculate_all(&candles).unwrap();

    assert_eq!(indicators.get(RSI), Some(50.0));
    assert_eq!(indicators.get(STOCH_K), Some(50.0));
    assert_eq!(indicators.get(WILLIAMS_R), Some(-50.0));
    // No range at all: the oscillator is undefined and takes its default.
    assert_eq!(indicators.get(ULTIMATE_OSCILLATOR), Some(50.0));
    assert_eq!(indicators.get(ROC), Some(0.0));
    assert_eq!(indicators.get(PRICE_POSITION_IN_RANGE), Some(0.5));
    assert_eq!(indicators.get(VOLATILITY_RATIO), Some(1.0));
    assert_eq!(indicators.get(ATR_PERCENT), Some(0.0));
    assert_eq!(indicators.get(CCI), Some(0.0));
    assert_eq!(indicators.get(DIRECTIONAL_STRENGTH), Some(0.0));
    assert_close(indicators.get(MA200).unwrap(), 50.0);
    assert_eq!(indicators.get(NEAREST_PIVOT_DISTANCE), Some(0.0));
    assert_eq!(indicators.get(PIVOT_POSITION_CLASSIC), Some(-0.5));
}
