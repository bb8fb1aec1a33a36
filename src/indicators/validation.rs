//! Input checks applied before indicators are computed

use crate::indicators::error::IndicatorError;
use crate::models::indicators::Candle;

pub fn validate_price(price: f64) -> Result<(), IndicatorError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(IndicatorError::InvalidValue {
            name: "price".to_string(),
            value: price,
        });
    }
    Ok(())
}

pub fn validate_candle(index: usize, candle: &Candle) -> Result<(), IndicatorError> {
    let invalid = |reason: &str| IndicatorError::InvalidCandle {
        index,
        reason: reason.to_string(),
    };

    let prices = [candle.open, candle.high, candle.low, candle.close];
    if prices.iter().any(|p| !p.is_finite()) || !candle.volume.is_finite() {
        return Err(invalid("non-finite value"));
    }
    if prices.iter().any(|&p| p <= 0.0) {
        return Err(invalid("prices must be positive"));
    }
    if candle.high < candle.low {
        return Err(invalid("high is below low"));
    }
    if candle.volume < 0.0 {
        return Err(invalid("negative volume"));
    }
    Ok(())
}

/// Enough bars, each of them well-formed.
pub fn validate_candles(candles: &[Candle], min_bars: usize) -> Result<(), IndicatorError> {
    if candles.len() < min_bars {
        return Err(IndicatorError::InsufficientData {
            needed: min_bars,
            available: candles.len(),
        });
    }
    candles
        .iter()
        .enumerate()
        .try_for_each(|(index, candle)| validate_candle(index, candle))
}
