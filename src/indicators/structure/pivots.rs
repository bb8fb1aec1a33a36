//! Pivot point levels from the last bar
//!
//! Five families are computed from the same bar: classic, Fibonacci,
//! Camarilla, Woodie and DeMark.

use serde::{Deserialize, Serialize};

use crate::models::indicators::{Candle, PivotLevels};

const FIB_NEAR: f64 = 0.382;
const FIB_FAR: f64 = 0.618;
const CAMARILLA_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub classic: PivotLevels,
    pub fibonacci: PivotLevels,
    pub camarilla: PivotLevels,
    pub woodie: PivotLevels,
    pub demark: PivotLevels,
}

impl PivotPoints {
    pub fn from_candle(candle: &Candle) -> Self {
        Self {
            classic: classic(candle),
            fibonacci: fibonacci(candle),
            camarilla: camarilla(candle),
            woodie: woodie(candle),
            demark: demark(candle),
        }
    }

    /// Levels placed at fixed offsets around `price`, used when the last bar
    /// cannot produce real levels.
    pub fn around_price(price: f64) -> Self {
        let full = |pivot: Option<f64>| PivotLevels {
            pivot,
            r1: price * 1.01,
            s1: price * 0.99,
            r2: Some(price * 1.02),
            s2: Some(price * 0.98),
        };
        let pair = PivotLevels {
            pivot: Some(price),
            r1: price * 1.01,
            s1: price * 0.99,
            r2: None,
            s2: None,
        };

        Self {
            classic: full(Some(price)),
            fibonacci: full(Some(price)),
            camarilla: PivotLevels {
                pivot: None,
                r1: price * 1.005,
                s1: price * 0.995,
                r2: Some(price * 1.01),
                s2: Some(price * 0.99),
            },
            woodie: pair,
            demark: pair,
        }
    }
}

pub fn classic(candle: &Candle) -> PivotLevels {
    let pivot = (candle.high + candle.low + candle.close) / 3.0;
    let range = candle.range();
    PivotLevels {
        pivot: Some(pivot),
        r1: 2.0 * pivot - candle.low,
        s1: 2.0 * pivot - candle.high,
        r2: Some(pivot + range),
        s2: Some(pivot - range),
    }
}

pub fn fibonacci(candle: &Candle) -> PivotLevels {
    let pivot = (candle.high + candle.low + candle.close) / 3.0;
    let range = candle.range();
    PivotLevels {
        pivot: Some(pivot),
        r1: pivot + FIB_NEAR * range,
        s1: pivot - FIB_NEAR * range,
        r2: Some(pivot + FIB_FAR * range),
        s2: Some(pivot - FIB_FAR * range),
    }
}

/// Camarilla levels are centred on the close, not on a pivot.
pub fn camarilla(candle: &Candle) -> PivotLevels {
    let step = CAMARILLA_FACTOR * candle.range();
    PivotLevels {
        pivot: None,
        r1: candle.close + step / 12.0,
        s1: candle.close - step / 12.0,
        r2: Some(candle.close + step / 6.0),
        s2: Some(candle.close - step / 6.0),
    }
}

pub fn woodie(candle: &Candle) -> PivotLevels {
    let pivot = (candle.high + candle.low + 2.0 * candle.close) / 4.0;
    PivotLevels {
        pivot: Some(pivot),
        r1: 2.0 * pivot - candle.low,
        s1: 2.0 * pivot - candle.high,
        r2: None,
        s2: None,
    }
}

pub fn demark(candle: &Candle) -> PivotLevels {
    let x = if candle.close < candle.open {
        candle.high + 2.0 * candle.low + candle.close
    } else if candle.close > candle.open {
        2.0 * candle.high + candle.low + candle.close
    } else {
        candle.high + candle.low + 2.0 * candle.close
    };
    PivotLevels {
        pivot: Some(x / 4.0),
        r1: x / 2.0 - candle.low,
        s1: x / 2.0 - candle.high,
        r2: None,
        s2: None,
    }
}

/// Coarse position of `price` against classic levels.
///
/// Above R1 = 1.0, between pivot and R1 = 0.5, between S1 and pivot = -0.5,
/// below S1 = -1.0. A price exactly on the pivot counts as below it.
pub fn pivot_position(price: f64, levels: &PivotLevels) -> f64 {
    let pivot = levels.pivot.unwrap_or((levels.r1 + levels.s1) / 2.0);
    if price > pivot {
        if price > levels.r1 {
            1.0
        } else {
            0.5
        }
    } else if price < levels.s1 {
        -1.0
    } else {
        -0.5
    }
}

/// Distance to the closest level divided by price. Zero for a non-positive price.
pub fn nearest_level_distance(price: f64, levels: &PivotLevels) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    [levels.pivot, Some(levels.r1), Some(levels.s1), levels.r2, levels.s2]
        .into_iter()
        .flatten()
        .map(|level| (price - level).abs())
        .fold(f64::INFINITY, f64::min)
        / price
}
