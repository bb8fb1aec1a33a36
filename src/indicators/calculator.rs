//! Full indicator set for one ticker's daily bars

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{
    calculate_roc, calculate_rsi, calculate_stochastic, calculate_stochastic_rsi,
    calculate_ultimate_oscillator, calculate_williams_r,
};
use crate::indicators::registry::names::*;
use crate::indicators::strength::{calculate_adx, calculate_cci, directional_strength};
use crate::indicators::structure::{nearest_level_distance, pivot_position, PivotPoints};
use crate::indicators::trend::{calculate_elder_power, calculate_macd, calculate_sma, price_vs_ma};
use crate::indicators::validation::validate_candles;
use crate::indicators::volatility::{atr_percent, calculate_atr, calculate_range_stats};
use crate::models::indicators::{Candle, IndicatorSet, PivotLevels};

const RSI_PERIOD: usize = 14;
const STOCH_PERIOD: usize = 14;
const STOCH_SMOOTH: usize = 3;
const WILLIAMS_PERIOD: usize = 14;
const ROC_PERIOD: usize = 12;
const ULTIMATE_PERIODS: [usize; 3] = [7, 14, 28];
const MACD_PERIODS: (usize, usize, usize) = (12, 26, 9);
const POWER_EMA_PERIOD: usize = 13;
const ATR_PERIOD: usize = 14;
const RANGE_LOOKBACK: usize = 14;
const ADX_PERIOD: usize = 14;
const CCI_PERIOD: usize = 20;

/// Neutral values used when a sub-calculation cannot produce a result.
pub mod defaults {
    pub const OSCILLATOR: f64 = 50.0;
    pub const WILLIAMS_R: f64 = -50.0;
    pub const DIRECTIONAL: f64 = 25.0;
    pub const RANGE_POSITION: f64 = 0.5;
    pub const VOLATILITY_RATIO: f64 = 1.0;
    pub const PIVOT_POSITION: f64 = 0.0;
    pub const PIVOT_DISTANCE: f64 = 0.01;
}

type Entries = Vec<(&'static str, f64)>;

pub struct IndicatorCalculator;

impl IndicatorCalculator {
    /// Bars required before any indicator is computed; MA200 needs the full window.
    pub const MIN_BARS: usize = 200;

    /// Compute every indicator from the last bar of `candles`.
    ///
    /// Keys are never omitted: any value that cannot be computed takes its
    /// neutral default.
    pub fn calculate_all(candles: &[Candle]) -> Result<IndicatorSet, IndicatorError> {
        validate_candles(candles, Self::MIN_BARS)?;
        let last = candles.last().ok_or(IndicatorError::InsufficientData {
            needed: Self::MIN_BARS,
            available: 0,
        })?;
        let price = last.close;

        let entries = Self::momentum(candles)
            .into_iter()
            .chain(Self::trend(candles, price))
            .chain(Self::volatility(candles, price))
            .chain(Self::strength(candles))
            .chain(Self::support_resistance(last));

        Ok(entries.collect())
    }

    fn momentum(candles: &[Candle]) -> Entries {
        let rsi = calculate_rsi(candles, RSI_PERIOD);
        let stoch = calculate_stochastic(candles, STOCH_PERIOD, STOCH_SMOOTH);
        let stoch_rsi = calculate_stochastic_rsi(candles, RSI_PERIOD, STOCH_PERIOD, STOCH_SMOOTH);

        vec![
            (RSI, or_default(RSI, rsi, defaults::OSCILLATOR)),
            (STOCH_K, or_default(STOCH_K, stoch.map(|s| s.k), defaults::OSCILLATOR)),
            (STOCH_D, or_default(STOCH_D, stoch.map(|s| s.d), defaults::OSCILLATOR)),
            (STOCH_RSI_K, or_default(STOCH_RSI_K, stoch_rsi.map(|s| s.k), defaults::OSCILLATOR)),
            (STOCH_RSI_D, or_default(STOCH_RSI_D, stoch_rsi.map(|s| s.d), defaults::OSCILLATOR)),
            (
                WILLIAMS_R,
                or_default(WILLIAMS_R, calculate_williams_r(candles, WILLIAMS_PERIOD), defaults::WILLIAMS_R),
            ),
            (ROC, or_default(ROC, calculate_roc(candles, ROC_PERIOD), 0.0)),
            (
                ULTIMATE_OSCILLATOR,
                or_default(
                    ULTIMATE_OSCILLATOR,
                    calculate_ultimate_oscillator(candles, ULTIMATE_PERIODS),
                    defaults::OSCILLATOR,
                ),
            ),
        ]
    }

    fn trend(candles: &[Candle], price: f64) -> Entries {
        let (fast, slow, signal) = MACD_PERIODS;
        let macd = calculate_macd(candles, fast, slow, signal);
        let ma = |name: &'static str, period: usize| or_default(name, calculate_sma(candles, period), price);
        let (ma5, ma10, ma20) = (ma(MA5, 5), ma(MA10, 10), ma(MA20, 20));
        let (ma50, ma200) = (ma(MA50, 50), ma(MA200, 200));
        let vs = |name: &'static str, average: f64| or_default(name, price_vs_ma(price, average), 0.0);
        let power = calculate_elder_power(candles, POWER_EMA_PERIOD);

        vec![
            (MACD, or_default(MACD, macd.map(|m| m.macd), 0.0)),
            (MACD_SIGNAL, or_default(MACD_SIGNAL, macd.map(|m| m.signal), 0.0)),
            (MACD_HISTOGRAM, or_default(MACD_HISTOGRAM, macd.map(|m| m.histogram), 0.0)),
            (MA5, ma5),
            (MA10, ma10),
            (MA20, ma20),
            (MA50, ma50),
            (MA200, ma200),
            (PRICE_VS_MA5, vs(PRICE_VS_MA5, ma5)),
            (PRICE_VS_MA20, vs(PRICE_VS_MA20, ma20)),
            (PRICE_VS_MA50, vs(PRICE_VS_MA50, ma50)),
            (PRICE_VS_MA200, vs(PRICE_VS_MA200, ma200)),
            (BULL_POWER, or_default(BULL_POWER, power.map(|p| p.0), 0.0)),
            (BEAR_POWER, or_default(BEAR_POWER, power.map(|p| p.1), 0.0)),
        ]
    }

    fn volatility(candles: &[Candle], price: f64) -> Entries {
        let atr = or_default(ATR, calculate_atr(candles, ATR_PERIOD), 0.0);
        let stats = calculate_range_stats(candles, RANGE_LOOKBACK);

        vec![
            (ATR, atr),
            (ATR_PERCENT, atr_percent(atr, price)),
            (AVG_HIGH_LOW_RANGE, or_default(AVG_HIGH_LOW_RANGE, stats.map(|s| s.average_range), 0.0)),
            (
                CURRENT_HIGH_LOW_RANGE,
                or_default(CURRENT_HIGH_LOW_RANGE, stats.map(|s| s.current_range), 0.0),
            ),
            (
                PRICE_POSITION_IN_RANGE,
                or_default(
                    PRICE_POSITION_IN_RANGE,
                    stats.map(|s| s.position_in_range),
                    defaults::RANGE_POSITION,
                ),
            ),
            (
                VOLATILITY_RATIO,
                or_default(VOLATILITY_RATIO, stats.map(|s| s.volatility_ratio), defaults::VOLATILITY_RATIO),
            ),
        ]
    }

    fn strength(candles: &[Candle]) -> Entries {
        let adx = calculate_adx(candles, ADX_PERIOD);
        let plus_di = or_default(DI_PLUS, adx.map(|a| a.plus_di), defaults::DIRECTIONAL);
        let minus_di = or_default(DI_MINUS, adx.map(|a| a.minus_di), defaults::DIRECTIONAL);

        vec![
            (ADX, or_default(ADX, adx.map(|a| a.value), defaults::DIRECTIONAL)),
            (DI_PLUS, plus_di),
            (DI_MINUS, minus_di),
            (CCI, or_default(CCI, calculate_cci(candles, CCI_PERIOD), 0.0)),
            (DIRECTIONAL_STRENGTH, directional_strength(plus_di, minus_di)),
        ]
    }

    fn support_resistance(last: &Candle) -> Entries {
        let price = last.close;
        let computed = PivotPoints::from_candle(last);
        let all_finite = [
            computed.classic,
            computed.fibonacci,
            computed.camarilla,
            computed.woodie,
            computed.demark,
        ]
        .iter()
        .all(levels_finite);

        let (points, position, distance) = if all_finite {
            (
                computed,
                pivot_position(price, &computed.classic),
                nearest_level_distance(price, &computed.classic),
            )
        } else {
            debug!(price, "pivot levels not finite, using levels around price");
            (
                PivotPoints::around_price(price),
                defaults::PIVOT_POSITION,
                defaults::PIVOT_DISTANCE,
            )
        };

        let mut entries = Vec::with_capacity(20);
        push_levels(
            &mut entries,
            &points.classic,
            [Some(PIVOT_CLASSIC), Some(R1_CLASSIC), Some(S1_CLASSIC), Some(R2_CLASSIC), Some(S2_CLASSIC)],
        );
        push_levels(
            &mut entries,
            &points.fibonacci,
            [
                Some(PIVOT_FIBONACCI),
                Some(R1_FIBONACCI),
                Some(S1_FIBONACCI),
                Some(R2_FIBONACCI),
                Some(S2_FIBONACCI),
            ],
        );
        push_levels(
            &mut entries,
            &points.camarilla,
            [None, Some(R1_CAMARILLA), Some(S1_CAMARILLA), Some(R2_CAMARILLA), Some(S2_CAMARILLA)],
        );
        push_levels(
            &mut entries,
            &points.woodie,
            [Some(PIVOT_WOODIE), Some(R1_WOODIE), Some(S1_WOODIE), None, None],
        );
        push_levels(
            &mut entries,
            &points.demark,
            [Some(PIVOT_DEMARK), Some(R1_DEMARK), Some(S1_DEMARK), None, None],
        );
        entries.push((PIVOT_POSITION_CLASSIC, position));
        entries.push((NEAREST_PIVOT_DISTANCE, distance));
        entries
    }
}

fn or_default(name: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => {
            debug!(indicator = name, default, "indicator unavailable, using neutral default");
            default
        }
    }
}

fn levels_finite(levels: &PivotLevels) -> bool {
    [levels.pivot, Some(levels.r1), Some(levels.s1), levels.r2, levels.s2]
        .into_iter()
        .flatten()
        .all(f64::is_finite)
}

/// Keys in pivot, r1, s1, r2, s2 order; `None` skips a level the family lacks.
fn push_levels(entries: &mut Entries, levels: &PivotLevels, keys: [Option<&'static str>; 5]) {
    let values = [levels.pivot, Some(levels.r1), Some(levels.s1), levels.r2, levels.s2];
    for (key, value) in keys.into_iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            entries.push((key, value));
        }
    }
}
