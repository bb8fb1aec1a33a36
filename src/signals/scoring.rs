//! Indicator normalization to a bearish (-1) / bullish (+1) scale
//!
//! Every indicator name maps to one [`NormalizationRule`]; [`normalize_indicator`]
//! is the single dispatch point and is total: it returns a finite value in
//! `[-1, 1]` for any input, with NaN collapsing to neutral `0.0`.

use crate::indicators::registry::names::*;

/// How a raw indicator value is mapped onto `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizationRule {
    /// 0..100 oscillator centered on 50 with 30/70 bands.
    Oscillator,
    /// Williams %R on its -100..0 scale with -80/-20 bands.
    WilliamsR,
    /// `clamp(v / scale)`.
    Linear { scale: f64 },
    /// Sign-preserving `v / (|v| + 1)`.
    Saturating,
    /// Sign-preserving `log10(|v| + 1) / 2`, capped at 1.
    SignedLog,
    /// Non-positive magnitudes are -1, otherwise `log10(v + 1) / 2`, capped at 1.
    LogMagnitude,
    /// Current over average range: 1.0 is neutral, 2.0+ is +1, 0.5- is -1.
    VolatilityRatio,
    /// Position inside the bar's range, 0..1 mapped to -1..1.
    RangePosition,
    /// ADX: above 25 trending, below 20 weak.
    Adx,
    /// DI+/DI- relative to 25.
    DirectionalIndex,
    /// 0..1 directional strength mapped to -1..1.
    DirectionalStrength,
    /// Already categorical (-1, -0.5, 0.5, 1).
    Identity,
    /// Closer to a pivot level scores higher.
    PivotProximity,
    /// Fallback for names outside the vocabulary.
    Default,
}

impl NormalizationRule {
    pub fn for_indicator(name: &str) -> Self {
        match name {
            RSI | STOCH_K | STOCH_D | STOCH_RSI_K | STOCH_RSI_D | ULTIMATE_OSCILLATOR => {
                NormalizationRule::Oscillator
            }
            WILLIAMS_R => NormalizationRule::WilliamsR,
            ROC => NormalizationRule::Linear { scale: 10.0 },
            MACD | MACD_SIGNAL | MACD_HISTOGRAM => NormalizationRule::Saturating,
            BULL_POWER | BEAR_POWER => NormalizationRule::SignedLog,
            ATR | ATR_PERCENT | AVG_HIGH_LOW_RANGE | CURRENT_HIGH_LOW_RANGE => {
                NormalizationRule::LogMagnitude
            }
            VOLATILITY_RATIO => NormalizationRule::VolatilityRatio,
            PRICE_POSITION_IN_RANGE => NormalizationRule::RangePosition,
            ADX => NormalizationRule::Adx,
            DI_PLUS | DI_MINUS => NormalizationRule::DirectionalIndex,
            CCI => NormalizationRule::Linear { scale: 200.0 },
            DIRECTIONAL_STRENGTH => NormalizationRule::DirectionalStrength,
            PIVOT_POSITION_CLASSIC => NormalizationRule::Identity,
            NEAREST_PIVOT_DISTANCE => NormalizationRule::PivotProximity,
            other if other.starts_with(PRICE_VS_MA_PREFIX) => {
                NormalizationRule::Linear { scale: 10.0 }
            }
            _ => NormalizationRule::Default,
        }
    }

    /// Raw rule output. May fall outside `[-1, 1]` for out-of-domain inputs;
    /// [`normalize_indicator`] clamps it.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            NormalizationRule::Oscillator => {
                if v >= 70.0 {
                    ((v - 70.0) / 30.0).min(1.0)
                } else if v <= 30.0 {
                    ((v - 30.0) / 30.0).max(-1.0)
                } else {
                    (v - 50.0) / 20.0
                }
            }
            NormalizationRule::WilliamsR => {
                if v >= -20.0 {
                    ((v + 20.0) / 20.0).min(1.0)
                } else if v <= -80.0 {
                    ((v + 80.0) / 20.0).max(-1.0)
                } else {
                    (v + 50.0) / 30.0
                }
            }
            NormalizationRule::Linear { scale } => clamp_unit(v / scale),
            NormalizationRule::Saturating => {
                if v == 0.0 {
                    0.0
                } else {
                    clamp_unit(v / (v.abs() + 1.0))
                }
            }
            NormalizationRule::SignedLog => {
                if v == 0.0 {
                    0.0
                } else {
                    v.signum() * ((v.abs() + 1.0).log10() / 2.0).min(1.0)
                }
            }
            NormalizationRule::LogMagnitude => {
                if v <= 0.0 {
                    -1.0
                } else {
                    ((v + 1.0).log10() / 2.0).min(1.0)
                }
            }
            NormalizationRule::VolatilityRatio => {
                if v >= 2.0 {
                    1.0
                } else if v <= 0.5 {
                    -1.0
                } else {
                    v - 1.0
                }
            }
            NormalizationRule::RangePosition => (v - 0.5) * 2.0,
            NormalizationRule::Adx => {
                if v >= 25.0 {
                    ((v - 25.0) / 25.0).min(1.0)
                } else {
                    ((v - 20.0) / 20.0).max(-1.0)
                }
            }
            NormalizationRule::DirectionalIndex => ((v - 25.0) / 25.0).min(1.0),
            NormalizationRule::DirectionalStrength => v * 2.0 - 1.0,
            NormalizationRule::Identity => v,
            NormalizationRule::PivotProximity => {
                if v <= 0.0 {
                    1.0
                } else {
                    (1.0 - v * 100.0).max(-1.0)
                }
            }
            NormalizationRule::Default => {
                if v == 0.0 {
                    0.0
                } else {
                    let magnitude = v.abs();
                    v.signum() * (magnitude / (magnitude + 1.0)).min(1.0)
                }
            }
        }
    }
}

fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Normalize one raw indicator value by name.
pub fn normalize_indicator(name: &str, value: f64) -> f64 {
    // f64::min/max return the non-NaN operand, so NaN must be caught before
    // any rule runs or it can surface as a saturated +/-1.
    if value.is_nan() {
        return 0.0;
    }
    let score = NormalizationRule::for_indicator(name).apply(value);
    if score.is_nan() {
        tracing::debug!(indicator = name, value, "normalization produced NaN, using neutral score");
        return 0.0;
    }
    clamp_unit(score)
}
