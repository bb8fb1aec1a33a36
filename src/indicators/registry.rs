//! Indicator vocabulary and category membership

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator names produced by the calculator and understood by the normalizer.
pub mod names {
    pub const RSI: &str = "rsi";
    pub const STOCH_K: &str = "stoch_k";
    pub const STOCH_D: &str = "stoch_d";
    pub const STOCH_RSI_K: &str = "stoch_rsi_k";
    pub const STOCH_RSI_D: &str = "stoch_rsi_d";
    pub const WILLIAMS_R: &str = "williams_r";
    pub const ROC: &str = "roc";
    pub const ULTIMATE_OSCILLATOR: &str = "ultimate_oscillator";

    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HISTOGRAM: &str = "macd_histogram";
    pub const MA5: &str = "ma5";
    pub const MA10: &str = "ma10";
    pub const MA20: &str = "ma20";
    pub const MA50: &str = "ma50";
    pub const MA200: &str = "ma200";
    pub const PRICE_VS_MA5: &str = "price_vs_ma5";
    pub const PRICE_VS_MA20: &str = "price_vs_ma20";
    pub const PRICE_VS_MA50: &str = "price_vs_ma50";
    pub const PRICE_VS_MA200: &str = "price_vs_ma200";
    pub const PRICE_VS_MA_PREFIX: &str = "price_vs_ma";
    pub const BULL_POWER: &str = "bull_power";
    pub const BEAR_POWER: &str = "bear_power";

    pub const ATR: &str = "atr";
    pub const ATR_PERCENT: &str = "atr_percent";
    pub const AVG_HIGH_LOW_RANGE: &str = "avg_high_low_range";
    pub const CURRENT_HIGH_LOW_RANGE: &str = "current_high_low_range";
    pub const PRICE_POSITION_IN_RANGE: &str = "price_position_in_range";
    pub const VOLATILITY_RATIO: &str = "volatility_ratio";

    pub const ADX: &str = "adx";
    pub const DI_PLUS: &str = "di_plus";
    pub const DI_MINUS: &str = "di_minus";
    pub const CCI: &str = "cci";
    pub const DIRECTIONAL_STRENGTH: &str = "directional_strength";

    pub const PIVOT_CLASSIC: &str = "pivot_classic";
    pub const R1_CLASSIC: &str = "r1_classic";
    pub const S1_CLASSIC: &str = "s1_classic";
    pub const R2_CLASSIC: &str = "r2_classic";
    pub const S2_CLASSIC: &str = "s2_classic";
    pub const PIVOT_FIBONACCI: &str = "pivot_fibonacci";
    pub const R1_FIBONACCI: &str = "r1_fibonacci";
    pub const S1_FIBONACCI: &str = "s1_fibonacci";
    pub const R2_FIBONACCI: &str = "r2_fibonacci";
    pub const S2_FIBONACCI: &str = "s2_fibonacci";
    pub const R1_CAMARILLA: &str = "r1_camarilla";
    pub const S1_CAMARILLA: &str = "s1_camarilla";
    pub const R2_CAMARILLA: &str = "r2_camarilla";
    pub const S2_CAMARILLA: &str = "s2_camarilla";
    pub const PIVOT_WOODIE: &str = "pivot_woodie";
    pub const R1_WOODIE: &str = "r1_woodie";
    pub const S1_WOODIE: &str = "s1_woodie";
    pub const PIVOT_DEMARK: &str = "pivot_demark";
    pub const R1_DEMARK: &str = "r1_demark";
    pub const S1_DEMARK: &str = "s1_demark";
    pub const PIVOT_POSITION_CLASSIC: &str = "pivot_position_classic";
    pub const NEAREST_PIVOT_DISTANCE: &str = "nearest_pivot_distance";
}

use names::*;

const MOMENTUM_MEMBERS: &[&str] = &[
    RSI,
    STOCH_K,
    STOCH_D,
    STOCH_RSI_K,
    STOCH_RSI_D,
    WILLIAMS_R,
    ROC,
    ULTIMATE_OSCILLATOR,
];

const TREND_MEMBERS: &[&str] = &[
    MACD,
    MACD_HISTOGRAM,
    PRICE_VS_MA5,
    PRICE_VS_MA20,
    PRICE_VS_MA50,
    PRICE_VS_MA200,
    BULL_POWER,
    BEAR_POWER,
];

const VOLATILITY_MEMBERS: &[&str] = &[ATR_PERCENT, VOLATILITY_RATIO, PRICE_POSITION_IN_RANGE];

const STRENGTH_MEMBERS: &[&str] = &[ADX, CCI, DIRECTIONAL_STRENGTH];

const SUPPORT_RESISTANCE_MEMBERS: &[&str] = &[PIVOT_POSITION_CLASSIC, NEAREST_PIVOT_DISTANCE];

/// One of the five fixed scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
    Strength,
    SupportResistance,
}

impl IndicatorCategory {
    pub const ALL: [IndicatorCategory; 5] = [
        IndicatorCategory::Momentum,
        IndicatorCategory::Trend,
        IndicatorCategory::Volatility,
        IndicatorCategory::Strength,
        IndicatorCategory::SupportResistance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCategory::Momentum => "momentum",
            IndicatorCategory::Trend => "trend",
            IndicatorCategory::Volatility => "volatility",
            IndicatorCategory::Strength => "strength",
            IndicatorCategory::SupportResistance => "support_resistance",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Indicators averaged into this category's score.
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            IndicatorCategory::Momentum => MOMENTUM_MEMBERS,
            IndicatorCategory::Trend => TREND_MEMBERS,
            IndicatorCategory::Volatility => VOLATILITY_MEMBERS,
            IndicatorCategory::Strength => STRENGTH_MEMBERS,
            IndicatorCategory::SupportResistance => SUPPORT_RESISTANCE_MEMBERS,
        }
    }

    /// Category an indicator is scored under, if any. Auxiliary values such
    /// as raw moving averages or pivot levels belong to no category.
    pub fn for_indicator(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.members().contains(&name))
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
