//! Volatility indicators: ATR, high/low range statistics

pub mod atr;
pub mod range;

pub use atr::*;
pub use range::*;
