//! Trend indicators: MACD, moving averages, Elder bull/bear power

pub mod macd;
pub mod moving_average;
pub mod power;

pub use macd::*;
pub use moving_average::*;
pub use power::*;
