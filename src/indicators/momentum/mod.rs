//! Momentum indicators: RSI, Stochastic, Stochastic RSI, Williams %R, ROC, Ultimate Oscillator

pub mod roc;
pub mod rsi;
pub mod stochastic;
pub mod ultimate;
pub mod williams_r;

pub use roc::*;
pub use rsi::*;
pub use stochastic::*;
pub use ultimate::*;
pub use williams_r::*;
