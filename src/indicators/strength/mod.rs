//! Trend strength indicators: ADX with DI+/DI-, CCI

pub mod adx;
pub mod cci;

pub use adx::*;
pub use cci::*;
