//! Btock stock KPI scoring engine.
//!
//! Raw OHLCV history is turned into a fixed set of technical indicators, each
//! indicator is normalized to a bearish (-1) / bullish (+1) scale, indicators
//! are averaged into five categories and the categories are combined with
//! user-configurable weights into a single score that drives a BUY/HOLD/SELL
//! signal.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
