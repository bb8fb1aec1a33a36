//! Market data provider interface.
//!
//! Fetching from a live source is outside this crate; callers plug in their
//! own provider or use [`InMemoryMarketData`] with pre-loaded bars.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::indicators::Candle;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketDataError {
    #[error("no data for {0}")]
    UnknownSymbol(String),
    #[error("provider error: {0}")]
    Provider(String),
}

pub trait MarketDataProvider: Send + Sync {
    /// Most recent `limit` daily bars for a symbol, oldest first. An unknown
    /// symbol may return an empty list instead of an error.
    fn get_daily_bars(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError>;

    /// Latest traded price, if the provider has one apart from the bars.
    fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    bars: HashMap<String, Vec<Candle>>,
    prices: HashMap<String, f64>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<Candle>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }

    pub fn with_price(mut self, symbol: impl Into<String>, price: f64) -> Self {
        self.prices.insert(symbol.into(), price);
        self
    }

    pub fn insert_bars(&mut self, symbol: impl Into<String>, bars: Vec<Candle>) {
        self.bars.insert(symbol.into(), bars);
    }

    pub fn insert_price(&mut self, symbol: impl Into<String>, price: f64) {
        self.prices.insert(symbol.into(), price);
    }
}

impl MarketDataProvider for InMemoryMarketData {
    fn get_daily_bars(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, MarketDataError> {
        let bars = self.bars.get(symbol).map(Vec::as_slice).unwrap_or_default();
        let start = bars.len().saturating_sub(limit);
        Ok(bars[start..].to_vec())
    }

    fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError> {
        Ok(self.prices.get(symbol).copied())
    }
}
