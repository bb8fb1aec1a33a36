//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod session;
pub mod signal;
pub mod ticker;

pub use indicators::{AdxIndicator, Candle, IndicatorSet, MacdIndicator, PivotLevels, StochasticIndicator};
pub use session::{
    AnalysisSession, ScoreStats, SessionStatus, SessionSummary, SignalDistribution, SummaryStats,
};
pub use signal::{AnalysisOutcome, AnalysisResult, Signal};
pub use ticker::{clean_ticker_symbol, unique_tickers};
