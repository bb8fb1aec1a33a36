use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: need at least {needed} bars, got {available}")]
    InsufficientData { needed: usize, available: usize },
    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid numeric format for {0}")]
    InvalidNumericFormat(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: f64 },
}
