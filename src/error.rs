//! Error types for fx_volatility

use thiserror::Error;

/// Main error type for fx_volatility
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate { value: String, line: u64 },

    #[error("Invalid rate '{value}' on line {line}")]
    InvalidRate { value: String, line: u64 },

    #[error("Series is not strictly ascending by date at {date}")]
    UnsortedSeries { date: chrono::NaiveDate },

    #[error("Invalid window: {0} (must be greater than 0)")]
    InvalidWindow(usize),

    #[error("Insufficient data: required {required} observations, available {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for fx_volatility operations
pub type Result<T> = std::result::Result<T, FxError>;
