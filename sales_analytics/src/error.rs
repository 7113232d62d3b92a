//! Error types for the sales_analytics crate

use sales_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_analytics crate
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No records where at least one is required
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Fewer points than the statistic needs
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Caller-supplied parameter out of its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file does not match the expected schema
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from a numeric kernel
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl From<csv::Error> for AnalyticsError {
    fn from(err: csv::Error) -> Self {
        AnalyticsError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}
