//! # Sales Math
//!
//! Numeric kernels used by the sales analytics engine.
//! Everything here works on plain `f64` slices and knows nothing about
//! dates or records:
//!
//! - Ordinary least squares regression with goodness of fit
//! - Dispersion statistics (mean, quantiles, IQR fences)
//! - Pearson correlation

use thiserror::Error;

pub mod dispersion;
pub mod regression;

pub use dispersion::{iqr_fences, mean, pearson, quantile, Fences};
pub use regression::{LinearFit, LinearRegression};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
