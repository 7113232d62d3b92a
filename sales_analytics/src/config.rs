//! Tunable parameters for an analysis run

use crate::data::NumericField;
use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration shared by the analyzers.
///
/// Missing keys in a JSON document fall back to [`AnalysisConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// A trend is stable when `|slope|` is below this fraction of the mean
    /// daily total
    pub stable_threshold_ratio: f64,
    /// Multiplier applied to the IQR when building outlier fences
    pub iqr_multiplier: f64,
    /// Number of days to forecast
    pub forecast_horizon: usize,
    /// Field checked for outliers
    pub outlier_field: NumericField,
    /// Fields included in the correlation matrix
    pub correlation_fields: Vec<NumericField>,
    /// Run independent analyses on the rayon thread pool
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stable_threshold_ratio: 0.01,
            iqr_multiplier: 1.5,
            forecast_horizon: 5,
            outlier_field: NumericField::Amount,
            correlation_fields: NumericField::ALL.to_vec(),
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Set the stable trend threshold ratio
    pub fn with_stable_threshold_ratio(mut self, ratio: f64) -> Result<Self> {
        self.stable_threshold_ratio = ratio;
        self.validate()?;
        Ok(self)
    }

    /// Set the IQR fence multiplier
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Result<Self> {
        self.iqr_multiplier = multiplier;
        self.validate()?;
        Ok(self)
    }

    /// Set the forecast horizon in days
    pub fn with_forecast_horizon(mut self, horizon: usize) -> Result<Self> {
        self.forecast_horizon = horizon;
        self.validate()?;
        Ok(self)
    }

    /// Enable or disable parallel execution
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every parameter is within its domain
    pub fn validate(&self) -> Result<()> {
        if !self.stable_threshold_ratio.is_finite() || self.stable_threshold_ratio < 0.0 {
            return Err(AnalyticsError::InvalidArgument(
                "Stable threshold ratio must be a finite, non-negative number".to_string(),
            ));
        }
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(AnalyticsError::InvalidArgument(
                "IQR multiplier must be greater than zero".to_string(),
            ));
        }
        if self.forecast_horizon == 0 {
            return Err(AnalyticsError::InvalidArgument(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }
        if self.correlation_fields.is_empty() {
            return Err(AnalyticsError::InvalidArgument(
                "At least one correlation field is required".to_string(),
            ));
        }

        Ok(())
    }
}
