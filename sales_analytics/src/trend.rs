//! Linear trend of the daily series

use crate::config::AnalysisConfig;
use crate::data::DailySeries;
use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use sales_math::LinearRegression;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    /// Sales grow over time
    Increasing,
    /// Sales shrink over time
    Decreasing,
    /// Slope is negligible relative to the mean daily total
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Least squares line through the daily totals.
///
/// `x` is the position of a day in the fitted series: `0` for `first_date`,
/// `last_x` for the last observed date. Missing dates do not advance `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Change in daily total per observed day
    pub slope: f64,
    /// Fitted daily total at `first_date`
    pub intercept: f64,
    /// Goodness of fit in `[0, 1]`
    pub r_squared: f64,
    /// Classified direction
    pub direction: TrendDirection,
    /// Date encoded as `x = 0`
    pub first_date: NaiveDate,
    /// Position of the last observed date
    pub last_x: usize,
}

impl TrendResult {
    /// Value of the trend line at position `x`
    pub fn value_at(&self, x: usize) -> f64 {
        self.slope * x as f64 + self.intercept
    }

    /// Trend line evaluated at every fitted position
    pub fn fitted_values(&self) -> Vec<f64> {
        (0..=self.last_x).map(|x| self.value_at(x)).collect()
    }
}

/// Fits an OLS trend line to a daily series
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    stable_threshold_ratio: f64,
    regression: LinearRegression,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            stable_threshold_ratio: AnalysisConfig::default().stable_threshold_ratio,
            regression: LinearRegression::new(),
        }
    }
}

impl TrendAnalyzer {
    /// Create an analyzer with the default stable threshold (1% of the mean)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom stable threshold ratio
    pub fn with_stable_threshold_ratio(ratio: f64) -> Result<Self> {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(AnalyticsError::InvalidArgument(
                "Stable threshold ratio must be a finite, non-negative number".to_string(),
            ));
        }

        Ok(Self {
            stable_threshold_ratio: ratio,
            ..Self::default()
        })
    }

    /// Create an analyzer from a run configuration
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::with_stable_threshold_ratio(config.stable_threshold_ratio)
    }

    /// Get the stable threshold ratio
    pub fn stable_threshold_ratio(&self) -> f64 {
        self.stable_threshold_ratio
    }

    /// Fit the trend line and classify its direction
    pub fn analyze(&self, series: &DailySeries) -> Result<TrendResult> {
        let first_date = match series.first_date() {
            Some(date) if series.len() >= 2 => date,
            _ => {
                return Err(AnalyticsError::InsufficientData(format!(
                    "Trend analysis needs at least 2 distinct dates, have {}",
                    series.len()
                )))
            }
        };

        let positions: Vec<f64> = (0..series.len()).map(|x| x as f64).collect();
        let fit = self.regression.fit(&positions, &series.totals())?;
        let direction = self.classify(fit.slope, fit.y_mean);

        debug!(
            days = series.len(),
            slope = fit.slope,
            r_squared = fit.r_squared,
            %direction,
            "Fitted sales trend"
        );

        Ok(TrendResult {
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            direction,
            first_date,
            last_x: series.len() - 1,
        })
    }

    fn classify(&self, slope: f64, mean_daily: f64) -> TrendDirection {
        let threshold = self.stable_threshold_ratio * mean_daily.abs();
        if slope.abs() < threshold || slope == 0.0 {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }
}
