//! Linear extrapolation of a fitted trend

use crate::error::{AnalyticsError, Result};
use crate::trend::TrendResult;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forecast for one future day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedPoint {
    /// Forecast date
    pub date: NaiveDate,
    /// Extrapolated daily total, may be negative
    pub predicted_amount: f64,
}

/// Consecutive daily forecasts following the last observed date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    points: Vec<PredictedPoint>,
}

impl Prediction {
    /// Forecast points in date order
    pub fn points(&self) -> &[PredictedPoint] {
        &self.points
    }

    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Forecast values in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_amount).collect()
    }

    /// Copy of the forecast with negative values raised to zero, for display
    pub fn clamped_non_negative(&self) -> Prediction {
        Prediction {
            points: self
                .points
                .iter()
                .map(|p| PredictedPoint {
                    date: p.date,
                    predicted_amount: p.predicted_amount.max(0.0),
                })
                .collect(),
        }
    }

    /// Mean absolute error against observed values for the same days
    pub fn mean_absolute_error(&self, actual: &[f64]) -> Result<f64> {
        if actual.len() != self.points.len() || actual.is_empty() {
            return Err(AnalyticsError::InvalidArgument(format!(
                "Forecast length ({}) doesn't match actual length ({})",
                self.points.len(),
                actual.len()
            )));
        }

        let sum: f64 = self
            .points
            .iter()
            .zip(actual)
            .map(|(p, a)| (p.predicted_amount - a).abs())
            .sum();

        Ok(sum / actual.len() as f64)
    }
}

/// Projects a trend line into future days
#[derive(Debug, Clone, Copy, Default)]
pub struct Forecaster;

impl Forecaster {
    /// Create a new forecaster
    pub fn new() -> Self {
        Self
    }

    /// Predict the `horizon_days` days after `last_date`.
    ///
    /// Day `i` gets `slope * (last_x + i) + intercept`, where `last_x` is the
    /// position of the last day the trend was fitted on. Values are not
    /// clamped.
    pub fn predict(
        &self,
        trend: &TrendResult,
        last_date: NaiveDate,
        horizon_days: usize,
    ) -> Result<Prediction> {
        if horizon_days == 0 {
            return Err(AnalyticsError::InvalidArgument(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }
        let out_of_range = || {
            AnalyticsError::InvalidArgument(format!(
                "Forecast of {} days after {} is out of the calendar range",
                horizon_days, last_date
            ))
        };
        let horizon = u64::try_from(horizon_days).map_err(|_| out_of_range())?;
        last_date
            .checked_add_days(Days::new(horizon))
            .ok_or_else(out_of_range)?;

        let points = (1..=horizon_days)
            .map(|i| {
                let date = last_date
                    .checked_add_days(Days::new(i as u64))
                    .ok_or_else(out_of_range)?;
                Ok(PredictedPoint {
                    date,
                    predicted_amount: trend.value_at(trend.last_x.saturating_add(i)),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(%last_date, horizon = horizon_days, "Extrapolated trend");
        Ok(Prediction { points })
    }
}
