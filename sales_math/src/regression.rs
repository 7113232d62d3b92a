//! Ordinary least squares regression
//!
//! Closed-form simple linear regression over paired `(x, y)` samples,
//! with the coefficient of determination computed alongside the fit.

use crate::dispersion::is_constant;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Result of fitting `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope of the fitted line
    pub slope: f64,
    /// Intercept of the fitted line
    pub intercept: f64,
    /// Coefficient of determination, always within `[0, 1]`
    pub r_squared: f64,
    /// Mean of the dependent variable
    pub y_mean: f64,
    /// Number of samples used for the fit
    pub samples: usize,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Linear regression fitter
#[derive(Debug, Clone)]
pub struct LinearRegression {
    tolerance: f64,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl LinearRegression {
    /// Create a new fitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit a line through the paired samples.
    ///
    /// When the dependent variable is constant (`SS_tot == 0`), R² is `1.0`
    /// if the line also leaves no residual and `0.0` otherwise.
    pub fn fit(&self, xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x and y must have the same length ({} != {})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, have {}",
                xs.len()
            )));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < self.tolerance {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let y_pred = slope * x + intercept;
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }

        // A constant y can still leave rounding noise in both sums
        let r_squared = if ss_total == 0.0 || is_constant(ys) {
            let sum_y_squared: f64 = ys.iter().map(|y| y * y).sum();
            if ss_residual <= self.tolerance * sum_y_squared {
                1.0
            } else {
                0.0
            }
        } else {
            (1.0 - ss_residual / ss_total).clamp(0.0, 1.0)
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_squared,
            y_mean,
            samples: xs.len(),
        })
    }
}
