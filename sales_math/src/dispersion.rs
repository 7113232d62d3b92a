//! Dispersion and association statistics
//!
//! Contains:
//! - Mean
//! - Quantiles with linear interpolation between order statistics
//! - Interquartile range fences
//! - Pearson correlation

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

fn ensure_finite(values: &[f64]) -> Result<()> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Value at position {} is not finite",
            pos
        )));
    }
    Ok(())
}

pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot calculate mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile `q` in `[0, 1]`, interpolating linearly between the two closest
/// order statistics at position `q * (n - 1)`.
pub fn quantile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot calculate quantile of an empty slice".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::InvalidInput(format!(
            "Quantile must be between 0 and 1, got {}",
            q
        )));
    }
    ensure_finite(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Tukey fences derived from the interquartile range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fences {
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
    /// Interquartile range (`q3 - q1`)
    pub iqr: f64,
    /// `q1 - multiplier * iqr`
    pub lower: f64,
    /// `q3 + multiplier * iqr`
    pub upper: f64,
}

impl Fences {
    /// Whether `value` lies strictly outside the fences
    pub fn is_outside(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Compute IQR fences with the given multiplier (1.5 for the classic rule)
pub fn iqr_fences(values: &[f64], multiplier: f64) -> Result<Fences> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(MathError::InvalidInput(
            "Fence multiplier must be greater than zero".to_string(),
        ));
    }

    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;

    Ok(Fences {
        q1,
        q3,
        iqr,
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
    })
}

/// Pearson correlation coefficient between two aligned samples.
///
/// Returns `Ok(None)` when either sample is constant: the coefficient is
/// undefined there, which is not an error.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<Option<f64>> {
    if xs.len() != ys.len() {
        return Err(MathError::InvalidInput(format!(
            "Samples must have the same length ({} != {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Correlation needs at least 2 samples, have {}",
            xs.len()
        )));
    }
    ensure_finite(xs)?;
    ensure_finite(ys)?;

    if is_constant(xs) || is_constant(ys) {
        return Ok(None);
    }

    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let mut covariance = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        covariance += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    let denominator = (x_var * y_var).sqrt();
    if denominator == 0.0 {
        return Ok(None);
    }

    Ok(Some((covariance / denominator).clamp(-1.0, 1.0)))
}
