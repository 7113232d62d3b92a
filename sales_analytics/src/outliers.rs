//! IQR fence outlier detection

use crate::config::AnalysisConfig;
use crate::data::{field_values, NumericField, SalesRecord};
use crate::error::{AnalyticsError, Result};
use sales_math::iqr_fences;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A record whose value fell outside the fences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedRecord {
    /// Position of the record in the analyzed input
    pub index: usize,
    /// Value of the analyzed field
    pub value: f64,
    /// The record itself
    pub record: SalesRecord,
}

/// Outliers for one field with the fences that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Analyzed field
    pub field: NumericField,
    /// Flagged records, in input order
    pub outliers: Vec<FlaggedRecord>,
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
    /// Interquartile range
    pub iqr: f64,
    /// Values strictly below this are outliers
    pub lower_bound: f64,
    /// Values strictly above this are outliers
    pub upper_bound: f64,
}

impl OutlierReport {
    /// Number of flagged records
    pub fn len(&self) -> usize {
        self.outliers.len()
    }

    /// Whether no record was flagged
    pub fn is_empty(&self) -> bool {
        self.outliers.is_empty()
    }

    /// Input positions of the flagged records
    pub fn indices(&self) -> Vec<usize> {
        self.outliers.iter().map(|o| o.index).collect()
    }
}

/// Flags records outside `[Q1 - k·IQR, Q3 + k·IQR]`
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            multiplier: AnalysisConfig::default().iqr_multiplier,
        }
    }
}

impl OutlierDetector {
    /// Create a detector using the classic 1.5 multiplier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom fence multiplier
    pub fn with_multiplier(multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(AnalyticsError::InvalidArgument(
                "IQR multiplier must be greater than zero".to_string(),
            ));
        }

        Ok(Self { multiplier })
    }

    /// Create a detector from a run configuration
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::with_multiplier(config.iqr_multiplier)
    }

    /// Get the fence multiplier
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Flag the records whose `field` lies strictly outside the fences
    pub fn detect(&self, records: &[SalesRecord], field: NumericField) -> Result<OutlierReport> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "Cannot detect outliers in an empty set of records".to_string(),
            ));
        }

        let values = field_values(records, field);
        let fences = iqr_fences(&values, self.multiplier)?;

        let outliers: Vec<FlaggedRecord> = records
            .iter()
            .zip(&values)
            .enumerate()
            .filter(|(_, (_, value))| fences.is_outside(**value))
            .map(|(index, (record, value))| FlaggedRecord {
                index,
                value: *value,
                record: record.clone(),
            })
            .collect();

        debug!(
            %field,
            lower = fences.lower,
            upper = fences.upper,
            flagged = outliers.len(),
            "Detected outliers"
        );

        Ok(OutlierReport {
            field,
            outliers,
            q1: fences.q1,
            q3: fences.q3,
            iqr: fences.iqr,
            lower_bound: fences.lower,
            upper_bound: fences.upper,
        })
    }
}
