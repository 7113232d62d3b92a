//! Pairwise Pearson correlation between numeric fields

use crate::data::{field_values, NumericField, SalesRecord};
use crate::error::{AnalyticsError, Result};
use sales_math::pearson;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A correlation coefficient, or the marker for a pair where it is undefined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    /// Coefficient in `[-1, 1]`
    Defined(f64),
    /// At least one of the fields has zero variance
    Undefined,
}

impl Correlation {
    /// Coefficient, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Defined(v) => Some(*v),
            Correlation::Undefined => None,
        }
    }

    /// Whether the coefficient is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Correlation::Undefined)
    }
}

impl From<Option<f64>> for Correlation {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Correlation::Undefined, Correlation::Defined)
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Defined(v) => write!(f, "{:.4}", v),
            Correlation::Undefined => f.write_str("n/a"),
        }
    }
}

/// Symmetric correlation matrix over a set of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct CorrelationMatrix {
    fields: Vec<NumericField>,
    values: Vec<Vec<Correlation>>,
}

/// Serialized form, checked before it becomes a [`CorrelationMatrix`]
#[derive(Deserialize)]
struct MatrixParts {
    fields: Vec<NumericField>,
    values: Vec<Vec<Correlation>>,
}

impl TryFrom<MatrixParts> for CorrelationMatrix {
    type Error = AnalyticsError;

    fn try_from(raw: MatrixParts) -> Result<Self> {
        let n = raw.fields.len();
        if raw.values.len() != n || raw.values.iter().any(|row| row.len() != n) {
            return Err(AnalyticsError::DataError(format!(
                "Correlation matrix must be {0}x{0} to match its fields",
                n
            )));
        }
        if raw.fields.iter().enumerate().any(|(i, f)| raw.fields[..i].contains(f)) {
            return Err(AnalyticsError::DataError(
                "Correlation matrix fields must be distinct".to_string(),
            ));
        }

        Ok(Self {
            fields: raw.fields,
            values: raw.values,
        })
    }
}

impl CorrelationMatrix {
    /// Fields in row/column order
    pub fn fields(&self) -> &[NumericField] {
        &self.fields
    }

    /// Rows of the matrix, aligned with [`fields`](Self::fields)
    pub fn rows(&self) -> &[Vec<Correlation>] {
        &self.values
    }

    /// Coefficient between two fields, `None` if either is not in the matrix
    pub fn get(&self, a: NumericField, b: NumericField) -> Option<Correlation> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    /// Pairs whose coefficient is undefined, each reported once
    pub fn undefined_pairs(&self) -> Vec<(NumericField, NumericField)> {
        let mut pairs = Vec::new();
        for i in 0..self.fields.len() {
            for j in (i + 1)..self.fields.len() {
                if self.values[i][j].is_undefined() {
                    pairs.push((self.fields[i], self.fields[j]));
                }
            }
        }
        pairs
    }

    fn index_of(&self, field: NumericField) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }
}

/// Computes the Pearson correlation matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Correlate every pair of `fields` over the records.
    ///
    /// Repeated fields are kept once, at their first position. The diagonal
    /// is `1.0` for every field.
    pub fn analyze(
        &self,
        records: &[SalesRecord],
        fields: &[NumericField],
    ) -> Result<CorrelationMatrix> {
        if fields.is_empty() {
            return Err(AnalyticsError::InvalidArgument(
                "At least one field is required for correlation".to_string(),
            ));
        }
        if records.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "Correlation needs at least 2 records, have {}",
                records.len()
            )));
        }

        let mut unique: Vec<NumericField> = Vec::with_capacity(fields.len());
        for field in fields {
            if !unique.contains(field) {
                unique.push(*field);
            }
        }

        let columns: Vec<Vec<f64>> = unique
            .iter()
            .map(|field| field_values(records, *field))
            .collect();

        let n = unique.len();
        let mut values = vec![vec![Correlation::Defined(1.0); n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let coefficient = Correlation::from(pearson(&columns[i], &columns[j])?);
                values[i][j] = coefficient;
                values[j][i] = coefficient;
            }
        }

        let matrix = CorrelationMatrix {
            fields: unique,
            values,
        };
        debug!(
            records = records.len(),
            fields = n,
            undefined = matrix.undefined_pairs().len(),
            "Computed correlation matrix"
        );
        Ok(matrix)
    }
}
