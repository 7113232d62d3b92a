//! Sales records, derived numeric columns and the daily series

use crate::error::{AnalyticsError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A single dated sales transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the sale
    pub date: NaiveDate,
    /// Product name
    pub product: String,
    /// Product category
    pub category: String,
    /// Sale amount, never negative
    pub amount: f64,
    /// Units sold
    pub quantity: u32,
    /// Sales region
    pub region: String,
}

impl SalesRecord {
    /// Create a new record
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        quantity: u32,
        region: impl Into<String>,
    ) -> Self {
        Self {
            date,
            product: product.into(),
            category: category.into(),
            amount,
            quantity,
            region: region.into(),
        }
    }
}

/// Numeric columns available for correlation and outlier detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Sale amount
    #[serde(alias = "ventas")]
    Amount,
    /// Units sold
    #[serde(alias = "cantidad")]
    Quantity,
    /// Index of the category among the sorted distinct categories
    #[serde(alias = "categoria_num")]
    CategoryCode,
    /// Index of the region among the sorted distinct regions
    #[serde(alias = "region_num")]
    RegionCode,
}

impl NumericField {
    /// Every numeric field, in display order
    pub const ALL: [NumericField; 4] = [
        NumericField::Amount,
        NumericField::Quantity,
        NumericField::CategoryCode,
        NumericField::RegionCode,
    ];

    /// Column name of the field
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Amount => "amount",
            NumericField::Quantity => "quantity",
            NumericField::CategoryCode => "category_code",
            NumericField::RegionCode => "region_code",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericField {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amount" | "ventas" => Ok(NumericField::Amount),
            "quantity" | "cantidad" => Ok(NumericField::Quantity),
            "category_code" | "categoria_num" => Ok(NumericField::CategoryCode),
            "region_code" | "region_num" => Ok(NumericField::RegionCode),
            other => Err(AnalyticsError::InvalidArgument(format!(
                "Unknown numeric field: {}",
                other
            ))),
        }
    }
}

/// Extract one numeric column from the records, aligned with their order.
///
/// Code fields are computed against the distinct values present in
/// `records`, so the same record can get a different code in another dataset.
pub fn field_values(records: &[SalesRecord], field: NumericField) -> Vec<f64> {
    match field {
        NumericField::Amount => records.iter().map(|r| r.amount).collect(),
        NumericField::Quantity => records.iter().map(|r| r.quantity as f64).collect(),
        NumericField::CategoryCode => category_codes(records, |r| &r.category),
        NumericField::RegionCode => category_codes(records, |r| &r.region),
    }
}

fn category_codes<F>(records: &[SalesRecord], key: F) -> Vec<f64>
where
    F: Fn(&SalesRecord) -> &String,
{
    let levels: Vec<&String> = records
        .iter()
        .map(&key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    records
        .iter()
        .map(|r| {
            // every key is in `levels` since it was built from the same records
            levels.binary_search(&key(r)).unwrap_or_default() as f64
        })
        .collect()
}

/// Total sales for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Calendar date
    pub date: NaiveDate,
    /// Sum of all amounts sold on `date`
    pub total_amount: f64,
}

/// Daily totals sorted by strictly increasing date
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DailySeries {
    points: Vec<DailyTotal>,
}

impl DailySeries {
    /// Build a series from already aggregated points.
    ///
    /// Fails if the dates are not strictly increasing.
    pub fn from_points(points: Vec<DailyTotal>) -> Result<Self> {
        if let Some(w) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(AnalyticsError::InvalidArgument(format!(
                "Daily series dates must be strictly increasing ({} is followed by {})",
                w[0].date, w[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Get the points
    pub fn points(&self) -> &[DailyTotal] {
        &self.points
    }

    /// Iterate over the points
    pub fn iter(&self) -> std::slice::Iter<'_, DailyTotal> {
        self.points.iter()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct dates
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// First date, if any
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last date, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Total for a given date
    pub fn total_for(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].total_amount)
    }

    /// Daily totals in date order
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_amount).collect()
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a DailyTotal;
    type IntoIter = std::slice::Iter<'a, DailyTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Column names accepted for each record field
const REQUIRED_COLUMNS: [(&str, &str); 6] = [
    ("date", "fecha"),
    ("product", "producto"),
    ("category", "categoria"),
    ("amount", "ventas"),
    ("quantity", "cantidad"),
    ("region", "region"),
];

/// Row as read from the file, before validation
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "fecha")]
    date: String,
    #[serde(alias = "producto")]
    product: String,
    #[serde(alias = "categoria")]
    category: String,
    #[serde(alias = "ventas")]
    amount: String,
    #[serde(alias = "cantidad")]
    quantity: String,
    region: String,
}

impl RawRecord {
    fn validate(self) -> std::result::Result<SalesRecord, String> {
        let date = parse_date(&self.date)?;

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| format!("amount '{}' is not numeric", self.amount))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("amount {} is negative or not finite", amount));
        }

        let quantity: f64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| format!("quantity '{}' is not numeric", self.quantity))?;
        if quantity < 0.0 || quantity.fract() != 0.0 || quantity > u32::MAX as f64 {
            return Err(format!("quantity {} is not a non-negative integer", quantity));
        }

        for (name, value) in [
            ("product", &self.product),
            ("category", &self.category),
            ("region", &self.region),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} is empty", name));
            }
        }

        Ok(SalesRecord {
            date,
            product: self.product.trim().to_string(),
            category: self.category.trim().to_string(),
            amount,
            quantity: quantity as u32,
            region: self.region.trim().to_string(),
        })
    }
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| format!("date '{}' is not a YYYY-MM-DD date", raw))
}

/// Loader for sales transaction files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sales records from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalyticsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File {} does not exist", path.display()),
            )));
        }

        info!(path = %path.display(), "Loading sales records");
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load sales records from any CSV source.
    ///
    /// Rows whose date, amount or quantity cannot be parsed, or whose text
    /// fields are empty, are dropped and counted in a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: csv::StringRecord =
            rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
        Self::check_columns(&headers)?;
        rdr.set_headers(headers);

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for (line, row) in rdr.deserialize::<RawRecord>().enumerate() {
            match row {
                Ok(raw) => match raw.validate() {
                    Ok(record) => records.push(record),
                    Err(reason) => {
                        debug!(row = line + 1, %reason, "Dropping invalid row");
                        dropped += 1;
                    }
                },
                Err(err) => {
                    debug!(row = line + 1, error = %err, "Dropping unreadable row");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, "Dropped rows with invalid or missing critical fields");
        }

        if records.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "No valid sales records found".to_string(),
            ));
        }

        info!(records = records.len(), "Sales records loaded");
        Ok(records)
    }

    fn check_columns(headers: &csv::StringRecord) -> Result<()> {
        let present: BTreeSet<&str> = headers.iter().collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|(english, spanish)| {
                !present.contains(english) && !present.contains(spanish)
            })
            .map(|(english, _)| *english)
            .collect();

        if !missing.is_empty() {
            return Err(AnalyticsError::DataError(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
