//! Weekly seasonality of the daily series

use crate::data::DailySeries;
use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Calendar order used for every seasonality result
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Aggregate for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStat {
    /// Day of the week
    pub weekday: Weekday,
    /// Mean daily total, `None` when the weekday never occurs in the data
    pub mean: Option<f64>,
    /// Sum of the daily totals falling on this weekday
    pub total: f64,
    /// Number of dates that fell on this weekday
    pub days_observed: usize,
}

/// Mean daily total per weekday, always Monday through Sunday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeasonalityDays")]
pub struct SeasonalityResult {
    days: Vec<WeekdayStat>,
}

/// Serialized form, checked before it becomes a [`SeasonalityResult`]
#[derive(Deserialize)]
struct SeasonalityDays {
    days: Vec<WeekdayStat>,
}

impl TryFrom<SeasonalityDays> for SeasonalityResult {
    type Error = AnalyticsError;

    fn try_from(raw: SeasonalityDays) -> Result<Self> {
        let order: Vec<Weekday> = raw.days.iter().map(|d| d.weekday).collect();
        if order != WEEKDAYS {
            return Err(AnalyticsError::DataError(format!(
                "Seasonality needs one entry per weekday from Monday to Sunday, got {:?}",
                order
            )));
        }

        Ok(Self { days: raw.days })
    }
}

impl SeasonalityResult {
    /// All seven entries in calendar order
    pub fn days(&self) -> &[WeekdayStat] {
        &self.days
    }

    /// Entry for a given weekday
    pub fn get(&self, weekday: Weekday) -> &WeekdayStat {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    /// Mean daily total for a weekday, `None` if it has no data
    pub fn mean_for(&self, weekday: Weekday) -> Option<f64> {
        self.get(weekday).mean
    }

    /// Weekday with the highest mean
    pub fn peak(&self) -> Option<Weekday> {
        self.defined()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(day, _)| day)
    }

    /// Weekday with the lowest mean
    pub fn trough(&self) -> Option<Weekday> {
        self.defined()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(day, _)| day)
    }

    fn defined(&self) -> impl Iterator<Item = (Weekday, f64)> + '_ {
        self.days
            .iter()
            .filter_map(|d| d.mean.map(|mean| (d.weekday, mean)))
    }
}

/// Buckets daily totals by weekday
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalityAnalyzer;

impl SeasonalityAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Average the daily totals of each weekday
    pub fn analyze(&self, series: &DailySeries) -> Result<SeasonalityResult> {
        if series.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "Cannot compute seasonality of an empty series".to_string(),
            ));
        }

        let mut totals = [0.0; 7];
        let mut counts = [0usize; 7];
        for point in series {
            let slot = point.date.weekday().num_days_from_monday() as usize;
            totals[slot] += point.total_amount;
            counts[slot] += 1;
        }

        let days = WEEKDAYS
            .iter()
            .enumerate()
            .map(|(slot, &weekday)| WeekdayStat {
                weekday,
                mean: (counts[slot] > 0).then(|| totals[slot] / counts[slot] as f64),
                total: totals[slot],
                days_observed: counts[slot],
            })
            .collect();

        debug!(days = series.len(), "Computed weekly seasonality");
        Ok(SeasonalityResult { days })
    }
}
