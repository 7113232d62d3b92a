//! Collapse transactions into daily and weekday totals

use crate::data::{DailySeries, DailyTotal, SalesRecord};
use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

/// Groups sales records into a daily series
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesAggregator;

impl TimeSeriesAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Sum amounts per calendar date, ascending by date
    pub fn aggregate(&self, records: &[SalesRecord]) -> Result<DailySeries> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "Cannot aggregate an empty set of records".to_string(),
            ));
        }

        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *by_date.entry(record.date).or_insert(0.0) += record.amount;
        }

        let points = by_date
            .into_iter()
            .map(|(date, total_amount)| DailyTotal { date, total_amount })
            .collect::<Vec<_>>();

        debug!(records = records.len(), days = points.len(), "Aggregated daily series");
        DailySeries::from_points(points)
    }

    /// Sum raw transaction amounts per weekday, Monday first
    pub fn aggregate_by_weekday(&self, records: &[SalesRecord]) -> Result<[f64; 7]> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "Cannot aggregate an empty set of records".to_string(),
            ));
        }

        let mut totals = [0.0; 7];
        for record in records {
            totals[record.date.weekday().num_days_from_monday() as usize] += record.amount;
        }

        Ok(totals)
    }
}
