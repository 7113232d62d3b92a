use approx::assert_relative_eq;
use chrono::NaiveDate;
use sales_analytics::{AnalyticsError, SalesRecord, TimeSeriesAggregator};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn sale(day: u32, amount: f64) -> SalesRecord {
    SalesRecord::new(date(day), "Laptop", "Electronics", amount, 1, "North")
}

#[test]
fn test_groups_and_sorts_by_date() {
    let records = vec![sale(3, 30.0), sale(1, 10.0), sale(3, 5.0), sale(2, 20.0)];

    let series = TimeSeriesAggregator::new().aggregate(&records).unwrap();

    assert_eq!(series.len(), 3);
    let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(1), date(2), date(3)]);
    assert_relative_eq!(series.total_for(date(3)).unwrap(), 35.0);
    assert_eq!(series.first_date(), Some(date(1)));
    assert_eq!(series.last_date(), Some(date(3)));
}

#[test]
fn test_single_date_round_trip() {
    let records = vec![sale(5, 12.5), sale(5, 7.25), sale(5, 0.25)];

    let series = TimeSeriesAggregator::new().aggregate(&records).unwrap();

    assert_eq!(series.len(), 1);
    assert_relative_eq!(series.total_for(date(5)).unwrap(), 20.0);
    assert_eq!(series.total_for(date(6)), None);
}

#[test]
fn test_empty_records_fail() {
    let result = TimeSeriesAggregator::new().aggregate(&[]);
    assert!(matches!(result, Err(AnalyticsError::EmptyDataset(_))));

    let result = TimeSeriesAggregator::new().aggregate_by_weekday(&[]);
    assert!(matches!(result, Err(AnalyticsError::EmptyDataset(_))));
}

#[test]
fn test_weekday_buckets_sum_raw_amounts() {
    // 2024-01-01 is a Monday, 2024-01-08 the next one
    let records = vec![sale(1, 10.0), sale(8, 15.0), sale(2, 4.0), sale(7, 1.0)];

    let totals = TimeSeriesAggregator::new()
        .aggregate_by_weekday(&records)
        .unwrap();

    assert_eq!(totals, [25.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
}
