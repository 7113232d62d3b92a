use approx::assert_relative_eq;
use chrono::{Days, NaiveDate, Weekday};
use sales_analytics::seasonality::WEEKDAYS;
use sales_analytics::{
    AnalyticsError, DailySeries, DailyTotal, SeasonalityAnalyzer, SeasonalityResult,
};

fn point(day: u32, total_amount: f64) -> DailyTotal {
    DailyTotal {
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        total_amount,
    }
}

#[test]
fn test_always_seven_entries_in_calendar_order() {
    // Monday, Tuesday and the following Monday only
    let series =
        DailySeries::from_points(vec![point(1, 100.0), point(2, 50.0), point(8, 200.0)]).unwrap();

    let result = SeasonalityAnalyzer::new().analyze(&series).unwrap();

    assert_eq!(result.days().len(), 7);
    let order: Vec<Weekday> = result.days().iter().map(|d| d.weekday).collect();
    assert_eq!(order, WEEKDAYS.to_vec());

    assert_relative_eq!(result.mean_for(Weekday::Mon).unwrap(), 150.0);
    assert_eq!(result.get(Weekday::Mon).days_observed, 2);
    assert_relative_eq!(result.get(Weekday::Mon).total, 300.0);
    assert_relative_eq!(result.mean_for(Weekday::Tue).unwrap(), 50.0);

    for weekday in [Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
        assert_eq!(result.mean_for(weekday), None);
        assert_eq!(result.get(weekday).days_observed, 0);
    }
}

#[test]
fn test_peak_and_trough_ignore_missing_days() {
    let series =
        DailySeries::from_points(vec![point(1, 100.0), point(2, 50.0), point(6, 300.0)]).unwrap();

    let result = SeasonalityAnalyzer::new().analyze(&series).unwrap();

    assert_eq!(result.peak(), Some(Weekday::Sat));
    assert_eq!(result.trough(), Some(Weekday::Tue));
}

#[test]
fn test_full_weeks_cover_every_weekday() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = (0..14)
        .map(|i| DailyTotal {
            date: start.checked_add_days(Days::new(i)).unwrap(),
            total_amount: 10.0 * (i % 7) as f64,
        })
        .collect();
    let series = DailySeries::from_points(points).unwrap();

    let result = SeasonalityAnalyzer::new().analyze(&series).unwrap();

    assert!(result.days().iter().all(|d| d.mean.is_some()));
    assert_relative_eq!(result.mean_for(Weekday::Sun).unwrap(), 60.0);
}

#[test]
fn test_empty_series_fails() {
    let result = SeasonalityAnalyzer::new().analyze(&DailySeries::default());
    assert!(matches!(result, Err(AnalyticsError::EmptyDataset(_))));
}

#[test]
fn test_deserialize_checks_weekdays() {
    let series = DailySeries::from_points(vec![point(1, 100.0), point(3, 40.0)]).unwrap();
    let result = SeasonalityAnalyzer::new().analyze(&series).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let restored: SeasonalityResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, result);
    assert_relative_eq!(restored.mean_for(Weekday::Wed).unwrap(), 40.0);

    assert!(serde_json::from_str::<SeasonalityResult>(r#"{"days":[]}"#).is_err());
}
