use chrono::NaiveDate;
use sales_analytics::utils::generate_test_records;
use sales_analytics::{
    AnalysisConfig, AnalysisReport, DataExporter, DataLoader, SalesAnalyzer, SalesRecord,
    TrendDirection,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_full_run_on_growing_sales() {
    let records = generate_test_records(28, 4, 100.0, 0.05, 42);
    let analyzer = SalesAnalyzer::new(AnalysisConfig::default()).unwrap();

    let report = analyzer.run(&records).unwrap();

    assert_eq!(report.summary.transactions, 112);
    assert_eq!(report.series.len(), 28);
    let trend = report.trend.as_ref().unwrap();
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert_eq!(report.seasonality.days().len(), 7);
    assert!(report.seasonality.days().iter().all(|d| d.days_observed == 4));
    assert_eq!(report.correlation.as_ref().unwrap().fields().len(), 4);

    let prediction = report.prediction.as_ref().unwrap();
    assert_eq!(prediction.horizon(), 5);
    assert_eq!(
        prediction.points()[0].date,
        NaiveDate::from_ymd_opt(2024, 1, 29).unwrap()
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let records = generate_test_records(21, 5, 80.0, 0.02, 9);

    let sequential = SalesAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .run(&records)
        .unwrap();
    let parallel = SalesAnalyzer::new(AnalysisConfig::default().with_parallel(true))
        .unwrap()
        .run(&records)
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_single_date_skips_trend_and_forecast() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let records = vec![
        SalesRecord::new(date, "Laptop", "Electronics", 900.0, 1, "North"),
        SalesRecord::new(date, "Mouse", "Electronics", 20.0, 2, "South"),
        SalesRecord::new(date, "Desk", "Furniture", 250.0, 1, "North"),
    ];

    let report = SalesAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .run(&records)
        .unwrap();

    assert!(report.trend.is_none());
    assert!(report.prediction.is_none());
    assert!(report.correlation.is_some());
    assert_eq!(report.series.len(), 1);

    let text = report.to_string();
    assert!(text.contains("Not enough distinct dates for a trend"));
    assert!(text.contains("No forecast without a trend"));
}

#[test]
fn test_single_record_skips_correlation() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let records = vec![SalesRecord::new(date, "Laptop", "Electronics", 900.0, 1, "North")];

    let report = SalesAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .run(&records)
        .unwrap();

    assert!(report.correlation.is_none());
    assert_eq!(report.summary.std_dev_amount, None);
    assert!(report.outliers.is_empty());
}

#[test]
fn test_empty_records_fail() {
    let analyzer = SalesAnalyzer::new(AnalysisConfig::default()).unwrap();
    assert!(analyzer.run(&[]).is_err());
}

#[test]
fn test_report_sections() {
    let records = generate_test_records(14, 3, 50.0, 0.0, 3);
    let report = SalesAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .run(&records)
        .unwrap();

    let text = report.to_string();
    for title in [
        "SALES SUMMARY",
        "TREND",
        "WEEKLY SEASONALITY",
        "CORRELATIONS",
        "OUTLIERS",
        "FORECAST",
    ] {
        assert!(text.contains(title), "missing section {}", title);
    }
}

#[test]
fn test_exports() {
    let dir = tempdir().unwrap();
    let records = generate_test_records(10, 2, 120.0, 0.01, 5);
    let report = SalesAnalyzer::new(AnalysisConfig::default())
        .unwrap()
        .run(&records)
        .unwrap();
    let exporter = DataExporter::new(dir.path().join("out"));

    let json_path = exporter.export_json(&report, "report.json").unwrap();
    let restored: AnalysisReport =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(restored.summary.transactions, report.summary.transactions);
    assert_eq!(restored.series.len(), report.series.len());
    assert_eq!(
        restored.trend.map(|t| t.direction),
        report.trend.map(|t| t.direction)
    );

    let csv_path = exporter.export_records_csv(&records, "sales.csv").unwrap();
    let reloaded = DataLoader::from_path(&csv_path).unwrap();
    assert_eq!(reloaded, records);

    let tables = exporter.export_summary_tables(&records).unwrap();
    assert_eq!(tables.len(), 3);
    assert!(tables.iter().all(|p| p.exists()));
}
