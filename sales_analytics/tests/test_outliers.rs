use approx::assert_relative_eq;
use chrono::NaiveDate;
use rstest::rstest;
use sales_analytics::{AnalyticsError, NumericField, OutlierDetector, SalesRecord};

fn records_with_amounts(amounts: &[f64]) -> Vec<SalesRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            SalesRecord::new(
                NaiveDate::from_ymd_opt(2024, 4, 1 + i as u32).unwrap(),
                format!("Product {}", i),
                "General",
                amount,
                (i + 1) as u32,
                "West",
            )
        })
        .collect()
}

#[test]
fn test_flags_extreme_value_with_original_index() {
    let records = records_with_amounts(&[10.0, 12.0, 11.0, 13.0, 12.0, 100.0]);

    let report = OutlierDetector::new()
        .detect(&records, NumericField::Amount)
        .unwrap();

    assert_relative_eq!(report.q1, 11.25);
    assert_relative_eq!(report.q3, 12.75);
    assert_relative_eq!(report.iqr, 1.5);
    assert_relative_eq!(report.lower_bound, 9.0);
    assert_relative_eq!(report.upper_bound, 15.0);

    assert_eq!(report.indices(), vec![5]);
    assert_eq!(report.outliers[0].record, records[5]);
    assert_relative_eq!(report.outliers[0].value, 100.0);
}

#[test]
fn test_preserves_input_order_not_magnitude() {
    let records = records_with_amounts(&[500.0, 10.0, 11.0, 12.0, 11.0, 10.0, 12.0, 0.0, 90.0]);

    let report = OutlierDetector::new()
        .detect(&records, NumericField::Amount)
        .unwrap();

    assert_eq!(report.indices(), vec![0, 7, 8]);
}

#[test]
fn test_degenerate_iqr_flags_any_deviation() {
    let records = records_with_amounts(&[5.0, 5.0, 5.0, 5.0, 5.0, 6.0]);

    let report = OutlierDetector::new()
        .detect(&records, NumericField::Amount)
        .unwrap();

    assert_eq!(report.iqr, 0.0);
    assert_eq!(report.lower_bound, 5.0);
    assert_eq!(report.upper_bound, 5.0);
    assert_eq!(report.indices(), vec![5]);
}

#[test]
fn test_constant_values_have_no_outliers() {
    let records = records_with_amounts(&[7.0; 5]);

    let report = OutlierDetector::new()
        .detect(&records, NumericField::Amount)
        .unwrap();

    assert!(report.is_empty());
}

#[rstest]
#[case(1.5, vec![5])]
#[case(100.0, vec![])]
fn test_multiplier_widens_fences(#[case] multiplier: f64, #[case] expected: Vec<usize>) {
    let records = records_with_amounts(&[10.0, 12.0, 11.0, 13.0, 12.0, 100.0]);

    let report = OutlierDetector::with_multiplier(multiplier)
        .unwrap()
        .detect(&records, NumericField::Amount)
        .unwrap();

    assert_eq!(report.indices(), expected);
}

#[test]
fn test_other_fields() {
    // quantities are 1..=6, no outliers
    let records = records_with_amounts(&[10.0, 12.0, 11.0, 13.0, 12.0, 100.0]);

    let report = OutlierDetector::new()
        .detect(&records, NumericField::Quantity)
        .unwrap();

    assert_eq!(report.field, NumericField::Quantity);
    assert!(report.is_empty());
}

#[test]
fn test_errors() {
    assert!(matches!(
        OutlierDetector::new().detect(&[], NumericField::Amount),
        Err(AnalyticsError::EmptyDataset(_))
    ));
    assert!(matches!(
        OutlierDetector::with_multiplier(0.0),
        Err(AnalyticsError::InvalidArgument(_))
    ));
}
