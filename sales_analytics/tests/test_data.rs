use chrono::NaiveDate;
use sales_analytics::data::field_values;
use sales_analytics::{AnalyticsError, DailySeries, DailyTotal, DataLoader, NumericField, SalesRecord};
use std::io::Write;
use tempfile::NamedTempFile;

const SPANISH_CSV: &str = "\
fecha,producto,categoria,ventas,cantidad,region
2024-01-01,Laptop,Electronica,1200.50,1,Norte
2024-01-01,Mouse,Electronica,25.00,3,Sur
2024-01-02,Silla,Muebles,150.00,2,Norte
";

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SPANISH_CSV.as_bytes()).unwrap();

    let records = DataLoader::from_path(file.path()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0],
        SalesRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Laptop",
            "Electronica",
            1200.50,
            1,
            "Norte"
        )
    );
}

#[test]
fn test_english_headers_any_case_and_extra_columns() {
    let csv = "\
Date,Product,Category,Amount,Quantity,Region,Notes
2024-03-05,Desk,Furniture,300,2,West,paid
2024-03-06 00:00:00,Lamp,Furniture,45.5,1.0,East,
";

    let records = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    assert_eq!(records[1].quantity, 1);
}

#[test]
fn test_invalid_rows_are_dropped() {
    let csv = "\
date,product,category,amount,quantity,region
2024-01-01,Laptop,Electronics,100,1,North
not-a-date,Laptop,Electronics,100,1,North
2024-01-02,Laptop,Electronics,abc,1,North
2024-01-03,Laptop,Electronics,-5,1,North
2024-01-04,Laptop,Electronics,10,2.5,North
2024-01-05,,Electronics,10,1,North
2024-01-06,Mouse,Electronics,20,2,South
";

    let records = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].product, "Mouse");
}

#[test]
fn test_missing_columns_are_reported() {
    let csv = "date,product,amount\n2024-01-01,Laptop,100\n";

    match DataLoader::from_reader(csv.as_bytes()) {
        Err(AnalyticsError::DataError(msg)) => {
            assert!(msg.contains("category"));
            assert!(msg.contains("quantity"));
            assert!(msg.contains("region"));
        }
        other => panic!("Expected DataError, got {:?}", other),
    }
}

#[test]
fn test_no_valid_rows_is_empty_dataset() {
    let csv = "date,product,category,amount,quantity,region\n";
    assert!(matches!(
        DataLoader::from_reader(csv.as_bytes()),
        Err(AnalyticsError::EmptyDataset(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        DataLoader::from_path("/nonexistent/sales.csv"),
        Err(AnalyticsError::Io(_))
    ));
}

#[test]
fn test_series_rejects_unordered_dates() {
    let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    let points = vec![
        DailyTotal { date: day(2), total_amount: 1.0 },
        DailyTotal { date: day(2), total_amount: 2.0 },
    ];
    assert!(matches!(
        DailySeries::from_points(points),
        Err(AnalyticsError::InvalidArgument(_))
    ));

    let points = vec![
        DailyTotal { date: day(3), total_amount: 1.0 },
        DailyTotal { date: day(1), total_amount: 2.0 },
    ];
    assert!(DailySeries::from_points(points).is_err());
}

#[test]
fn test_numeric_field_parsing() {
    assert_eq!("amount".parse::<NumericField>().unwrap(), NumericField::Amount);
    assert_eq!("Cantidad".parse::<NumericField>().unwrap(), NumericField::Quantity);
    assert_eq!(
        "region_num".parse::<NumericField>().unwrap(),
        NumericField::RegionCode
    );
    assert!(matches!(
        "price".parse::<NumericField>(),
        Err(AnalyticsError::InvalidArgument(_))
    ));
}

#[test]
fn test_code_fields_use_sorted_levels() {
    let records = DataLoader::from_reader(SPANISH_CSV.as_bytes()).unwrap();

    assert_eq!(field_values(&records, NumericField::CategoryCode), vec![0.0, 0.0, 1.0]);
    assert_eq!(field_values(&records, NumericField::RegionCode), vec![0.0, 1.0, 0.0]);
    assert_eq!(field_values(&records, NumericField::Quantity), vec![1.0, 3.0, 2.0]);
}
