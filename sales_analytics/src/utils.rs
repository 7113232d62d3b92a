//! Utility functions for the sales_analytics crate

use crate::data::SalesRecord;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CATALOGUE: [(&str, &str); 6] = [
    ("Laptop", "Electronics"),
    ("Mouse", "Electronics"),
    ("Monitor", "Electronics"),
    ("Desk", "Furniture"),
    ("Chair", "Furniture"),
    ("Notebook", "Stationery"),
];

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

/// Generate synthetic sales records for tests and demos
///
/// # Arguments
/// * `num_days` - Number of consecutive days, starting 2024-01-01
/// * `sales_per_day` - Transactions generated for each day
/// * `base_amount` - Typical amount of a single sale on the first day
/// * `daily_growth` - Relative growth of the typical amount per day
/// * `seed` - Seed for the random generator, so runs are reproducible
///
/// # Returns
/// * Records in date order
pub fn generate_test_records(
    num_days: usize,
    sales_per_day: usize,
    base_amount: f64,
    daily_growth: f64,
    seed: u64,
) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(num_days * sales_per_day);

    let Some(base_date) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        return records;
    };

    for day in 0..num_days {
        let Some(date) = base_date.checked_add_days(Days::new(day as u64)) else {
            break;
        };
        let typical = base_amount * (1.0 + daily_growth * day as f64);

        for _ in 0..sales_per_day {
            let (product, category) = CATALOGUE[rng.gen_range(0..CATALOGUE.len())];
            let region = REGIONS[rng.gen_range(0..REGIONS.len())];
            let quantity = rng.gen_range(1..=10u32);
            // +/- 20% noise around the typical sale
            let amount = (typical * rng.gen_range(0.8..1.2)).max(0.0);

            records.push(SalesRecord::new(
                date,
                product,
                category,
                (amount * 100.0).round() / 100.0,
                quantity,
                region,
            ));
        }
    }

    records
}
