//! Descriptive statistics and group-by breakdowns of the records

use crate::data::SalesRecord;
use crate::error::{AnalyticsError, Result};
use sales_math::quantile;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Headline statistics of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Number of transactions
    pub transactions: usize,
    /// Sum of all amounts
    pub total_amount: f64,
    /// Mean amount per transaction
    pub mean_amount: f64,
    /// Median amount per transaction
    pub median_amount: f64,
    /// Largest single amount
    pub max_amount: f64,
    /// Smallest single amount
    pub min_amount: f64,
    /// Sample standard deviation of the amounts, `None` with fewer than 2
    pub std_dev_amount: Option<f64>,
    /// Units sold overall
    pub total_quantity: u64,
    /// Mean units per transaction
    pub mean_quantity: f64,
}

/// Totals for one group of records sharing a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// Group key (category, region or product)
    pub key: String,
    /// Sum of amounts
    pub total_amount: f64,
    /// Mean amount per transaction
    pub mean_amount: f64,
    /// Number of transactions
    pub transactions: usize,
    /// Units sold
    pub quantity: u64,
}

/// Compute the headline statistics
pub fn summarize(records: &[SalesRecord]) -> Result<SalesSummary> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset(
            "No data to summarize".to_string(),
        ));
    }

    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let total_quantity: u64 = records.iter().map(|r| r.quantity as u64).sum();

    let std_dev_amount = if amounts.len() >= 2 {
        Some(amounts.iter().std_dev())
    } else {
        None
    };

    Ok(SalesSummary {
        transactions: records.len(),
        total_amount: amounts.iter().sum(),
        mean_amount: amounts.iter().mean(),
        median_amount: quantile(&amounts, 0.5)?,
        max_amount: amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min_amount: amounts.iter().copied().fold(f64::INFINITY, f64::min),
        std_dev_amount,
        total_quantity,
        mean_quantity: total_quantity as f64 / records.len() as f64,
    })
}

fn group_by<F>(records: &[SalesRecord], key: F) -> Vec<GroupTotal>
where
    F: Fn(&SalesRecord) -> &str,
{
    let mut groups: BTreeMap<&str, (f64, usize, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0.0, 0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
        entry.2 += record.quantity as u64;
    }

    let mut totals: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(key, (total_amount, transactions, quantity))| GroupTotal {
            key: key.to_string(),
            total_amount,
            mean_amount: total_amount / transactions as f64,
            transactions,
            quantity,
        })
        .collect();

    // Stable sort keeps alphabetical order between equal totals
    totals.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    totals
}

/// Sales per category, largest first
pub fn sales_by_category(records: &[SalesRecord]) -> Vec<GroupTotal> {
    group_by(records, |r| r.category.as_str())
}

/// Sales per region, largest first
pub fn sales_by_region(records: &[SalesRecord]) -> Vec<GroupTotal> {
    group_by(records, |r| r.region.as_str())
}

/// Sales per product, largest first
pub fn sales_by_product(records: &[SalesRecord]) -> Vec<GroupTotal> {
    group_by(records, |r| r.product.as_str())
}

/// Products ranked by units sold, optionally keeping only the first `top_n`
pub fn top_products_by_quantity(records: &[SalesRecord], top_n: Option<usize>) -> Vec<GroupTotal> {
    let mut products = group_by(records, |r| r.product.as_str());
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    if let Some(n) = top_n {
        products.truncate(n);
    }
    products
}
