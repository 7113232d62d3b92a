//! # Sales Insight
//!
//! Umbrella crate for the sales analysis workspace. It re-exports
//! [`sales_analytics`], the analysis engine, and [`sales_math`], the
//! numeric kernels it is built on.
//!
//! ## Example
//!
//! ```
//! use sales_insight::analytics::utils::generate_test_records;
//! use sales_insight::analytics::{AnalysisConfig, SalesAnalyzer};
//!
//! let records = generate_test_records(14, 3, 100.0, 0.02, 1);
//! let report = SalesAnalyzer::new(AnalysisConfig::default())?.run(&records)?;
//!
//! assert_eq!(report.seasonality.days().len(), 7);
//! assert!(report.trend.is_some());
//! # Ok::<(), sales_insight::analytics::AnalyticsError>(())
//! ```

pub use sales_analytics as analytics;
pub use sales_math as math;

/// Analyze already loaded records with the default configuration
pub fn analyze(
    records: &[analytics::SalesRecord],
) -> analytics::Result<analytics::AnalysisReport> {
    analytics::SalesAnalyzer::new(analytics::AnalysisConfig::default())?.run(records)
}
