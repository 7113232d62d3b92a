//! # Sales Analytics
//!
//! Analysis engine for dated sales transactions.
//!
//! ## Features
//!
//! - Daily aggregation of transactions
//! - Linear trend with goodness of fit and direction
//! - Weekly seasonality that always reports all seven weekdays
//! - Pearson correlation between numeric fields, with undefined pairs flagged
//! - IQR fence outlier detection preserving input order
//! - Linear forecast of the next days
//! - CSV loading, summary statistics, text reports and CSV/JSON export
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_analytics::{
//!     DataLoader, Forecaster, SeasonalityAnalyzer, TimeSeriesAggregator, TrendAnalyzer,
//! };
//!
//! let records = DataLoader::from_path("sales.csv")?;
//! let series = TimeSeriesAggregator::new().aggregate(&records)?;
//!
//! let trend = TrendAnalyzer::new().analyze(&series)?;
//! println!("Sales are {} (R² {:.2})", trend.direction, trend.r_squared);
//!
//! let seasonality = SeasonalityAnalyzer::new().analyze(&series)?;
//! println!("{}", seasonality);
//!
//! if let Some(last_date) = series.last_date() {
//!     let prediction = Forecaster::new().predict(&trend, last_date, 7)?;
//!     println!("{}", prediction);
//! }
//! # Ok::<(), sales_analytics::AnalyticsError>(())
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod correlation;
pub mod data;
pub mod error;
pub mod export;
pub mod forecast;
pub mod outliers;
pub mod report;
pub mod seasonality;
pub mod statistics;
pub mod trend;
pub mod utils;

// Re-export commonly used types
pub use crate::aggregator::TimeSeriesAggregator;
pub use crate::analyzer::{AnalysisReport, SalesAnalyzer};
pub use crate::config::AnalysisConfig;
pub use crate::correlation::{Correlation, CorrelationAnalyzer, CorrelationMatrix};
pub use crate::data::{DailySeries, DailyTotal, DataLoader, NumericField, SalesRecord};
pub use crate::error::{AnalyticsError, Result};
pub use crate::export::DataExporter;
pub use crate::forecast::{Forecaster, PredictedPoint, Prediction};
pub use crate::outliers::{FlaggedRecord, OutlierDetector, OutlierReport};
pub use crate::seasonality::{SeasonalityAnalyzer, SeasonalityResult, WeekdayStat};
pub use crate::statistics::{GroupTotal, SalesSummary};
pub use crate::trend::{TrendAnalyzer, TrendDirection, TrendResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
