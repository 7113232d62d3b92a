//! One-call driver running every analysis over a dataset

use crate::aggregator::TimeSeriesAggregator;
use crate::config::AnalysisConfig;
use crate::correlation::{CorrelationAnalyzer, CorrelationMatrix};
use crate::data::{DailySeries, DailyTotal, SalesRecord};
use crate::error::{AnalyticsError, Result};
use crate::forecast::{Forecaster, Prediction};
use crate::outliers::{OutlierDetector, OutlierReport};
use crate::seasonality::{SeasonalityAnalyzer, SeasonalityResult};
use crate::statistics::{summarize, SalesSummary};
use crate::trend::{TrendAnalyzer, TrendResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Every result produced by [`SalesAnalyzer::run`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Headline statistics
    pub summary: SalesSummary,
    /// Daily totals the trend and seasonality were computed on
    pub series: Vec<DailyTotal>,
    /// Trend, `None` when the data covers a single date
    pub trend: Option<TrendResult>,
    /// Weekly seasonality
    pub seasonality: SeasonalityResult,
    /// Correlation matrix, `None` with a single record
    pub correlation: Option<CorrelationMatrix>,
    /// Outliers of the configured field
    pub outliers: OutlierReport,
    /// Forecast, present whenever `trend` is
    pub prediction: Option<Prediction>,
}

/// Runs the aggregator and every analyzer with one configuration
#[derive(Debug, Clone)]
pub struct SalesAnalyzer {
    config: AnalysisConfig,
    aggregator: TimeSeriesAggregator,
    trend: TrendAnalyzer,
    seasonality: SeasonalityAnalyzer,
    correlation: CorrelationAnalyzer,
    outliers: OutlierDetector,
    forecaster: Forecaster,
}

impl SalesAnalyzer {
    /// Create an analyzer after validating the configuration
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            trend: TrendAnalyzer::from_config(&config)?,
            outliers: OutlierDetector::from_config(&config)?,
            aggregator: TimeSeriesAggregator::new(),
            seasonality: SeasonalityAnalyzer::new(),
            correlation: CorrelationAnalyzer::new(),
            forecaster: Forecaster::new(),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every analysis over `records`.
    ///
    /// Too little data for the trend or the correlation leaves that entry
    /// empty instead of failing the whole run.
    pub fn run(&self, records: &[SalesRecord]) -> Result<AnalysisReport> {
        let series = self.aggregator.aggregate(records)?;

        let (((trend, prediction), seasonality), (correlation, outliers)) = if self.config.parallel
        {
            rayon::join(
                || {
                    rayon::join(
                        || self.trend_and_forecast(&series),
                        || self.seasonality.analyze(&series),
                    )
                },
                || {
                    rayon::join(
                        || self.correlate(records),
                        || self.outliers.detect(records, self.config.outlier_field),
                    )
                },
            )
        } else {
            (
                (
                    self.trend_and_forecast(&series),
                    self.seasonality.analyze(&series),
                ),
                (
                    self.correlate(records),
                    self.outliers.detect(records, self.config.outlier_field),
                ),
            )
        };

        let report = AnalysisReport {
            summary: summarize(records)?,
            series: series.points().to_vec(),
            trend: trend?,
            seasonality: seasonality?,
            correlation: correlation?,
            outliers: outliers?,
            prediction: prediction?,
        };

        info!(
            records = records.len(),
            days = report.series.len(),
            outliers = report.outliers.len(),
            "Analysis complete"
        );
        Ok(report)
    }

    fn trend_and_forecast(
        &self,
        series: &DailySeries,
    ) -> (Result<Option<TrendResult>>, Result<Option<Prediction>>) {
        let trend = match self.trend.analyze(series) {
            Ok(trend) => trend,
            Err(AnalyticsError::InsufficientData(reason)) => {
                warn!(%reason, "Skipping trend and forecast");
                return (Ok(None), Ok(None));
            }
            Err(err) => return (Err(err), Ok(None)),
        };

        let prediction = match series.last_date() {
            Some(last_date) => self
                .forecaster
                .predict(&trend, last_date, self.config.forecast_horizon)
                .map(Some),
            None => Ok(None),
        };

        (Ok(Some(trend)), prediction)
    }

    fn correlate(&self, records: &[SalesRecord]) -> Result<Option<CorrelationMatrix>> {
        match self
            .correlation
            .analyze(records, &self.config.correlation_fields)
        {
            Ok(matrix) => Ok(Some(matrix)),
            Err(AnalyticsError::InsufficientData(reason)) => {
                warn!(%reason, "Skipping correlation");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
