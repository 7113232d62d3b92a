//! Plain-text rendering of analysis results

use crate::analyzer::AnalysisReport;
use crate::correlation::CorrelationMatrix;
use crate::forecast::Prediction;
use crate::outliers::OutlierReport;
use crate::seasonality::SeasonalityResult;
use crate::statistics::{GroupTotal, SalesSummary};
use crate::trend::TrendResult;
use std::fmt;

/// Format an amount as currency with thousands separators, e.g. `$1,234.56`
pub fn format_currency(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(50))?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(50))
}

/// Render a ranked group breakdown, one line per key
pub fn format_groups(groups: &[GroupTotal]) -> String {
    groups
        .iter()
        .map(|g| format!("  {}: {}\n", g.key, format_currency(g.total_amount)))
        .collect()
}

impl fmt::Display for SalesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transactions:        {}", self.transactions)?;
        writeln!(f, "Total sales:         {}", format_currency(self.total_amount))?;
        writeln!(f, "Mean per sale:       {}", format_currency(self.mean_amount))?;
        writeln!(f, "Median sale:         {}", format_currency(self.median_amount))?;
        writeln!(f, "Largest sale:        {}", format_currency(self.max_amount))?;
        writeln!(f, "Smallest sale:       {}", format_currency(self.min_amount))?;
        match self.std_dev_amount {
            Some(sd) => writeln!(f, "Standard deviation:  {}", format_currency(sd))?,
            None => writeln!(f, "Standard deviation:  n/a")?,
        }
        writeln!(f, "Units sold:          {}", self.total_quantity)?;
        writeln!(f, "Mean units per sale: {:.2}", self.mean_quantity)
    }
}

impl fmt::Display for TrendResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Direction: {}", self.direction)?;
        writeln!(f, "Slope:     {:.2} per day", self.slope)?;
        writeln!(f, "Intercept: {:.2} (at {})", self.intercept, self.first_date)?;
        writeln!(f, "R²:        {:.4}", self.r_squared)
    }
}

impl fmt::Display for SeasonalityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.days() {
            match day.mean {
                Some(mean) => writeln!(
                    f,
                    "  {}: {} (mean over {} days)",
                    day.weekday,
                    format_currency(mean),
                    day.days_observed
                )?,
                None => writeln!(f, "  {}: no data", day.weekday)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>15}", "")?;
        for field in self.fields() {
            write!(f, "{:>15}", field.name())?;
        }
        writeln!(f)?;

        for (field, row) in self.fields().iter().zip(self.rows()) {
            write!(f, "{:>15}", field.name())?;
            for value in row {
                write!(f, "{:>15}", value.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Field {}: Q1 {:.2}, Q3 {:.2}, IQR {:.2}",
            self.field, self.q1, self.q3, self.iqr
        )?;
        writeln!(
            f,
            "Bounds: [{:.2}, {:.2}], {} outlier(s)",
            self.lower_bound,
            self.upper_bound,
            self.outliers.len()
        )?;
        for flagged in &self.outliers {
            writeln!(
                f,
                "  #{} {} {} ({}): {:.2}",
                flagged.index,
                flagged.record.date,
                flagged.record.product,
                flagged.record.region,
                flagged.value
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in self.points() {
            writeln!(f, "  {}: {}", point.date, format_currency(point.predicted_amount))?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "SALES SUMMARY")?;
        write!(f, "{}", self.summary)?;

        section(f, "TREND")?;
        match &self.trend {
            Some(trend) => write!(f, "{}", trend)?,
            None => writeln!(f, "Not enough distinct dates for a trend")?,
        }

        section(f, "WEEKLY SEASONALITY")?;
        write!(f, "{}", self.seasonality)?;
        if let (Some(peak), Some(trough)) = (self.seasonality.peak(), self.seasonality.trough()) {
            writeln!(f, "Best day: {}, weakest day: {}", peak, trough)?;
        }

        section(f, "CORRELATIONS")?;
        match &self.correlation {
            Some(matrix) => write!(f, "{}", matrix)?,
            None => writeln!(f, "Not enough records for correlation")?,
        }

        section(f, "OUTLIERS")?;
        write!(f, "{}", self.outliers)?;

        section(f, "FORECAST")?;
        match &self.prediction {
            Some(prediction) => write!(f, "{}", prediction)?,
            None => writeln!(f, "No forecast without a trend")?,
        }
        Ok(())
    }
}
