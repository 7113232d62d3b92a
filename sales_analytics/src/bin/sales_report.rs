use clap::Parser;
use sales_analytics::report::format_groups;
use sales_analytics::statistics::{sales_by_category, sales_by_region};
use sales_analytics::{AnalysisConfig, DataExporter, DataLoader, SalesAnalyzer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Analyze a CSV file of sales transactions and print a report
#[derive(Parser, Debug)]
#[command(name = "sales_report", version, about)]
struct Cli {
    /// CSV file with date, product, category, amount, quantity and region columns
    input: PathBuf,

    /// JSON file overriding the default analysis configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of days to forecast
    #[arg(long)]
    horizon: Option<usize>,

    /// Run independent analyses in parallel
    #[arg(long)]
    parallel: bool,

    /// Directory to write the JSON report and summary tables into
    #[arg(long)]
    export: Option<PathBuf>,
}

fn run(cli: Cli) -> sales_analytics::Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        config = config.with_forecast_horizon(horizon)?;
    }
    if cli.parallel {
        config = config.with_parallel(true);
    }

    let records = DataLoader::from_path(&cli.input)?;
    let analyzer = SalesAnalyzer::new(config)?;
    let report = analyzer.run(&records)?;

    println!("{}", report);
    println!("Sales by category:");
    print!("{}", format_groups(&sales_by_category(&records)));
    println!("Sales by region:");
    print!("{}", format_groups(&sales_by_region(&records)));

    if let Some(directory) = cli.export {
        let exporter = DataExporter::new(directory);
        exporter.export_json(&report, "analysis_report.json")?;
        exporter.export_records_csv(&records, "processed_sales.csv")?;
        exporter.export_summary_tables(&records)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install the logging subscriber");
    }

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Sales analysis failed");
            ExitCode::FAILURE
        }
    }
}
