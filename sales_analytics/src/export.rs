//! Writing records and results to CSV and JSON files

use crate::data::SalesRecord;
use crate::error::Result;
use crate::statistics::{sales_by_category, sales_by_product, sales_by_region, GroupTotal};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes exports into one output directory
#[derive(Debug, Clone)]
pub struct DataExporter {
    directory: PathBuf,
}

impl DataExporter {
    /// Create an exporter writing into `directory`
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Get the output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn target(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        Ok(self.directory.join(file_name))
    }

    /// Write the records as CSV with a header row
    pub fn export_records_csv(&self, records: &[SalesRecord], file_name: &str) -> Result<PathBuf> {
        let path = self.target(file_name)?;
        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = records.len(), "Exported records");
        Ok(path)
    }

    /// Write any serializable result as pretty-printed JSON
    pub fn export_json<T: Serialize>(&self, value: &T, file_name: &str) -> Result<PathBuf> {
        let path = self.target(file_name)?;
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, value)?;

        info!(path = %path.display(), "Exported JSON");
        Ok(path)
    }

    /// Write per-category, per-region and per-product totals, one CSV each
    pub fn export_summary_tables(&self, records: &[SalesRecord]) -> Result<Vec<PathBuf>> {
        let tables = [
            ("summary_by_category.csv", sales_by_category(records)),
            ("summary_by_region.csv", sales_by_region(records)),
            ("summary_by_product.csv", sales_by_product(records)),
        ];

        tables
            .iter()
            .map(|(file_name, groups)| self.write_groups(groups, file_name))
            .collect()
    }

    fn write_groups(&self, groups: &[GroupTotal], file_name: &str) -> Result<PathBuf> {
        let path = self.target(file_name)?;
        let mut writer = csv::Writer::from_path(&path)?;
        for group in groups {
            writer.serialize(group)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = groups.len(), "Exported summary table");
        Ok(path)
    }
}
