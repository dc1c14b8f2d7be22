//! Import/export entry points
//!
//! Assembles export documents from a live payload and dispatches imports to
//! the right codec by file extension. Reading the file is the only async step;
//! decoding runs synchronously on the bytes once they are in memory.

use crate::config::InterchangeConfig;
use crate::csv::{CsvExporter, CsvImporter};
use crate::error::{StatusError, StatusResult};
use crate::excel::{AllocationExporter, AllocationImporter, ExcelExporter, ExcelImporter};
use crate::types::{DecodedPayload, ResourceAllocationEntry, StatusPayload};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Report file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// `.csv` or `.xlsx`/`.xls`, case-insensitive
    pub fn detect(file_name: &str) -> StatusResult<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
            Ok(FileFormat::Excel)
        } else {
            Err(StatusError::UnsupportedFileType {
                file: file_name.to_string(),
            })
        }
    }

    /// Extension used for exported reports
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Excel => "xlsx",
        }
    }
}

/// `<prefix>-<YYYY-MM-DD>.<ext>`
pub fn report_file_name(prefix: &str, format: FileFormat, date: NaiveDate) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), format.extension())
}

/// Import/export orchestrator. Holds configuration only; every call works on
/// its own payload.
#[derive(Debug, Clone, Default)]
pub struct Interchange {
    config: InterchangeConfig,
}

impl Interchange {
    pub fn new(config: InterchangeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterchangeConfig {
        &self.config
    }

    pub fn export_csv(&self, payload: &StatusPayload) -> String {
        CsvExporter::new(payload).export()
    }

    pub fn export_spreadsheet(&self, payload: &StatusPayload) -> StatusResult<Vec<u8>> {
        ExcelExporter::new(payload).export()
    }

    /// Write the dated report into `dir` and return its path
    pub async fn write_report(
        &self,
        payload: &StatusPayload,
        dir: &Path,
        format: FileFormat,
        date: NaiveDate,
    ) -> StatusResult<PathBuf> {
        let bytes = match format {
            FileFormat::Csv => self.export_csv(payload).into_bytes(),
            FileFormat::Excel => self.export_spreadsheet(payload)?,
        };
        let path = dir.join(report_file_name(&self.config.report_prefix, format, date));
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), "wrote status report");
        Ok(path)
    }

    /// Decode a report file without merging. The extension is checked before
    /// any parsing.
    pub fn decode_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        existing: &StatusPayload,
    ) -> StatusResult<DecodedPayload> {
        let format = FileFormat::detect(file_name)?;
        let color = self.config.default_milestone_color.as_str();
        match format {
            FileFormat::Csv => {
                let text = String::from_utf8_lossy(bytes);
                Ok(CsvImporter::new(color).import(&text, &existing.milestones))
            }
            FileFormat::Excel => ExcelImporter::new(color).import(bytes, &existing.milestones),
        }
    }

    /// Decode a report file and merge it over `existing`: sections that are
    /// absent or empty in the file keep the existing value.
    pub fn import_from_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        existing: &StatusPayload,
    ) -> StatusResult<StatusPayload> {
        let decoded = self.decode_bytes(file_name, bytes, existing)?;
        debug!(
            project = decoded.project.is_present(),
            milestones = decoded.milestones.is_present(),
            resource_burn = decoded.resource_burn.is_present(),
            revenue = decoded.revenue_data.is_present(),
            gross_margin = decoded.gross_margin.is_present(),
            "decoded report sections"
        );
        Ok(decoded.merge(existing))
    }

    /// Read and import a report file
    pub async fn import_from_file(
        &self,
        path: &Path,
        existing: &StatusPayload,
    ) -> StatusResult<StatusPayload> {
        let file_name = file_name_of(path);
        FileFormat::detect(&file_name)?;

        let bytes = tokio::fs::read(path).await?;
        let payload = self.import_from_bytes(&file_name, &bytes, existing)?;
        info!(file = %file_name, milestones = payload.milestones.len(), "imported status report");
        Ok(payload)
    }

    /// Decode the allocation sheet. Allocation data replaces, never merges.
    pub fn import_resource_allocation_bytes(
        &self,
        bytes: &[u8],
        sheet: Option<&str>,
    ) -> StatusResult<Vec<ResourceAllocationEntry>> {
        let sheet = sheet.unwrap_or(&self.config.allocation_sheet);
        AllocationImporter::new(sheet).import(bytes)
    }

    pub async fn import_resource_allocation(
        &self,
        path: &Path,
        sheet: Option<&str>,
    ) -> StatusResult<Vec<ResourceAllocationEntry>> {
        let bytes = tokio::fs::read(path).await?;
        self.import_resource_allocation_bytes(&bytes, sheet)
    }

    pub fn export_resource_allocation(
        &self,
        entries: &[ResourceAllocationEntry],
    ) -> StatusResult<Vec<u8>> {
        AllocationExporter::new(
            self.config.allocation_sheet.as_str(),
            self.config.allocation_month_labels.clone(),
        )
        .export(entries)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
