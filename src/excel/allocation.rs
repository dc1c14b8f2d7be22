//! Monthly resource allocation sheet
//!
//! The sheet is wide and hand-maintained, so columns are found by header
//! text rather than position. Every column strictly between "Cost Per Month"
//! and "Total Cost" is a month column, whatever its label says.

use super::exporter::write_grid;
use super::importer::{cell_value, open_workbook};
use crate::error::{StatusError, StatusResult};
use crate::scalar::{decode_number, CellValue};
use crate::types::{ResourceAllocationEntry, ALLOCATION_MONTHS};
use calamine::{Data, Reader};
use rust_xlsxwriter::Workbook;
use tracing::{debug, info, warn};

/// Required headers, matched exactly
pub const ALLOCATION_HEADERS: [&str; 12] = [
    "TRIM",
    "Project Code",
    "Project Name",
    "Emp ID",
    "Employee Name",
    "Emp/Contractor",
    "Band",
    "Working",
    "Location",
    "Role",
    "Cost Per Month",
    "Total Cost",
];

/// Column indexes resolved once per import
#[derive(Debug, Clone, PartialEq)]
struct ColumnLayout {
    trim: usize,
    project_code: usize,
    project_name: usize,
    emp_id: usize,
    employee_name: usize,
    emp_type: usize,
    band: usize,
    working: usize,
    location: usize,
    role: usize,
    cost_per_month: usize,
    total_cost: usize,
    months: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(sheet: &str, headers: &[String]) -> StatusResult<Self> {
        let mut resolved = [0usize; ALLOCATION_HEADERS.len()];
        let mut missing = Vec::new();
        for (slot, label) in resolved.iter_mut().zip(ALLOCATION_HEADERS) {
            match headers.iter().position(|h| h == label) {
                Some(idx) => *slot = idx,
                None => missing.push(label.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(StatusError::MissingColumns {
                sheet: sheet.to_string(),
                columns: missing,
            });
        }

        let [trim, project_code, project_name, emp_id, employee_name, emp_type, band, working, location, role, cost_per_month, total_cost] =
            resolved;

        let mut months: Vec<usize> = (cost_per_month + 1..total_cost).collect();
        if months.len() > ALLOCATION_MONTHS {
            warn!(
                sheet = %sheet,
                found = months.len(),
                kept = ALLOCATION_MONTHS,
                "extra month columns ignored"
            );
            months.truncate(ALLOCATION_MONTHS);
        }

        Ok(Self {
            trim,
            project_code,
            project_name,
            emp_id,
            employee_name,
            emp_type,
            band,
            working,
            location,
            role,
            cost_per_month,
            total_cost,
            months,
        })
    }

    /// Decode one data row; `None` for rows without an employee name
    fn entry(&self, cells: &[Data]) -> Option<ResourceAllocationEntry> {
        let cell = |idx: usize| cells.get(idx).map(cell_value).unwrap_or_default();
        let text = |idx: usize| cell(idx).to_string();
        let number = |idx: usize| decode_number(&cell(idx)).unwrap_or(0.0);

        let employee_name = cell(self.employee_name);
        if employee_name.is_blank() {
            return None;
        }

        let mut months = [0.0; ALLOCATION_MONTHS];
        for (slot, &col) in months.iter_mut().zip(&self.months) {
            *slot = number(col);
        }

        Some(ResourceAllocationEntry {
            trim: text(self.trim),
            project_code: text(self.project_code),
            project_name: text(self.project_name),
            emp_id: text(self.emp_id),
            employee_name: employee_name.to_string(),
            emp_type: text(self.emp_type),
            band: text(self.band),
            working: text(self.working),
            location: text(self.location),
            role: text(self.role),
            cost_per_month: number(self.cost_per_month),
            total_cost: number(self.total_cost),
            months,
        })
    }
}

/// Reads the monthly resource allocation sheet
pub struct AllocationImporter {
    sheet: String,
}

impl AllocationImporter {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
        }
    }

    /// Decode every employee row. A missing sheet or required header fails
    /// the whole import.
    pub fn import(&self, bytes: &[u8]) -> StatusResult<Vec<ResourceAllocationEntry>> {
        let mut workbook = open_workbook(bytes)?;
        let sheet_names = workbook.sheet_names();
        if !sheet_names.contains(&self.sheet) {
            return Err(StatusError::SheetNotFound {
                sheet: self.sheet.clone(),
                available: sheet_names,
            });
        }

        let range = workbook.worksheet_range(&self.sheet).map_err(|e| {
            StatusError::Import(format!("Failed to read sheet '{}': {}", self.sheet, e))
        })?;

        let rows: Vec<&[Data]> = range.rows().collect();
        if rows.len() < 2 {
            return Err(StatusError::EmptySheet {
                sheet: self.sheet.clone(),
            });
        }

        let headers: Vec<String> = rows[0].iter().map(|c| cell_value(c).to_string()).collect();
        let layout = ColumnLayout::resolve(&self.sheet, &headers)?;
        debug!(months = layout.months.len(), "resolved allocation columns");

        let entries: Vec<ResourceAllocationEntry> =
            rows[1..].iter().filter_map(|cells| layout.entry(cells)).collect();

        info!(
            sheet = %self.sheet,
            imported = entries.len(),
            skipped = rows.len() - 1 - entries.len(),
            "imported resource allocation"
        );
        Ok(entries)
    }
}

/// Writes allocation entries as a wide sheet the importer can read back
pub struct AllocationExporter {
    sheet: String,
    month_labels: Vec<String>,
}

impl AllocationExporter {
    /// At most twelve month labels are used
    pub fn new(sheet: impl Into<String>, month_labels: Vec<String>) -> Self {
        let mut month_labels = month_labels;
        month_labels.truncate(ALLOCATION_MONTHS);
        Self {
            sheet: sheet.into(),
            month_labels,
        }
    }

    /// Header row: the fixed columns with the month columns before "Total Cost"
    pub fn headers(&self) -> Vec<String> {
        let (fixed, total) = ALLOCATION_HEADERS.split_at(ALLOCATION_HEADERS.len() - 1);
        fixed
            .iter()
            .map(|h| h.to_string())
            .chain(self.month_labels.iter().cloned())
            .chain(total.iter().map(|h| h.to_string()))
            .collect()
    }

    /// Write the wide sheet. Month labels may repeat, but a month label equal
    /// to a fixed header would make the sheet unreadable on import.
    pub fn export(&self, entries: &[ResourceAllocationEntry]) -> StatusResult<Vec<u8>> {
        if let Some(label) = self
            .month_labels
            .iter()
            .find(|label| ALLOCATION_HEADERS.contains(&label.as_str()))
        {
            return Err(StatusError::Export(format!(
                "Month label \"{}\" collides with a fixed allocation column",
                label
            )));
        }

        let rows: Vec<Vec<CellValue>> = entries.iter().map(|entry| self.to_cells(entry)).collect();

        let mut workbook = Workbook::new();
        write_grid(&mut workbook, &self.sheet, &self.headers(), &rows)?;
        workbook
            .save_to_buffer()
            .map_err(|e| StatusError::Export(format!("Failed to build Excel workbook: {}", e)))
    }

    /// Cells in header order: fixed columns, months, then "Total Cost"
    fn to_cells(&self, entry: &ResourceAllocationEntry) -> Vec<CellValue> {
        let mut cells: Vec<CellValue> = [
            &entry.trim,
            &entry.project_code,
            &entry.project_name,
            &entry.emp_id,
            &entry.employee_name,
            &entry.emp_type,
            &entry.band,
            &entry.working,
            &entry.location,
            &entry.role,
        ]
        .into_iter()
        .map(|text| CellValue::from(text.as_str()))
        .collect();
        cells.push(CellValue::Number(entry.cost_per_month));
        cells.extend(
            entry.months[..self.month_labels.len()]
                .iter()
                .map(|&value| CellValue::Number(value)),
        );
        cells.push(CellValue::Number(entry.total_cost));
        cells
    }
}
