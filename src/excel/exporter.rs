//! Excel exporter implementation

use crate::error::{StatusError, StatusResult};
use crate::rows::{encode_report, Row};
use crate::scalar::CellValue;
use crate::types::StatusPayload;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Excel exporter for status reports
pub struct ExcelExporter<'a> {
    payload: &'a StatusPayload,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(payload: &'a StatusPayload) -> Self {
        Self { payload }
    }

    /// Build the workbook in memory
    pub fn export(&self) -> StatusResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        // One worksheet per section, in report order
        for (section, rows) in encode_report(self.payload) {
            write_table(&mut workbook, section.sheet_name(), section.columns(), &rows)?;
        }

        tracing::debug!(
            milestones = self.payload.milestones.len(),
            "built Excel report workbook"
        );

        workbook
            .save_to_buffer()
            .map_err(|e| StatusError::Export(format!("Failed to build Excel workbook: {}", e)))
    }

    /// Export the report to an .xlsx file
    pub fn export_to_path(&self, output_path: &Path) -> StatusResult<()> {
        let bytes = self.export()?;
        std::fs::write(output_path, bytes)?;
        Ok(())
    }
}

/// Add a worksheet holding a header row plus one row per record
pub(crate) fn write_table<H: AsRef<str>>(
    workbook: &mut Workbook,
    sheet_name: &str,
    headers: &[H],
    rows: &[Row],
) -> StatusResult<()> {
    let cells: Vec<Vec<CellValue>> = rows
        .iter()
        .map(|row| headers.iter().map(|h| row.get(h.as_ref()).clone()).collect())
        .collect();
    write_grid(workbook, sheet_name, headers, &cells)
}

/// Add a worksheet holding a header row plus positional data rows. Cell `i`
/// of each row lands under header `i`, so repeated headers keep their own
/// values.
pub(crate) fn write_grid<H: AsRef<str>>(
    workbook: &mut Workbook,
    sheet_name: &str,
    headers: &[H],
    rows: &[Vec<CellValue>],
) -> StatusResult<()> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| StatusError::Export(format!("Failed to set worksheet name: {}", e)))?;

    // Header row (row 0)
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, header.as_ref())
            .map_err(|e| StatusError::Export(format!("Failed to write header: {}", e)))?;
    }

    // Data rows (starting at row 1)
    for (row_idx, cells) in rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, value) in cells.iter().enumerate() {
            write_cell(worksheet, excel_row, col_idx as u16, value)?;
        }
    }

    Ok(())
}

/// Write a single cell, keeping numbers numeric. Blank cells stay unwritten.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> StatusResult<()> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) if text.is_empty() => {}
        CellValue::Text(text) => {
            worksheet
                .write_string(row, col, text.as_str())
                .map_err(|e| StatusError::Export(format!("Failed to write text: {}", e)))?;
        }
        CellValue::Number(n) => {
            worksheet
                .write_number(row, col, *n)
                .map_err(|e| StatusError::Export(format!("Failed to write number: {}", e)))?;
        }
        CellValue::Bool(b) => {
            worksheet
                .write_boolean(row, col, *b)
                .map_err(|e| StatusError::Export(format!("Failed to write boolean: {}", e)))?;
        }
    }
    Ok(())
}
