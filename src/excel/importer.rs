//! Excel importer implementation - Excel (.xlsx/.xls) → report records

use crate::error::{StatusError, StatusResult};
use crate::rows::{ReportSection, Row};
use crate::scalar::CellValue;
use crate::types::{DecodedPayload, Milestone};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

/// Excel importer for status report workbooks
pub struct ExcelImporter {
    default_color: String,
}

impl ExcelImporter {
    /// `default_color` goes to decoded milestones with no existing counterpart
    pub fn new(default_color: impl Into<String>) -> Self {
        Self {
            default_color: default_color.into(),
        }
    }

    /// Decode every report sheet present in the workbook
    pub fn import(
        &self,
        bytes: &[u8],
        existing_milestones: &[Milestone],
    ) -> StatusResult<DecodedPayload> {
        let mut workbook = open_workbook(bytes)?;
        let sheet_names = workbook.sheet_names();

        let mut tables: HashMap<ReportSection, Vec<Row>> = HashMap::new();
        for section in ReportSection::ALL {
            let name = section.sheet_name();
            if !sheet_names.iter().any(|s| s == name) {
                debug!(sheet = name, "report sheet absent");
                continue;
            }

            let range = workbook.worksheet_range(name).map_err(|e| {
                StatusError::Import(format!("Failed to read sheet '{}': {}", name, e))
            })?;
            let (_, rows) = read_table(&range);
            debug!(sheet = name, rows = rows.len(), "read report sheet");
            tables.insert(section, rows);
        }

        Ok(DecodedPayload::from_sections(
            |section| tables.remove(&section),
            existing_milestones,
            &self.default_color,
        ))
    }
}

/// Open an in-memory .xlsx/.xls/.ods workbook; the format is sniffed from the bytes
pub(crate) fn open_workbook(bytes: &[u8]) -> StatusResult<Sheets<Cursor<Vec<u8>>>> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| StatusError::Import(format!("Failed to open Excel file: {}", e)))
}

/// Read a header row plus data rows. Blank header cells drop their column and
/// fully blank rows are skipped.
pub(crate) fn read_table(range: &Range<Data>) -> (Vec<String>, Vec<Row>) {
    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return (Vec::new(), Vec::new());
    };

    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| cell_value(cell).to_string().trim().to_string())
        .collect();

    let records = rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), cell_value(cell)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_blank())
        .collect();

    (headers, records)
}

/// Convert a calamine cell. Date-typed cells become ISO date text so they
/// decode like the text dates the exporter writes.
pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match serial_to_iso(dt.as_f64()) {
            Some(date) => CellValue::Text(date),
            None => CellValue::Number(dt.as_f64()),
        },
    }
}

/// Excel serial day number (1900 system) to `YYYY-MM-DD`
fn serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_days(Days::new(serial.floor() as u64))?;
    Some(date.format("%Y-%m-%d").to_string())
}
