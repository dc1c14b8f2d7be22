//! Excel import/export for status reports
//!
//! - Export: one worksheet per report section ("Project Info", "Milestones", ...)
//! - Import: reads whichever of those worksheets exist; missing ones stay absent
//! - Resource allocation: a separate wide sheet whose columns are located by
//!   header text

mod allocation;
mod exporter;
mod importer;

pub use allocation::{AllocationExporter, AllocationImporter, ALLOCATION_HEADERS};
pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
