//! Sectioned CSV codec
//!
//! One document holds the report tables back to back. Each table starts with a
//! `--- NAME ---` delimiter line followed by its header line; tables are
//! separated by a blank line:
//!
//! ```text
//! --- PROJECT INFO ---
//! Project Name,Description,...
//! Apollo,"Launch, phase 2",...
//!
//! --- MILESTONES ---
//! ...
//! ```

mod exporter;
mod importer;

pub use exporter::{serialize_field, CsvExporter};
pub use importer::{parse_csv_row, parse_sections, CsvImporter, Section};
