//! Statusboard - project status report interchange
//!
//! Converts the project status dataset (project info, milestones, resource
//! burn, revenue, gross margin) to and from two editable file formats:
//!
//! - A sectioned CSV document: one `--- NAME ---` table per section
//! - An Excel workbook: one worksheet per section
//!
//! Imports merge with the caller's existing data: a section missing from the
//! file keeps its existing value. A separate Excel entry point reads the wide
//! monthly resource allocation sheet.
//!
//! # Example
//!
//! ```no_run
//! use statusboard::{Interchange, StatusPayload};
//! use std::path::Path;
//!
//! # async fn run() -> statusboard::StatusResult<()> {
//! let interchange = Interchange::default();
//! let current = StatusPayload::default();
//!
//! let csv = interchange.export_csv(&current);
//! println!("{}", csv);
//!
//! let updated = interchange
//!     .import_from_file(Path::new("project-status-report-2026-10-18.csv"), &current)
//!     .await?;
//! println!("Milestones: {}", updated.milestones.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod excel;
pub mod interchange;
pub mod rows;
pub mod scalar;
pub mod types;

// Re-export commonly used types
pub use config::InterchangeConfig;
pub use error::{StatusError, StatusResult};
pub use interchange::{FileFormat, Interchange};
pub use types::{
    Decoded, DecodedPayload, GrossMargin, Milestone, Project, ResourceAllocationEntry,
    ResourceBurn, RevenueData, StatusPayload,
};
