//! Interchange configuration
//!
//! Every field has a default, so an empty (or absent) config file is valid.

use crate::error::StatusResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default sheet holding the wide resource allocation table
pub const DEFAULT_ALLOCATION_SHEET: &str = "Monthly Resource Allocation";

/// Color given to imported milestones that have no existing counterpart
pub const DEFAULT_MILESTONE_COLOR: &str = "#90A4AE";

/// File name prefix for exported reports
pub const DEFAULT_REPORT_PREFIX: &str = "project-status-report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct InterchangeConfig {
    /// Sheet read by the resource allocation import
    pub allocation_sheet: String,
    /// Color for decoded milestones beyond the existing list
    pub default_milestone_color: String,
    /// Prefix of `<prefix>-<ISO-date>.<ext>` report names
    pub report_prefix: String,
    /// Month column headers written by the allocation export
    pub allocation_month_labels: Vec<String>,
}

impl Default for InterchangeConfig {
    fn default() -> Self {
        Self {
            allocation_sheet: DEFAULT_ALLOCATION_SHEET.to_string(),
            default_milestone_color: DEFAULT_MILESTONE_COLOR.to_string(),
            report_prefix: DEFAULT_REPORT_PREFIX.to_string(),
            allocation_month_labels: default_month_labels(),
        }
    }
}

impl InterchangeConfig {
    /// Load a YAML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> StatusResult<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: InterchangeConfig = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded interchange config");
        Ok(config)
    }
}

fn default_month_labels() -> Vec<String> {
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        .iter()
        .map(|month| format!("{} 2026", month))
        .collect()
}
