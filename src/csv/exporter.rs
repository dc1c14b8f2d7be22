//! CSV exporter implementation

use crate::rows::{encode_report, ReportSection, Row};
use crate::types::StatusPayload;

/// Writes a status payload as a sectioned CSV document
pub struct CsvExporter<'a> {
    payload: &'a StatusPayload,
}

impl<'a> CsvExporter<'a> {
    pub fn new(payload: &'a StatusPayload) -> Self {
        Self { payload }
    }

    /// Render the full document. Sections with no rows still get their
    /// delimiter and header line.
    pub fn export(&self) -> String {
        let sections: Vec<String> = encode_report(self.payload)
            .iter()
            .map(|(section, rows)| render_section(*section, rows))
            .collect();

        tracing::debug!(
            sections = sections.len(),
            milestones = self.payload.milestones.len(),
            "rendered CSV report"
        );

        sections.join("\n\n")
    }
}

fn render_section(section: ReportSection, rows: &[Row]) -> String {
    let columns = section.columns();
    let mut lines = Vec::with_capacity(rows.len() + 2);

    lines.push(format!("--- {} ---", section.csv_name()));
    lines.push(join_fields(columns.iter().map(|c| c.to_string())));
    for row in rows {
        lines.push(join_fields(columns.iter().map(|c| row.get(c).to_string())));
    }

    lines.join("\n")
}

fn join_fields(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|f| serialize_field(&f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field iff it contains a comma, quote, or line break, or has
/// leading/trailing whitespace (the importer trims unquoted line ends).
/// Inner quotes are doubled.
pub fn serialize_field(value: &str) -> String {
    let padded = value.trim() != value;
    if padded || value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Milestone, Project};

    #[test]
    fn test_serialize_field() {
        assert_eq!(serialize_field("plain"), "plain");
        assert_eq!(serialize_field("a,b"), "\"a,b\"");
        assert_eq!(serialize_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(serialize_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(serialize_field(""), "");
        assert_eq!(serialize_field("  Apollo"), "\"  Apollo\"");
        assert_eq!(serialize_field("Apollo "), "\"Apollo \"");
    }

    #[test]
    fn test_export_section_order_and_delimiters() {
        let payload = StatusPayload::default();
        let csv = CsvExporter::new(&payload).export();

        let delimiters: Vec<&str> = csv.lines().filter(|l| l.starts_with("---")).collect();
        assert_eq!(
            delimiters,
            vec![
                "--- PROJECT INFO ---",
                "--- MILESTONES ---",
                "--- RESOURCE BURN ---",
                "--- REVENUE ---",
                "--- GROSS MARGIN ---",
            ]
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_export_empty_milestones_keeps_header() {
        let payload = StatusPayload::default();
        let csv = CsvExporter::new(&payload).export();
        assert!(csv.contains(
            "--- MILESTONES ---\nMilestone Name,Week,Expected Start Date,Expected End Date,\
             Actual Start Date,Actual End Date,Progress (%),Budget,Status\n\n--- RESOURCE BURN ---"
        ));
    }

    #[test]
    fn test_export_quotes_currency_and_text() {
        let payload = StatusPayload {
            project: Project {
                name: "Apollo".to_string(),
                description: "Launch, phase 2".to_string(),
                revenue: 125000.0,
                ..Project::default()
            },
            milestones: vec![Milestone {
                name: "Design".to_string(),
                progress: 100,
                ..Milestone::default()
            }],
            ..StatusPayload::default()
        };
        let csv = CsvExporter::new(&payload).export();
        assert!(csv.contains("Apollo,\"Launch, phase 2\",,,0,In Progress,0,\"$125,000\",$0"));
        assert!(csv.contains("Design,,,,,,100,$0,Completed"));
    }
}
