//! CSV importer implementation - sectioned CSV → report records

use crate::rows::{ReportSection, Row};
use crate::scalar::CellValue;
use crate::types::{DecodedPayload, Milestone};
use tracing::{debug, warn};

/// One `--- NAME ---` table of a sectioned document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Decodes sectioned CSV documents into report records
pub struct CsvImporter {
    default_color: String,
}

impl CsvImporter {
    /// `default_color` goes to decoded milestones with no existing counterpart
    pub fn new(default_color: impl Into<String>) -> Self {
        Self {
            default_color: default_color.into(),
        }
    }

    /// Decode every known section. Malformed content never fails the decode;
    /// bad cells fall back to their defaults.
    pub fn import(&self, content: &str, existing_milestones: &[Milestone]) -> DecodedPayload {
        let mut sections = parse_sections(content);
        debug!(sections = sections.len(), "parsed CSV sections");

        for section in &sections {
            if !ReportSection::ALL
                .iter()
                .any(|known| known.csv_name().eq_ignore_ascii_case(&section.name))
            {
                warn!(section = %section.name, "ignoring unknown CSV section");
            }
        }

        DecodedPayload::from_sections(
            |wanted| {
                // A repeated section name: the last one wins
                sections
                    .iter_mut()
                    .rev()
                    .find(|s| s.name.eq_ignore_ascii_case(wanted.csv_name()))
                    .map(|s| std::mem::take(&mut s.rows))
            },
            existing_milestones,
            &self.default_color,
        )
    }
}

/// Split a document into its sections.
///
/// Blank lines are skipped. The first line after a delimiter is the header;
/// every later line becomes a row keyed by those headers. Lines before the
/// first delimiter are ignored.
pub fn parse_sections(content: &str) -> Vec<Section> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut sections: Vec<Section> = Vec::new();

    for record in split_records(content) {
        let line = record.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = delimiter_name(line) {
            sections.push(Section {
                name: name.to_string(),
                ..Section::default()
            });
            continue;
        }

        let Some(current) = sections.last_mut() else {
            debug!(line = %line, "skipping line outside any section");
            continue;
        };

        let fields = parse_csv_row(line);
        if current.headers.is_empty() {
            current.headers = fields.into_iter().map(|f| f.trim().to_string()).collect();
        } else {
            current.rows.push(zip_row(&current.headers, fields));
        }
    }

    sections
}

/// Name inside a `--- NAME ---` line
fn delimiter_name(line: &str) -> Option<&str> {
    if !(line.starts_with("---") && line.ends_with("---")) {
        return None;
    }
    let name = line.trim_matches('-').trim();
    (!name.is_empty()).then_some(name)
}

/// Pair fields with headers. Missing trailing fields read as empty; extra
/// fields are dropped.
fn zip_row(headers: &[String], fields: Vec<String>) -> Row {
    let mut fields = fields.into_iter();
    headers
        .iter()
        .map(|header| {
            let value = match fields.next() {
                Some(f) if !f.is_empty() => CellValue::Text(f),
                _ => CellValue::Empty,
            };
            (header.clone(), value)
        })
        .collect()
}

/// Split into records, one per line, except that a quoted field may span
/// lines. A `--- NAME ---` delimiter line always starts a fresh record: if a
/// quote is still open when one is reached (or at the end of the document),
/// the quote was stray and the lines it captured are split back into plain
/// lines. A stray quote therefore only affects its own line.
fn split_records(content: &str) -> Vec<&str> {
    let mut records = Vec::new();
    // Start offset of a record whose quote is still open
    let mut open: Option<usize> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let body = line.strip_suffix('\n').unwrap_or(line);

        if delimiter_name(body.trim()).is_some() {
            if let Some(from) = open.take() {
                warn!("unbalanced quote before section delimiter, splitting record by line");
                records.extend(content[from..start].lines());
            }
            records.push(body);
            continue;
        }

        let odd_quotes = body.matches('"').count() % 2 == 1;
        match open {
            Some(from) if odd_quotes => {
                records.push(&content[from..start + body.len()]);
                open = None;
            }
            Some(_) => {}
            None if odd_quotes => open = Some(start),
            None => records.push(body),
        }
    }

    if let Some(from) = open {
        warn!("unterminated quote in CSV document, splitting remainder by line");
        records.extend(content[from..].lines());
    }
    records
}

/// Split one record into fields.
///
/// A `"` toggles quoting unless it is a doubled `""` inside quotes, which
/// yields one literal quote. A comma outside quotes ends the field.
pub fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
