//! Row mappers
//!
//! Each report record maps to a flat row keyed by fixed, human-readable column
//! labels. Label order is column order on export. Decoding always produces a
//! fully populated record: missing or unreadable cells fall back to zero,
//! empty text, or `None`.

use crate::scalar::{
    decode_currency, decode_date, decode_integer, decode_percentage, encode_currency,
    encode_date, encode_percentage, CellValue,
};
use crate::types::{
    BudgetShare, Decoded, DecodedPayload, GrossMargin, InvoiceDate, InvoicedTotal, MarginChart,
    MarginMetric, Milestone, NextInvoice, Project, ResourceBurn, RevenueData, StatusPayload,
    CURRENT_BURN_RATE_LABEL, DEFAULT_PROJECT_STATUS, GROSS_MARGIN_LABEL, TOTAL_COST_LABEL,
};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Ordered label -> cell mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing an earlier cell with the same label
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        let label = label.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((label, value)),
        }
    }

    /// Builder form of [`Row::insert`]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(label, value);
        self
    }

    /// Cell for `label`; unknown labels read as empty
    pub fn get(&self, label: &str) -> &CellValue {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }

    fn text(&self, label: &str) -> String {
        self.get(label).to_string()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}

/// Encoding half of a row mapper
pub trait ToRow {
    /// Column labels in export order
    const COLUMNS: &'static [&'static str];

    fn to_row(&self) -> Row;
}

//==============================================================================
// Report Sections
//==============================================================================

/// The five tables of a status report, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSection {
    ProjectInfo,
    Milestones,
    ResourceBurn,
    Revenue,
    GrossMargin,
}

impl ReportSection {
    pub const ALL: [ReportSection; 5] = [
        ReportSection::ProjectInfo,
        ReportSection::Milestones,
        ReportSection::ResourceBurn,
        ReportSection::Revenue,
        ReportSection::GrossMargin,
    ];

    /// Name used in `--- NAME ---` delimiter lines
    pub fn csv_name(self) -> &'static str {
        match self {
            ReportSection::ProjectInfo => "PROJECT INFO",
            ReportSection::Milestones => "MILESTONES",
            ReportSection::ResourceBurn => "RESOURCE BURN",
            ReportSection::Revenue => "REVENUE",
            ReportSection::GrossMargin => "GROSS MARGIN",
        }
    }

    /// Worksheet name in the Excel report
    pub fn sheet_name(self) -> &'static str {
        match self {
            ReportSection::ProjectInfo => "Project Info",
            ReportSection::Milestones => "Milestones",
            ReportSection::ResourceBurn => "Resource Burn",
            ReportSection::Revenue => "Revenue",
            ReportSection::GrossMargin => "Gross Margin",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportSection::ProjectInfo => Project::COLUMNS,
            ReportSection::Milestones => Milestone::COLUMNS,
            ReportSection::ResourceBurn => ResourceBurn::COLUMNS,
            ReportSection::Revenue => RevenueData::COLUMNS,
            ReportSection::GrossMargin => GrossMargin::COLUMNS,
        }
    }
}

/// Encode every section of `payload`, in export order
pub fn encode_report(payload: &StatusPayload) -> Vec<(ReportSection, Vec<Row>)> {
    vec![
        (ReportSection::ProjectInfo, vec![payload.project.to_row()]),
        (
            ReportSection::Milestones,
            payload.milestones.iter().map(ToRow::to_row).collect(),
        ),
        (ReportSection::ResourceBurn, vec![payload.resource_burn.to_row()]),
        (ReportSection::Revenue, vec![payload.revenue_data.to_row()]),
        (ReportSection::GrossMargin, vec![payload.gross_margin.to_row()]),
    ]
}

impl DecodedPayload {
    /// Decode the rows found for each section. `rows_for` returns `None` for a
    /// section missing from the file. Milestone row `i` inherits the fields the
    /// formats cannot carry from `existing_milestones[i]`.
    pub fn from_sections<F>(
        mut rows_for: F,
        existing_milestones: &[Milestone],
        default_color: &str,
    ) -> Self
    where
        F: FnMut(ReportSection) -> Option<Vec<Row>>,
    {
        let mut decode = |section: ReportSection| match rows_for(section) {
            Some(rows) => Decoded::Present(rows),
            None => Decoded::Absent,
        };

        let project = decode(ReportSection::ProjectInfo);
        let milestones = decode(ReportSection::Milestones);
        let resource_burn = decode(ReportSection::ResourceBurn);
        let revenue_data = decode(ReportSection::Revenue);
        let gross_margin = decode(ReportSection::GrossMargin);

        DecodedPayload {
            project: map_rows(project, Project::from_row),
            milestones: match milestones {
                Decoded::Present(rows) => Decoded::Present(
                    rows.iter()
                        .enumerate()
                        .map(|(idx, row)| {
                            Milestone::from_row(row, idx, existing_milestones.get(idx), default_color)
                        })
                        .collect(),
                ),
                Decoded::Absent => Decoded::Absent,
            },
            resource_burn: map_rows(resource_burn, ResourceBurn::from_row),
            revenue_data: map_rows(revenue_data, RevenueData::from_row),
            gross_margin: map_rows(gross_margin, GrossMargin::from_row),
        }
    }
}

fn map_rows<T>(rows: Decoded<Vec<Row>>, from_row: fn(&Row) -> T) -> Decoded<Vec<T>> {
    match rows {
        Decoded::Present(rows) => Decoded::Present(rows.iter().map(from_row).collect()),
        Decoded::Absent => Decoded::Absent,
    }
}

/// Cell text, or `default` when blank
fn text_or(row: &Row, label: &str, default: impl FnOnce() -> String) -> String {
    let cell = row.get(label);
    if cell.is_blank() {
        default()
    } else {
        cell.to_string()
    }
}

fn money(row: &Row, label: &str) -> f64 {
    decode_currency(row.get(label)).unwrap_or(0.0)
}

fn percent(row: &Row, label: &str) -> f64 {
    decode_percentage(row.get(label)).unwrap_or(0.0)
}

fn integer(row: &Row, label: &str) -> i64 {
    decode_integer(row.get(label)).unwrap_or(0)
}

//==============================================================================
// Project
//==============================================================================

impl ToRow for Project {
    const COLUMNS: &'static [&'static str] = &[
        "Project Name",
        "Description",
        "Start Date",
        "End Date",
        "Duration (Days)",
        "Status",
        "Resources",
        "Revenue",
        "Client Value",
    ];

    fn to_row(&self) -> Row {
        Row::new()
            .with("Project Name", self.name.as_str())
            .with("Description", self.description.as_str())
            .with("Start Date", encode_date(self.start_date.as_deref()))
            .with("End Date", encode_date(self.end_date.as_deref()))
            .with("Duration (Days)", self.days)
            .with("Status", self.status.as_str())
            .with("Resources", self.resource)
            .with("Revenue", encode_currency(Some(self.revenue)))
            .with("Client Value", encode_currency(Some(self.client_value)))
    }
}

impl Project {
    pub fn from_row(row: &Row) -> Self {
        Project {
            name: row.text("Project Name"),
            description: row.text("Description"),
            start_date: decode_date(row.get("Start Date")),
            end_date: decode_date(row.get("End Date")),
            days: integer(row, "Duration (Days)"),
            status: text_or(row, "Status", || DEFAULT_PROJECT_STATUS.to_string()),
            resource: integer(row, "Resources"),
            revenue: money(row, "Revenue"),
            client_value: money(row, "Client Value"),
        }
    }
}

//==============================================================================
// Milestone
//==============================================================================

impl ToRow for Milestone {
    const COLUMNS: &'static [&'static str] = &[
        "Milestone Name",
        "Week",
        "Expected Start Date",
        "Expected End Date",
        "Actual Start Date",
        "Actual End Date",
        "Progress (%)",
        "Budget",
        "Status",
    ];

    fn to_row(&self) -> Row {
        Row::new()
            .with("Milestone Name", self.name.as_str())
            .with("Week", self.week.as_str())
            .with("Expected Start Date", encode_date(self.expected_start_date.as_deref()))
            .with("Expected End Date", encode_date(self.expected_end_date.as_deref()))
            .with("Actual Start Date", encode_date(self.actual_start_date.as_deref()))
            .with("Actual End Date", encode_date(self.actual_end_date.as_deref()))
            .with("Progress (%)", self.progress)
            .with("Budget", encode_currency(Some(self.budget)))
            // Derived; ignored on import
            .with("Status", self.status_label())
    }
}

impl Milestone {
    /// Decode the row at `index`. `previous` is the existing milestone at the
    /// same position; its id, color, tasks, and checkpoint are kept.
    pub fn from_row(
        row: &Row,
        index: usize,
        previous: Option<&Milestone>,
        default_color: &str,
    ) -> Self {
        let position = index + 1;
        Milestone {
            id: previous
                .map(|m| m.id.clone())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| position.to_string()),
            name: text_or(row, "Milestone Name", || format!("MILESTONE {}", position)),
            week: text_or(row, "Week", || format!("WEEK {}", position)),
            expected_start_date: decode_date(row.get("Expected Start Date")),
            expected_end_date: decode_date(row.get("Expected End Date")),
            actual_start_date: decode_date(row.get("Actual Start Date")),
            actual_end_date: decode_date(row.get("Actual End Date")),
            progress: integer(row, "Progress (%)"),
            budget: money(row, "Budget"),
            color: previous
                .map(|m| m.color.clone())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| default_color.to_string()),
            tasks: previous.map(|m| m.tasks.clone()).unwrap_or_default(),
            checkpoint: previous.and_then(|m| m.checkpoint.clone()),
        }
    }
}

//==============================================================================
// Resource Burn
//==============================================================================

impl ToRow for ResourceBurn {
    const COLUMNS: &'static [&'static str] = &[
        "Total Hours",
        "Resources Allocated",
        "Resources Utilized",
        "Resources Not Utilized",
        "Budget Consumed",
        "Budget Consumed (%)",
        "Monthly Burn",
        "Monthly Burn (%)",
        "Weekly Burn",
        "Weekly Burn (%)",
        "Remaining Budget",
        "Remaining Budget (%)",
        "Total Man Days",
    ];

    fn to_row(&self) -> Row {
        let shares = [
            ("Budget Consumed", &self.budget_consumed),
            ("Monthly Burn", &self.monthly_burn),
            ("Weekly Burn", &self.weekly_burn),
            ("Remaining Budget", &self.remaining_budget),
        ];

        let mut row = Row::new()
            .with("Total Hours", self.total_hours)
            .with("Resources Allocated", self.resources)
            .with("Resources Utilized", self.resources_utilized)
            .with("Resources Not Utilized", self.resources_not_utilized);
        for (label, share) in shares {
            row.insert(label, encode_currency(Some(share.value)));
            row.insert(
                format!("{} (%)", label),
                encode_percentage(Some(share.percentage)),
            );
        }
        row.with("Total Man Days", self.total_man_days)
    }
}

impl ResourceBurn {
    pub fn from_row(row: &Row) -> Self {
        let share = |label: &str| BudgetShare {
            value: money(row, label),
            percentage: percent(row, &format!("{} (%)", label)),
        };

        ResourceBurn {
            total_hours: integer(row, "Total Hours"),
            resources: integer(row, "Resources Allocated"),
            resources_utilized: integer(row, "Resources Utilized"),
            resources_not_utilized: integer(row, "Resources Not Utilized"),
            budget_consumed: share("Budget Consumed"),
            monthly_burn: share("Monthly Burn"),
            weekly_burn: share("Weekly Burn"),
            remaining_budget: share("Remaining Budget"),
            total_man_days: integer(row, "Total Man Days"),
        }
    }
}

//==============================================================================
// Revenue
//==============================================================================

impl ToRow for RevenueData {
    const COLUMNS: &'static [&'static str] = &[
        "Invoiced Amount",
        "Total Revenue",
        "Total Invoiced",
        "Total Invoiced Date",
        "Last Invoice Date",
        "Days to Next Invoice",
        "Next Invoice Date",
    ];

    fn to_row(&self) -> Row {
        let days_to_next = match self.days_to_next_invoice.days {
            Some(days) => CellValue::from(days),
            None => CellValue::from("N/A"),
        };

        Row::new()
            .with("Invoiced Amount", encode_currency(Some(self.invoiced)))
            .with("Total Revenue", encode_currency(Some(self.total)))
            .with("Total Invoiced", encode_currency(Some(self.total_invoiced.value)))
            .with(
                "Total Invoiced Date",
                encode_date(self.total_invoiced.date.as_deref()),
            )
            .with("Last Invoice Date", encode_date(self.last_invoice.date.as_deref()))
            .with("Days to Next Invoice", days_to_next)
            .with(
                "Next Invoice Date",
                encode_date(self.days_to_next_invoice.date.as_deref()),
            )
    }
}

impl RevenueData {
    pub fn from_row(row: &Row) -> Self {
        RevenueData {
            invoiced: money(row, "Invoiced Amount"),
            total: money(row, "Total Revenue"),
            total_invoiced: InvoicedTotal {
                value: money(row, "Total Invoiced"),
                date: decode_date(row.get("Total Invoiced Date")),
            },
            last_invoice: InvoiceDate {
                date: decode_date(row.get("Last Invoice Date")),
            },
            days_to_next_invoice: NextInvoice {
                // "N/A" does not parse as an integer
                days: decode_integer(row.get("Days to Next Invoice")),
                date: decode_date(row.get("Next Invoice Date")),
            },
        }
    }
}

//==============================================================================
// Gross Margin
//==============================================================================

impl ToRow for GrossMargin {
    const COLUMNS: &'static [&'static str] = &[
        "Gross Margin (%)",
        "Gross Margin Value",
        "Current Burn Rate",
        "Total Cost",
        "Target",
        "Actual",
        "Projection",
    ];

    fn to_row(&self) -> Row {
        Row::new()
            .with("Gross Margin (%)", encode_percentage(Some(self.percentage)))
            .with("Gross Margin Value", encode_currency(self.gross_margin.value))
            .with("Current Burn Rate", encode_currency(self.current_burn_rate.value))
            .with("Total Cost", encode_currency(self.total_cost.value))
            .with("Target", encode_currency(Some(self.chart_data.target)))
            .with("Actual", encode_currency(Some(self.chart_data.actual)))
            .with("Projection", encode_currency(Some(self.chart_data.projection)))
    }
}

impl GrossMargin {
    pub fn from_row(row: &Row) -> Self {
        GrossMargin {
            percentage: percent(row, "Gross Margin (%)"),
            gross_margin: MarginMetric::new(
                GROSS_MARGIN_LABEL,
                decode_currency(row.get("Gross Margin Value")),
            ),
            current_burn_rate: MarginMetric::new(
                CURRENT_BURN_RATE_LABEL,
                decode_currency(row.get("Current Burn Rate")),
            ),
            total_cost: MarginMetric::new(TOTAL_COST_LABEL, decode_currency(row.get("Total Cost"))),
            chart_data: MarginChart {
                target: money(row, "Target"),
                actual: money(row, "Actual"),
                projection: money(row, "Projection"),
            },
        }
    }
}
