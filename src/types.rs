use serde::{Deserialize, Serialize};

//==============================================================================
// Status Report Records
//==============================================================================

/// Project header record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Duration in days
    pub days: i64,
    pub status: String,
    /// Resource head count
    pub resource: i64,
    pub revenue: f64,
    pub client_value: f64,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            days: 0,
            status: DEFAULT_PROJECT_STATUS.to_string(),
            resource: 0,
            revenue: 0.0,
            client_value: 0.0,
        }
    }
}

/// Status assigned when a decoded project row leaves it blank
pub const DEFAULT_PROJECT_STATUS: &str = "In Progress";

/// A milestone on the project timeline.
///
/// `color`, `tasks`, and `checkpoint` have no column in either report format;
/// import carries them over from the existing milestone at the same position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub week: String,
    pub expected_start_date: Option<String>,
    pub expected_end_date: Option<String>,
    /// `None` until work starts
    pub actual_start_date: Option<String>,
    /// `None` until work finishes
    pub actual_end_date: Option<String>,
    /// 0-100, not enforced here
    pub progress: i64,
    pub budget: f64,
    pub color: String,
    pub tasks: Vec<serde_json::Value>,
    pub checkpoint: Option<serde_json::Value>,
}

impl Milestone {
    /// Display status derived from progress
    pub fn status_label(&self) -> &'static str {
        match self.progress {
            100 => "Completed",
            p if p > 0 => "In Progress",
            _ => "Pending",
        }
    }
}

/// Money amount paired with its share of the budget
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetShare {
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceBurn {
    pub total_hours: i64,
    pub resources: i64,
    pub resources_utilized: i64,
    pub resources_not_utilized: i64,
    pub budget_consumed: BudgetShare,
    pub monthly_burn: BudgetShare,
    pub weekly_burn: BudgetShare,
    pub remaining_budget: BudgetShare,
    pub total_man_days: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicedTotal {
    pub value: f64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDate {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NextInvoice {
    /// `None` when no invoice is scheduled
    pub days: Option<i64>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueData {
    pub invoiced: f64,
    pub total: f64,
    pub total_invoiced: InvoicedTotal,
    pub last_invoice: InvoiceDate,
    pub days_to_next_invoice: NextInvoice,
}

/// Labeled money metric; the label is fixed per metric
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginMetric {
    pub label: String,
    pub value: Option<f64>,
}

impl MarginMetric {
    pub fn new(label: &str, value: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginChart {
    pub target: f64,
    pub actual: f64,
    pub projection: f64,
}

pub const GROSS_MARGIN_LABEL: &str = "Gross Margin";
pub const CURRENT_BURN_RATE_LABEL: &str = "Current Burn Rate";
pub const TOTAL_COST_LABEL: &str = "Total Cost";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossMargin {
    pub percentage: f64,
    pub gross_margin: MarginMetric,
    pub current_burn_rate: MarginMetric,
    pub total_cost: MarginMetric,
    pub chart_data: MarginChart,
}

impl Default for GrossMargin {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            gross_margin: MarginMetric::new(GROSS_MARGIN_LABEL, None),
            current_burn_rate: MarginMetric::new(CURRENT_BURN_RATE_LABEL, None),
            total_cost: MarginMetric::new(TOTAL_COST_LABEL, None),
            chart_data: MarginChart::default(),
        }
    }
}

//==============================================================================
// Resource Allocation
//==============================================================================

/// Months carried per allocation entry
pub const ALLOCATION_MONTHS: usize = 12;

/// One employee row of the monthly resource allocation sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceAllocationEntry {
    pub trim: String,
    pub project_code: String,
    pub project_name: String,
    pub emp_id: String,
    pub employee_name: String,
    pub emp_type: String,
    pub band: String,
    pub working: String,
    pub location: String,
    pub role: String,
    pub cost_per_month: f64,
    pub total_cost: f64,
    /// Allocation per month, index 0 is the first month column
    pub months: [f64; ALLOCATION_MONTHS],
}

//==============================================================================
// Payloads
//==============================================================================

/// Full status report as exported and imported
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusPayload {
    pub project: Project,
    pub milestones: Vec<Milestone>,
    pub resource_burn: ResourceBurn,
    pub revenue_data: RevenueData,
    pub gross_margin: GrossMargin,
}

/// Outcome of decoding one section or sheet.
///
/// `Absent` means the file had no such section. `Present(vec![])` means the
/// section was there with a header and no rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Decoded<T> {
    Present(T),
    #[default]
    Absent,
}

impl<T> Decoded<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Decoded::Present(_))
    }

    pub fn present(self) -> Option<T> {
        match self {
            Decoded::Present(value) => Some(value),
            Decoded::Absent => None,
        }
    }
}

impl<T> Decoded<Vec<T>> {
    /// Rows of a section that is present with at least one row
    pub fn non_empty(self) -> Option<Vec<T>> {
        self.present().filter(|rows| !rows.is_empty())
    }
}

/// Per-section decode result of one report file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedPayload {
    pub project: Decoded<Vec<Project>>,
    pub milestones: Decoded<Vec<Milestone>>,
    pub resource_burn: Decoded<Vec<ResourceBurn>>,
    pub revenue_data: Decoded<Vec<RevenueData>>,
    pub gross_margin: Decoded<Vec<GrossMargin>>,
}

impl DecodedPayload {
    /// Merge-with-existing: a section that is absent or has no rows keeps the
    /// existing value. Single-record sections use their first row.
    pub fn merge(self, existing: &StatusPayload) -> StatusPayload {
        StatusPayload {
            project: first_or(self.project, &existing.project),
            milestones: self
                .milestones
                .non_empty()
                .unwrap_or_else(|| existing.milestones.clone()),
            resource_burn: first_or(self.resource_burn, &existing.resource_burn),
            revenue_data: first_or(self.revenue_data, &existing.revenue_data),
            gross_margin: first_or(self.gross_margin, &existing.gross_margin),
        }
    }
}

fn first_or<T: Clone>(decoded: Decoded<Vec<T>>, existing: &T) -> T {
    decoded
        .non_empty()
        .and_then(|rows| rows.into_iter().next())
        .unwrap_or_else(|| existing.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> StatusPayload {
        StatusPayload {
            project: Project {
                name: "Existing".to_string(),
                ..Project::default()
            },
            milestones: vec![Milestone {
                id: "7".to_string(),
                name: "Kickoff".to_string(),
                ..Milestone::default()
            }],
            revenue_data: RevenueData {
                invoiced: 10.0,
                ..RevenueData::default()
            },
            ..StatusPayload::default()
        }
    }

    #[test]
    fn test_merge_absent_keeps_existing() {
        let existing = existing();
        let merged = DecodedPayload::default().merge(&existing);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_present_but_empty_keeps_existing() {
        let existing = existing();
        let decoded = DecodedPayload {
            milestones: Decoded::Present(vec![]),
            project: Decoded::Present(vec![]),
            ..DecodedPayload::default()
        };
        let merged = decoded.merge(&existing);
        assert_eq!(merged.milestones, existing.milestones);
        assert_eq!(merged.project, existing.project);
    }

    #[test]
    fn test_merge_present_takes_first_row() {
        let existing = existing();
        let decoded = DecodedPayload {
            project: Decoded::Present(vec![
                Project {
                    name: "From file".to_string(),
                    ..Project::default()
                },
                Project {
                    name: "Ignored".to_string(),
                    ..Project::default()
                },
            ]),
            ..DecodedPayload::default()
        };
        let merged = decoded.merge(&existing);
        assert_eq!(merged.project.name, "From file");
        assert_eq!(merged.revenue_data, existing.revenue_data);
    }

    #[test]
    fn test_milestone_status_label() {
        let mut m = Milestone::default();
        assert_eq!(m.status_label(), "Pending");
        m.progress = 40;
        assert_eq!(m.status_label(), "In Progress");
        m.progress = 100;
        assert_eq!(m.status_label(), "Completed");
    }

    #[test]
    fn test_payload_deserializes_partial_json() {
        let json = r#"{"project": {"name": "Apollo", "clientValue": 5}, "milestones": [{"name": "M1"}]}"#;
        let payload: StatusPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.project.name, "Apollo");
        assert_eq!(payload.project.client_value, 5.0);
        assert_eq!(payload.milestones[0].progress, 0);
        assert_eq!(payload.gross_margin.total_cost.label, TOTAL_COST_LABEL);
    }
}
