//! Shared fixtures for integration tests

#![allow(dead_code)]

use statusboard::types::{
    BudgetShare, InvoiceDate, InvoicedTotal, MarginChart, MarginMetric, NextInvoice,
    CURRENT_BURN_RATE_LABEL, GROSS_MARGIN_LABEL, TOTAL_COST_LABEL,
};
use statusboard::{
    GrossMargin, Milestone, Project, ResourceBurn, RevenueData, StatusPayload,
};

pub const DEFAULT_COLOR: &str = "#90A4AE";

fn milestone(id: &str, name: &str, week: &str, progress: i64, budget: f64) -> Milestone {
    Milestone {
        id: id.to_string(),
        name: name.to_string(),
        week: week.to_string(),
        expected_start_date: Some("2025-01-06".to_string()),
        expected_end_date: Some("2025-02-14".to_string()),
        actual_start_date: Some("2025-01-08".to_string()),
        actual_end_date: None,
        progress,
        budget,
        color: DEFAULT_COLOR.to_string(),
        tasks: Vec::new(),
        checkpoint: None,
    }
}

/// Payload where every field survives the file formats unaided
pub fn representable_payload() -> StatusPayload {
    StatusPayload {
        project: Project {
            name: "Apollo Platform".to_string(),
            description: "Billing rewrite, phase 2 (\"Helios\")".to_string(),
            start_date: Some("2025-01-06".to_string()),
            end_date: Some("2025-09-30".to_string()),
            days: 267,
            status: "On Track".to_string(),
            resource: 9,
            revenue: 1250000.0,
            client_value: 1480000.5,
        },
        milestones: vec![
            milestone("1", "Discovery", "WEEK 1-6", 100, 42000.0),
            milestone("2", "Build, core services", "WEEK 7-20", 35, 310500.25),
        ],
        resource_burn: ResourceBurn {
            total_hours: 5120,
            resources: 9,
            resources_utilized: 7,
            resources_not_utilized: 2,
            budget_consumed: BudgetShare { value: 420000.0, percentage: 33.6 },
            monthly_burn: BudgetShare { value: 96000.0, percentage: 7.7 },
            weekly_burn: BudgetShare { value: 24000.0, percentage: 1.9 },
            remaining_budget: BudgetShare { value: 830000.0, percentage: 66.4 },
            total_man_days: 640,
        },
        revenue_data: RevenueData {
            invoiced: 375000.0,
            total: 1250000.0,
            total_invoiced: InvoicedTotal {
                value: 375000.0,
                date: Some("2025-04-30".to_string()),
            },
            last_invoice: InvoiceDate {
                date: Some("2025-04-30".to_string()),
            },
            days_to_next_invoice: NextInvoice {
                days: Some(12),
                date: Some("2025-05-31".to_string()),
            },
        },
        gross_margin: GrossMargin {
            percentage: 28.5,
            gross_margin: MarginMetric::new(GROSS_MARGIN_LABEL, Some(356250.0)),
            current_burn_rate: MarginMetric::new(CURRENT_BURN_RATE_LABEL, Some(96000.0)),
            total_cost: MarginMetric::new(TOTAL_COST_LABEL, Some(893750.0)),
            chart_data: MarginChart {
                target: 400000.0,
                actual: 356250.0,
                projection: 380000.0,
            },
        },
    }
}

/// Payload whose milestones carry colors, tasks, and checkpoints
pub fn live_payload() -> StatusPayload {
    let mut payload = representable_payload();
    payload.milestones[0].id = "ms-101".to_string();
    payload.milestones[0].color = "#4CAF50".to_string();
    payload.milestones[0].tasks = vec![
        serde_json::json!({"id": 1, "name": "Stakeholder interviews", "done": true}),
        serde_json::json!({"id": 2, "name": "Architecture review", "done": true}),
    ];
    payload.milestones[0].checkpoint = Some(serde_json::json!({"date": "2025-02-14", "label": "Sign-off"}));
    payload.milestones[1].id = "ms-102".to_string();
    payload.milestones[1].color = "#2196F3".to_string();
    payload
}
