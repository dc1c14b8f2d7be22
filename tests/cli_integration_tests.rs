//! CLI Integration Tests
//!
//! Runs the statusboard binary directly using assert_cmd to exercise main.rs.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use statusboard::cli::commands::render_document;
use statusboard::{Interchange, StatusPayload};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_state(dir: &Path, name: &str, payload: &StatusPayload) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, render_document(&path, payload).unwrap()).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("statusboard"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("statusboard"));
}

#[test]
fn test_export_help() {
    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.args(["export", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project-status-report"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_csv_writes_dated_report() {
    let dir = TempDir::new().unwrap();
    let state = write_state(dir.path(), "state.yaml", &common::live_payload());

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("export")
        .arg(&state)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Complete"));

    let reports: Vec<PathBuf> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with("project-status-report-") && name.ends_with(".csv")
        })
        .collect();
    assert_eq!(reports.len(), 1);

    let content = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(content.starts_with("--- PROJECT INFO ---"));
    assert!(content.contains("--- GROSS MARGIN ---"));
}

#[test]
fn test_export_xlsx_with_config_prefix() {
    let dir = TempDir::new().unwrap();
    let state = write_state(dir.path(), "state.json", &common::live_payload());
    let config = dir.path().join("statusboard.yaml");
    std::fs::write(&config, "report_prefix: weekly-status\n").unwrap();

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("export")
        .arg(&state)
        .args(["--format", "xlsx", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success();

    let found = std::fs::read_dir(dir.path()).unwrap().any(|e| {
        let name = e.unwrap().file_name().to_string_lossy().into_owned();
        name.starts_with("weekly-status-") && name.ends_with(".xlsx")
    });
    assert!(found, "expected a weekly-status-*.xlsx report");
}

#[test]
fn test_export_missing_state_fails() {
    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.args(["export", "/nonexistent/state.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("report.txt");
    std::fs::write(&file, "--- PROJECT INFO ---\n").unwrap();

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn test_import_prints_yaml_without_output() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("report.csv");
    std::fs::write(
        &file,
        "--- PROJECT INFO ---\nProject Name,Revenue\nApollo,\"$1,000\"\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Apollo"))
        .stdout(predicate::str::contains("status: In Progress"));
}

#[test]
fn test_import_merges_existing_into_output() {
    let dir = TempDir::new().unwrap();
    let existing = common::live_payload();
    let state = write_state(dir.path(), "state.yaml", &existing);

    let report = dir.path().join("report.csv");
    std::fs::write(
        &report,
        "--- REVENUE ---\nInvoiced Amount,Total Revenue\n\"$5,000\",\"$10,000\"\n",
    )
    .unwrap();
    let output = dir.path().join("merged.yaml");

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("import")
        .arg(&report)
        .arg("--existing")
        .arg(&state)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Written"));

    let merged: StatusPayload =
        serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged.revenue_data.invoiced, 5000.0);
    assert_eq!(merged.revenue_data.total, 10000.0);
    assert_eq!(merged.project, existing.project);
    assert_eq!(merged.milestones, existing.milestones);
}

// ═══════════════════════════════════════════════════════════════════════════
// ALLOCATION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_allocation_round_trip_to_json() {
    let dir = TempDir::new().unwrap();
    let entries = vec![statusboard::ResourceAllocationEntry {
        employee_name: "Asha Rao".to_string(),
        cost_per_month: 8000.0,
        ..Default::default()
    }];
    let workbook = dir.path().join("staffing.xlsx");
    let bytes = Interchange::default()
        .export_resource_allocation(&entries)
        .unwrap();
    std::fs::write(&workbook, bytes).unwrap();
    let output = dir.path().join("allocation.json");

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("allocation")
        .arg(&workbook)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 resource"));

    let json = std::fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"employeeName\": \"Asha Rao\""));
}

#[test]
fn test_allocation_unknown_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let workbook = dir.path().join("staffing.xlsx");
    let bytes = Interchange::default()
        .export_resource_allocation(&[])
        .unwrap();
    std::fs::write(&workbook, bytes).unwrap();

    let mut cmd = Command::cargo_bin("statusboard").unwrap();
    cmd.arg("allocation")
        .arg(&workbook)
        .args(["--sheet", "Staffing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet \"Staffing\" not found"));
}
