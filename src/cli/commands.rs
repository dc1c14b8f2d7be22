use crate::error::StatusResult;
use crate::interchange::{FileFormat, Interchange};
use crate::types::StatusPayload;
use chrono::Local;
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// True for `.yaml` / `.yml` paths; everything else is treated as JSON
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("yaml" | "yml")
    )
}

/// Load a payload document (YAML or JSON by extension)
pub fn load_document<T: DeserializeOwned>(path: &Path) -> StatusResult<T> {
    let content = fs::read_to_string(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

/// Render a payload document in the format implied by `path`
pub fn render_document<T: Serialize>(path: &Path, value: &T) -> StatusResult<String> {
    if is_yaml(path) {
        Ok(serde_yaml::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Write `value` to `output`, or print it as YAML when no output is given
fn emit_document<T: Serialize>(value: &T, output: Option<&Path>) -> StatusResult<()> {
    match output {
        Some(path) => {
            fs::write(path, render_document(path, value)?)?;
            println!("   Written: {}\n", path.display());
        }
        None => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

/// Execute the export command
pub async fn export(
    interchange: &Interchange,
    state: PathBuf,
    format: FileFormat,
    out_dir: PathBuf,
) -> StatusResult<()> {
    println!("{}", "📊 Statusboard - Report Export".bold().green());
    println!("   State:  {}", state.display());
    println!("   Format: {}\n", format.extension());

    let payload: StatusPayload = load_document(&state)?;
    let today = Local::now().date_naive();
    let path = interchange
        .write_report(&payload, &out_dir, format, today)
        .await?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Report: {}", path.display());
    println!("   Milestones: {}\n", payload.milestones.len());
    Ok(())
}

/// Execute the import command
pub async fn import(
    interchange: &Interchange,
    file: PathBuf,
    existing: Option<PathBuf>,
    output: Option<PathBuf>,
) -> StatusResult<()> {
    let existing: StatusPayload = match &existing {
        Some(path) => load_document(path)?,
        None => StatusPayload::default(),
    };

    let payload = interchange.import_from_file(&file, &existing).await?;

    if output.is_some() {
        println!("{}", "📖 Statusboard - Report Import".bold().green());
        println!("   Input: {}", file.display());
        println!(
            "   Project: {} | Milestones: {}",
            payload.project.name.bright_blue(),
            payload.milestones.len()
        );
    }
    emit_document(&payload, output.as_deref())
}

/// Execute the allocation command
pub async fn allocation(
    interchange: &Interchange,
    file: PathBuf,
    sheet: Option<String>,
    output: Option<PathBuf>,
) -> StatusResult<()> {
    let entries = interchange
        .import_resource_allocation(&file, sheet.as_deref())
        .await?;

    if output.is_some() {
        println!("{}", "📖 Statusboard - Resource Allocation Import".bold().green());
        println!("   Input: {}", file.display());
        println!(
            "   Imported {} resource{}",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );
    }
    emit_document(&entries, output.as_deref())
}
