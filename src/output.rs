//! Report rendering
//!
//! Renders the per-project report in text, JSON or CSV. Rendering never
//! influences the decisions; it consumes finished rows.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::Error;

/// One line of the per-project report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Project name.
    pub project: String,
    /// Project directory relative to the repository root.
    pub path: String,
    /// Computed version string.
    pub version: String,
    /// Whether the project changed since its base.
    pub changed: bool,
    /// The rule that produced the outcome.
    pub rationale: String,
}

/// Output format of the report verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned columns for the terminal.
    Text,
    /// A JSON array of row objects.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

/// Render the report rows in the requested format.
pub fn render(rows: &[ReportRow], format: ReportFormat) -> Result<String, Error> {
    match format {
        ReportFormat::Text => Ok(render_text(rows)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        ReportFormat::Csv => Ok(render_csv(rows)),
    }
}

fn render_text(rows: &[ReportRow]) -> String {
    let name_width = rows
        .iter()
        .map(|row| row.project.len())
        .max()
        .unwrap_or(0)
        .max("project".len());
    let version_width = rows
        .iter()
        .map(|row| row.version.len())
        .max()
        .unwrap_or(0)
        .max("version".len());

    let mut lines = vec![format!(
        "{:name_width$}  {:version_width$}  {}",
        "project", "version", "status"
    )];
    for row in rows {
        let status = if row.changed {
            "changed".yellow().to_string()
        } else {
            "-".to_string()
        };
        lines.push(format!(
            "{:name_width$}  {:version_width$}  {status}",
            row.project, row.version
        ));
    }
    lines.join("\n")
}

fn render_csv(rows: &[ReportRow]) -> String {
    let mut lines = vec!["project,path,version,changed,rationale".to_string()];
    for row in rows {
        lines.push(format!(
            "{},{},{},{},{}",
            csv_escape(&row.project),
            csv_escape(&row.path),
            csv_escape(&row.version),
            row.changed,
            csv_escape(&row.rationale),
        ));
    }
    lines.join("\n")
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
