//! Run report presentation: text and json formatters for update and
//! save-changes runs.

use crate::error::ConfiguratorError;
use crate::workspace::{FileFailure, HarvestReport, ReconcileReport};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub fn format_reconcile_report(
    report: &ReconcileReport,
    format: &str,
) -> Result<String, ConfiguratorError> {
    if format == "json" {
        return to_json(report);
    }
    Ok(format_reconcile_text(report, std::io::stdout().is_terminal()))
}

pub fn format_harvest_report(
    report: &HarvestReport,
    format: &str,
) -> Result<String, ConfiguratorError> {
    if format == "json" {
        return to_json(report);
    }
    Ok(format_harvest_text(report, std::io::stdout().is_terminal()))
}

pub fn format_reconcile_text(report: &ReconcileReport, color: bool) -> String {
    let mut out = format!("{}\n", heading("Workspace update", color));
    out.push_str(&format!("  Configuration files: {}\n", report.discovered));
    out.push_str(&format!("  Preferences merged: {}\n", report.merged));
    out.push_str(&format!("  Documents resolved: {}\n", report.resolved_documents));
    out.push_str(&format!("  Files copied: {}\n", report.copied));
    out.push_str(&format!("  Unchanged: {}\n", report.unchanged));
    out.push_str(&format!("  Skipped: {}\n", report.skipped));
    push_failures(&mut out, &report.failures, color);
    out
}

pub fn format_harvest_text(report: &HarvestReport, color: bool) -> String {
    let mut out = format!("{}\n", heading("Saved workspace changes", color));
    out.push_str(&format!("  Preference files examined: {}\n", report.examined));
    out.push_str(&format!("  Templates updated: {}\n", report.saved));
    out.push_str(&format!("  Unchanged: {}\n", report.unchanged));
    out.push_str(&format!("  Not in workspace: {}\n", report.skipped));
    push_failures(&mut out, &report.failures, color);
    out
}

fn heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

fn push_failures(out: &mut String, failures: &[FileFailure], color: bool) {
    if failures.is_empty() {
        return;
    }
    let title = format!("Failures ({}):", failures.len());
    if color {
        out.push_str(&format!("\n{}\n", title.red().bold()));
    } else {
        out.push_str(&format!("\n{}\n", title));
    }
    for failure in failures {
        out.push_str(&format!("  - {}: {}\n", failure.relative_path, failure.reason));
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ConfiguratorError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ConfiguratorError::ConfigError(format!("Failed to render summary: {}", e)))
}
