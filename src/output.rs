//! Output formatting and persistence for analytics reports.
//!
//! Supports pretty-printing, JSON files, and a CSV history of summaries.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::analytics::AnalyticsReport;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One flat row per refresh, for tracking headline figures over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub generated_at: NaiveDateTime,
    pub monthly_expenses: f64,
    pub yearly_expenses: f64,
    pub total_gallons: f64,
    pub avg_mpg: f64,
    pub best_mpg: f64,
    pub worst_mpg: f64,
    pub maintenance_total: f64,
    pub potential_savings: f64,
    pub eco_driving_score: f64,
}

impl ReportSummary {
    pub fn from_report(report: &AnalyticsReport, generated_at: NaiveDateTime) -> Self {
        Self {
            generated_at,
            monthly_expenses: report.monthly_expenses,
            yearly_expenses: report.yearly_expenses,
            total_gallons: report.total_gallons,
            avg_mpg: report.avg_mpg,
            best_mpg: report.best_mpg,
            worst_mpg: report.worst_mpg,
            maintenance_total: report.maintenance_costs.total,
            potential_savings: report.cost_savings.potential,
            eco_driving_score: report.environmental_score.eco_driving_score,
        }
    }
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalyticsReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &AnalyticsReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the report as pretty JSON, creating parent directories as needed.
pub fn write_report(path: &str, report: &AnalyticsReport) -> Result<()> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let body = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, body).with_context(|| format!("writing {path}"))?;
    debug!(path, "Report written");
    Ok(())
}

/// Appends a [`ReportSummary`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &str, summary: &ReportSummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV summary");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening {path}"))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}
