//! Text and JSON rendering of core report rows

use std::io::Write;

use biboard_core::Error;
use biboard_core::domain::projects::{Project, ProjectStatus};
use biboard_core::reports::{Overview, Report, TimelineEntry, format_date};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn json<T: Serialize>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string(value)?)?;
    Ok(())
}

/// Render a recoverable error
pub fn error(out: &mut dyn Write, format: OutputFormat, err: &Error) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Error [{}]: {}", err.code(), err)?;
            if let Some(suggestion) = err.suggestion() {
                writeln!(out, "  Try: {}", suggestion)?;
            }
        }
        OutputFormat::Json => json(
            out,
            &serde_json::json!({
                "error": {
                    "code": err.code(),
                    "message": err.to_string(),
                    "suggestion": err.suggestion(),
                }
            }),
        )?,
    }
    Ok(())
}

/// Render a validation warning (missing field, bad date, ...)
pub fn warning(out: &mut dyn Write, format: OutputFormat, field: Option<&str>, message: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "Warning: {}", message)?,
        OutputFormat::Json => json(
            out,
            &serde_json::json!({ "warning": { "field": field, "message": message } }),
        )?,
    }
    Ok(())
}

pub fn project_added(out: &mut dyn Write, format: OutputFormat, project: &Project) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "Project added: #{} {} ({})",
            project.id,
            project.name,
            project.status.label()
        )?,
        OutputFormat::Json => json(out, project)?,
    }
    Ok(())
}

pub fn project_details(
    out: &mut dyn Write,
    format: OutputFormat,
    project: &Project,
    progress: u8,
    date_format: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "📁 {}", project.name)?;
            writeln!(out, "  ID: {}", project.id)?;
            writeln!(out, "  Description: {}", project.description)?;
            writeln!(out, "  Status: {}", project.status.label())?;
            writeln!(out, "  Start: {}", format_date(project.start_date, date_format))?;
            writeln!(out, "  End: {}", format_date(project.end_date, date_format))?;
            writeln!(out, "  Progress: {}% {}", progress, progress_bar(progress))?;
        }
        OutputFormat::Json => json(
            out,
            &serde_json::json!({ "project": project, "progress": progress }),
        )?,
    }
    Ok(())
}

pub fn overview(out: &mut dyn Write, format: OutputFormat, overview: &Overview) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, overview);
    }

    if overview.is_empty() {
        writeln!(out, "No projects recorded.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<24} {:<20} {:<12} {:<12} {:>8}",
        "ID", "Project", "Status", "Start", "End", "Progress"
    )?;
    for row in &overview.projects {
        writeln!(
            out,
            "{:<4} {:<24} {:<20} {:<12} {:<12} {:>7}%",
            row.id, row.name, row.status, row.start_date, row.end_date, row.progress
        )?;
    }
    Ok(())
}

pub fn report(out: &mut dyn Write, format: OutputFormat, report: &Report) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, report);
    }

    if report.is_empty() {
        writeln!(out, "No projects recorded to build reports.")?;
        return Ok(());
    }

    writeln!(out, "Projects by status:")?;
    for row in &report.status_counts {
        writeln!(out, "  {:<20} {}", row.status, row.count)?;
    }

    writeln!(out)?;
    writeln!(out, "Progress by date:")?;
    writeln!(
        out,
        "  {:<24} {:<20} {:<12} {:<12} {:>8} {:>10}",
        "Project", "Status", "Start", "End", "Progress", "Days left"
    )?;
    for row in &report.progress {
        writeln!(
            out,
            "  {:<24} {:<20} {:<12} {:<12} {:>7}% {:>10}",
            row.name, row.status, row.start_date, row.end_date, row.progress, row.days_remaining
        )?;
    }
    Ok(())
}

pub fn timeline(
    out: &mut dyn Write,
    format: OutputFormat,
    entries: &[TimelineEntry],
    date_format: &str,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return json(out, &entries);
    }

    if entries.is_empty() {
        writeln!(out, "No projects recorded.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(
            out,
            "{:<24} {} -> {}  {}",
            entry.name,
            format_date(entry.start_date, date_format),
            format_date(entry.end_date, date_format),
            entry.status.label()
        )?;
    }
    Ok(())
}

pub fn statuses(out: &mut dyn Write, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for status in ProjectStatus::ALL {
                writeln!(out, "{}", status.label())?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = ProjectStatus::ALL
                .iter()
                .map(|s| serde_json::json!({ "status": s, "name": s.as_str(), "label": s.label() }))
                .collect();
            json(out, &rows)?;
        }
    }
    Ok(())
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress) / 10;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}
