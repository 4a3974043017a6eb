//! Report rows
//!
//! Flat, serializable rows derived from a store snapshot. The shell prints
//! them as tables or JSON; nothing here renders anything.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::projects::{Project, ProjectStatus, ProjectStore};

/// Pattern used when a configured one cannot render a calendar date
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date with a strftime pattern, `None` if the pattern is invalid
/// or needs fields a calendar date does not have (`%H`, `%z`, ...)
pub fn try_format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(pattern)).ok()?;
    Some(rendered)
}

/// Format a date for display, falling back to ISO for unusable patterns
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    try_format_date(date, pattern)
        .unwrap_or_else(|| date.format(FALLBACK_DATE_FORMAT).to_string())
}

/// Row of the project overview table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
}

impl ProjectRow {
    pub fn new(project: &Project, today: NaiveDate, date_format: &str) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status.label().to_string(),
            start_date: format_date(project.start_date, date_format),
            end_date: format_date(project.end_date, date_format),
            progress: project.progress_at(today),
        }
    }
}

/// Labeled status count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountRow {
    pub status: String,
    pub count: usize,
}

/// Row of the progress-by-date report table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRow {
    pub name: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
    pub days_remaining: i64,
}

impl ProgressRow {
    pub fn new(project: &Project, today: NaiveDate, date_format: &str) -> Self {
        Self {
            name: project.name.clone(),
            status: project.status.label().to_string(),
            start_date: format_date(project.start_date, date_format),
            end_date: format_date(project.end_date, date_format),
            progress: project.progress_at(today),
            days_remaining: project.days_remaining_at(today),
        }
    }
}

/// Timeline (Gantt) data point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub id: u64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
}

/// Overview page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub projects: Vec<ProjectRow>,
    pub timeline: Vec<TimelineEntry>,
}

impl Overview {
    pub fn build(store: &ProjectStore, today: NaiveDate, date_format: &str) -> Self {
        Self {
            projects: store
                .list()
                .iter()
                .map(|p| ProjectRow::new(p, today, date_format))
                .collect(),
            timeline: timeline(store),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Reports page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status_counts: Vec<StatusCountRow>,
    pub progress: Vec<ProgressRow>,
    pub timeline: Vec<TimelineEntry>,
}

impl Report {
    pub fn build(store: &ProjectStore, today: NaiveDate, date_format: &str) -> Self {
        Self {
            status_counts: status_rows(store),
            progress: store
                .list()
                .iter()
                .map(|p| ProgressRow::new(p, today, date_format))
                .collect(),
            timeline: timeline(store),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }
}

/// Labeled status counts in first-occurrence order
pub fn status_rows(store: &ProjectStore) -> Vec<StatusCountRow> {
    store
        .status_counts()
        .iter()
        .map(|entry| StatusCountRow {
            status: entry.status.label().to_string(),
            count: entry.count,
        })
        .collect()
}

/// Timeline entries by start date; projects starting the same day keep insertion order
pub fn timeline(store: &ProjectStore) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = store
        .list()
        .iter()
        .map(|p| TimelineEntry {
            id: p.id,
            name: p.name.clone(),
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
        })
        .collect();
    entries.sort_by_key(|e| e.start_date);
    entries
}
