//! Project Entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::metrics;

/// Project status
///
/// Any status can move to any other; there are no transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Stopped,
    InProgress,
    InDevelopment,
    Finalizing,
}

/// Canonical status names paired with their display labels
const STATUS_LABELS: [(&str, &str); 4] = [
    ("Stopped", "🔴 Stopped"),
    ("In Progress", "🟢 In Progress"),
    ("In Development", "🟡 In Development"),
    ("Finalizing", "🔵 Finalizing"),
];

impl ProjectStatus {
    /// All statuses in selection order
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Stopped,
        ProjectStatus::InProgress,
        ProjectStatus::InDevelopment,
        ProjectStatus::Finalizing,
    ];

    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        STATUS_LABELS[self.index()].0
    }

    /// Display name prefixed with the status marker
    pub fn label(&self) -> &'static str {
        STATUS_LABELS[self.index()].1
    }

    /// Parse a canonical name, a snake/kebab-case key, or a label
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "stopped" => Some(Self::Stopped),
            "inprogress" => Some(Self::InProgress),
            "indevelopment" => Some(Self::InDevelopment),
            "finalizing" => Some(Self::Finalizing),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Stopped => 0,
            Self::InProgress => 1,
            Self::InDevelopment => 2,
            Self::Finalizing => 3,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a raw status name to its display label.
///
/// Names outside the known set are returned unchanged so that legacy or
/// unexpected values still render.
pub fn status_label(status: &str) -> String {
    STATUS_LABELS
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| status.to_string())
}

/// A tracked BI project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Position-based identifier assigned at creation
    pub id: u64,
    /// Project name, used as the lookup key for status updates
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Current status
    pub status: ProjectStatus,
    /// Planned start date
    pub start_date: NaiveDate,
    /// Planned end date, not required to follow the start date
    pub end_date: NaiveDate,
    /// When the project was recorded
    pub created_at: DateTime<Utc>,
    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project record
    pub fn new(
        id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        status: ProjectStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            status,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the status
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Progress percentage as of `today`
    pub fn progress_at(&self, today: NaiveDate) -> u8 {
        metrics::progress_percent_at(self.start_date, self.end_date, today)
    }

    /// Days until the end date as of `today`, negative once overdue
    pub fn days_remaining_at(&self, today: NaiveDate) -> i64 {
        metrics::days_remaining_at(self.end_date, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label("Stopped"), "🔴 Stopped");
        assert_eq!(status_label("In Progress"), "🟢 In Progress");
        assert_eq!(status_label("In Development"), "🟡 In Development");
        assert_eq!(status_label("Finalizing"), "🔵 Finalizing");
    }

    #[test]
    fn test_status_label_passes_unknown_through() {
        assert_eq!(status_label("Archived"), "Archived");
        assert_eq!(status_label(""), "");
        assert_eq!(status_label("stopped"), "stopped");
    }

    #[test]
    fn test_typed_label_matches_lookup() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.label(), status_label(status.as_str()));
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(ProjectStatus::parse("Stopped"), Some(ProjectStatus::Stopped));
        assert_eq!(ProjectStatus::parse("in progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::parse("in_development"), Some(ProjectStatus::InDevelopment));
        assert_eq!(ProjectStatus::parse("in-progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::parse("🔵 Finalizing"), Some(ProjectStatus::Finalizing));
        assert_eq!(ProjectStatus::parse("done"), None);
        assert_eq!(ProjectStatus::parse(""), None);
    }

    #[test]
    fn test_status_serde_keys() {
        let json = serde_json::to_string(&ProjectStatus::InDevelopment).unwrap();
        assert_eq!(json, "\"in_development\"");
        let parsed: ProjectStatus = serde_json::from_str("\"finalizing\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Finalizing);
    }

    #[test]
    fn test_set_status_touches_updated_at() {
        let mut project = Project::new(
            1,
            "Churn model",
            "Quarterly churn analysis",
            ProjectStatus::Stopped,
            date(2024, 1, 1),
            date(2024, 2, 1),
        );
        let before = project.updated_at;
        project.set_status(ProjectStatus::Finalizing);
        assert_eq!(project.status, ProjectStatus::Finalizing);
        assert!(project.updated_at >= before);
        assert_eq!(project.created_at, before);
    }
}
