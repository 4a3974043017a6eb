//! Session-scoped project store
//!
//! Holds the ordered project records for one session. Insertion order is
//! the default display order and is never rearranged.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::entity::{Project, ProjectStatus};

/// In-memory, append-only collection of projects
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new project at the end of the collection.
    ///
    /// The id is the number of existing projects plus one. No validation
    /// happens here; callers check required fields first.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        status: ProjectStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Project {
        let id = self.projects.len() as u64 + 1;
        let project = Project::new(id, name, description, status, start_date, end_date);
        debug!(id, name = %project.name, status = %status, "Project added");
        self.projects.push(project.clone());
        project
    }

    /// All projects in insertion order
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    /// Set the status of the first project named `name`.
    ///
    /// Returns `false` when nothing matches.
    pub fn update_status(&mut self, name: &str, new_status: ProjectStatus) -> bool {
        match self.projects.iter_mut().find(|p| p.name == name) {
            Some(project) => {
                debug!(id = project.id, name, from = %project.status, to = %new_status, "Status updated");
                project.set_status(new_status);
                true
            }
            None => {
                debug!(name, "Status update matched no project");
                false
            }
        }
    }

    /// Set the status of the project with the given id
    pub fn update_status_by_id(&mut self, id: u64, new_status: ProjectStatus) -> bool {
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                debug!(id, from = %project.status, to = %new_status, "Status updated");
                project.set_status(new_status);
                true
            }
            None => false,
        }
    }

    /// Get a project by id
    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// First project with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Count projects per status
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_projects(&self.projects)
    }
}

/// One status and how many projects currently hold it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}

/// Per-status project counts.
///
/// Only statuses that occur are present, ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts {
    entries: Vec<StatusCount>,
}

impl StatusCounts {
    /// Aggregate a slice of projects
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut entries: Vec<StatusCount> = Vec::new();
        for project in projects {
            match entries.iter_mut().find(|e| e.status == project.status) {
                Some(entry) => entry.count += 1,
                None => entries.push(StatusCount {
                    status: project.status,
                    count: 1,
                }),
            }
        }
        Self { entries }
    }

    /// Count for a status, `None` when no project holds it
    pub fn get(&self, status: ProjectStatus) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.status == status)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusCount> {
        self.entries.iter()
    }

    /// Number of distinct statuses present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<'a> IntoIterator for &'a StatusCounts {
    type Item = &'a StatusCount;
    type IntoIter = std::slice::Iter<'a, StatusCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(store: &mut ProjectStore, name: &str, status: ProjectStatus) -> Project {
        store.add(name, "desc", status, date(2024, 1, 1), date(2024, 2, 1))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ProjectStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
        assert!(store.status_counts().is_empty());
    }

    #[test]
    fn test_add_assigns_positional_ids_in_order() {
        let mut store = ProjectStore::new();
        let names = ["Sales", "Churn", "Inventory", "Finance"];
        for (i, name) in names.iter().enumerate() {
            let created = add(&mut store, name, ProjectStatus::InProgress);
            assert_eq!(created.id, i as u64 + 1);
        }

        let listed: Vec<_> = store.list().iter().map(|p| (p.id, p.name.as_str())).collect();
        assert_eq!(
            listed,
            vec![(1, "Sales"), (2, "Churn"), (3, "Inventory"), (4, "Finance")]
        );
    }

    #[test]
    fn test_add_returns_stored_record() {
        let mut store = ProjectStore::new();
        let created = store.add(
            "Sales",
            "Monthly sales cube",
            ProjectStatus::InDevelopment,
            date(2024, 3, 10),
            date(2024, 3, 1),
        );
        assert_eq!(store.list()[0], created);
        assert_eq!(created.description, "Monthly sales cube");
        assert_eq!(created.end_date, date(2024, 3, 1));
    }

    #[test]
    fn test_update_status_on_empty_store() {
        let mut store = ProjectStore::new();
        assert!(!store.update_status("Sales", ProjectStatus::Finalizing));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_status_no_match_mutates_nothing() {
        let mut store = ProjectStore::new();
        add(&mut store, "Sales", ProjectStatus::Stopped);
        let before = store.list().to_vec();

        assert!(!store.update_status("sales", ProjectStatus::Finalizing));
        assert!(!store.update_status("Sales ", ProjectStatus::Finalizing));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_update_status_affects_first_match_only() {
        let mut store = ProjectStore::new();
        add(&mut store, "Sales", ProjectStatus::Stopped);
        add(&mut store, "Churn", ProjectStatus::Stopped);
        add(&mut store, "Sales", ProjectStatus::Stopped);

        assert!(store.update_status("Sales", ProjectStatus::Finalizing));

        let statuses: Vec<_> = store.list().iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                ProjectStatus::Finalizing,
                ProjectStatus::Stopped,
                ProjectStatus::Stopped
            ]
        );
    }

    #[test]
    fn test_any_transition_is_allowed() {
        let mut store = ProjectStore::new();
        add(&mut store, "Sales", ProjectStatus::Finalizing);
        assert!(store.update_status("Sales", ProjectStatus::Stopped));
        assert!(store.update_status("Sales", ProjectStatus::Stopped));
        assert!(store.update_status("Sales", ProjectStatus::InDevelopment));
        assert_eq!(store.list()[0].status, ProjectStatus::InDevelopment);
    }

    #[test]
    fn test_update_status_by_id_targets_duplicates() {
        let mut store = ProjectStore::new();
        add(&mut store, "Sales", ProjectStatus::Stopped);
        add(&mut store, "Sales", ProjectStatus::Stopped);

        assert!(store.update_status_by_id(2, ProjectStatus::InProgress));
        assert!(!store.update_status_by_id(3, ProjectStatus::InProgress));
        assert_eq!(store.get(1).unwrap().status, ProjectStatus::Stopped);
        assert_eq!(store.get(2).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_lookups() {
        let mut store = ProjectStore::new();
        add(&mut store, "Sales", ProjectStatus::Stopped);
        add(&mut store, "Churn", ProjectStatus::InProgress);
        add(&mut store, "Churn", ProjectStatus::Finalizing);

        assert_eq!(store.find_by_name("Churn").unwrap().id, 2);
        assert!(store.find_by_name("Finance").is_none());
        assert!(store.get(0).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_status_counts_first_occurrence_order() {
        let mut store = ProjectStore::new();
        add(&mut store, "a", ProjectStatus::InProgress);
        add(&mut store, "b", ProjectStatus::Stopped);
        add(&mut store, "c", ProjectStatus::InProgress);
        add(&mut store, "d", ProjectStatus::Finalizing);

        let counts = store.status_counts();
        let entries: Vec<_> = counts.iter().map(|e| (e.status, e.count)).collect();
        assert_eq!(
            entries,
            vec![
                (ProjectStatus::InProgress, 2),
                (ProjectStatus::Stopped, 1),
                (ProjectStatus::Finalizing, 1),
            ]
        );
        assert_eq!(counts.get(ProjectStatus::InDevelopment), None);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_status_counts_follow_updates() {
        let mut store = ProjectStore::new();
        add(&mut store, "a", ProjectStatus::Stopped);
        add(&mut store, "b", ProjectStatus::InProgress);
        store.update_status("a", ProjectStatus::InProgress);

        let counts = store.status_counts();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(ProjectStatus::InProgress), Some(2));
        assert_eq!(counts.get(ProjectStatus::Stopped), None);
    }

    #[test]
    fn test_status_counts_serialize_as_list() {
        let mut store = ProjectStore::new();
        add(&mut store, "a", ProjectStatus::Finalizing);
        let json = serde_json::to_value(store.status_counts()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "status": "finalizing", "count": 1 }])
        );
    }
}
