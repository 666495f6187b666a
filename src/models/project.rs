//! Project reference model.
//!
//! Projects are owned by another subsystem. Scheduling reads their
//! number and name for display and may ask for a status change, but
//! never alters their identity.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::BaySchedule;

/// Project identifier.
pub type ProjectId = i64;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not yet started.
    Pending,
    /// Currently in a bay.
    Active,
    /// Paused.
    OnHold,
    /// Finished and shipped.
    Completed,
}

/// A project as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Shop project number (e.g. "804512").
    pub project_number: String,
    /// Display name.
    pub name: String,
    /// Current status.
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a pending project.
    pub fn new(id: ProjectId, project_number: impl Into<String>) -> Self {
        Self {
            id,
            project_number: project_number.into(),
            name: String::new(),
            status: ProjectStatus::Pending,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Label used on timeline bars: `"<number> - <name>"`, or just the number.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.project_number.clone()
        } else {
            format!("{} - {}", self.project_number, self.name)
        }
    }
}

/// Projects that have no schedule in any bay.
///
/// Preserves the input order of `projects`.
pub fn unassigned_projects<'a>(
    projects: &'a [Project],
    schedules: &[BaySchedule],
) -> Vec<&'a Project> {
    let assigned: HashSet<ProjectId> = schedules.iter().map(|s| s.project_id).collect();
    projects
        .iter()
        .filter(|p| !assigned.contains(&p.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, DateRange};

    #[test]
    fn test_project_label() {
        let p = Project::new(1, "804512").with_name("Fire Truck");
        assert_eq!(p.label(), "804512 - Fire Truck");
        assert_eq!(Project::new(2, "804513").label(), "804513");
    }

    #[test]
    fn test_unassigned_projects() {
        let projects = vec![
            Project::new(1, "A"),
            Project::new(2, "B"),
            Project::new(3, "C"),
        ];
        let range = DateRange::single(parse_date("2025-06-01").unwrap());
        let schedules = vec![BaySchedule::new(10, 2, 1, range)];

        let ids: Vec<_> = unassigned_projects(&projects, &schedules)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            r#""on_hold""#
        );
    }
}
