//! Store collaborators.
//!
//! The placement engine reads and writes through two traits so the
//! persistence layer (REST API, database, test double) stays outside
//! the core:
//!
//! - [`ScheduleStore`]: bays and schedules.
//! - [`ProjectDirectory`]: project lookup and the best-effort status
//!   update.
//!
//! In-memory implementations are provided for tests and tooling.
//!
//! # Concurrent Writers
//! The engine checks conflicts against a snapshot read just before the
//! write. Two writers placing overlapping schedules at the same moment
//! can both pass that check. A shared backing store should re-check
//! inside the same transaction as the write, or reject stale writes
//! with a version stamp, and report the collision as
//! [`StoreError::Rejected`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{
    Bay, BayId, BaySchedule, DateRange, Project, ProjectId, ProjectStatus, ScheduleId,
    ScheduleStatus,
};

/// Body of a schedule create/update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    /// Scheduled project.
    pub project_id: ProjectId,
    /// Target bay.
    pub bay_id: BayId,
    /// First day (`yyyy-MM-dd` on the wire).
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Lane.
    pub row: u32,
    /// Optional total-hours override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

impl SchedulePayload {
    /// Date range of the payload.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Persistence for bays and schedules.
pub trait ScheduleStore {
    /// Current schedules.
    fn list_schedules(&self) -> Result<Vec<BaySchedule>, StoreError>;

    /// Known bays.
    fn list_bays(&self) -> Result<Vec<Bay>, StoreError>;

    /// Persists a new schedule and returns it as saved.
    fn create_schedule(&mut self, payload: &SchedulePayload) -> Result<BaySchedule, StoreError>;

    /// Replaces bay, dates, row and hours of a schedule and returns it as saved.
    fn update_schedule(
        &mut self,
        id: ScheduleId,
        payload: &SchedulePayload,
    ) -> Result<BaySchedule, StoreError>;

    /// Changes a schedule's status.
    fn set_schedule_status(
        &mut self,
        id: ScheduleId,
        status: ScheduleStatus,
    ) -> Result<BaySchedule, StoreError>;

    /// Removes a schedule.
    fn delete_schedule(&mut self, id: ScheduleId) -> Result<(), StoreError>;
}

/// Project lookup and status side channel.
pub trait ProjectDirectory {
    /// Known projects.
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Requests a status change. Callers treat failure as non-fatal.
    fn update_project_status(
        &mut self,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> Result<(), StoreError>;
}

/// Schedule store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    bays: Vec<Bay>,
    schedules: Vec<BaySchedule>,
    next_id: ScheduleId,
}

impl InMemoryScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Adds a bay.
    pub fn with_bay(mut self, bay: Bay) -> Self {
        self.bays.push(bay);
        self
    }

    /// Adds an existing schedule, keeping its id.
    pub fn with_schedule(mut self, schedule: BaySchedule) -> Self {
        self.next_id = self.next_id.max(schedule.id + 1);
        self.schedules.push(schedule);
        self
    }

    /// Schedules currently held.
    pub fn schedules(&self) -> &[BaySchedule] {
        &self.schedules
    }

    fn position(&self, id: ScheduleId) -> Result<usize, StoreError> {
        self.schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound {
                entity: "schedule",
                id,
            })
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn list_schedules(&self) -> Result<Vec<BaySchedule>, StoreError> {
        Ok(self.schedules.clone())
    }

    fn list_bays(&self) -> Result<Vec<Bay>, StoreError> {
        Ok(self.bays.clone())
    }

    fn create_schedule(&mut self, payload: &SchedulePayload) -> Result<BaySchedule, StoreError> {
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        let mut schedule =
            BaySchedule::new(id, payload.project_id, payload.bay_id, payload.range())
                .with_row(payload.row);
        schedule.total_hours = payload.total_hours;
        self.schedules.push(schedule.clone());
        Ok(schedule)
    }

    fn update_schedule(
        &mut self,
        id: ScheduleId,
        payload: &SchedulePayload,
    ) -> Result<BaySchedule, StoreError> {
        let idx = self.position(id)?;
        let schedule = &mut self.schedules[idx];
        schedule.bay_id = payload.bay_id;
        schedule.start_date = payload.start_date;
        schedule.end_date = payload.end_date;
        schedule.row = payload.row;
        schedule.total_hours = payload.total_hours;
        Ok(schedule.clone())
    }

    fn set_schedule_status(
        &mut self,
        id: ScheduleId,
        status: ScheduleStatus,
    ) -> Result<BaySchedule, StoreError> {
        let idx = self.position(id)?;
        self.schedules[idx].status = status;
        Ok(self.schedules[idx].clone())
    }

    fn delete_schedule(&mut self, id: ScheduleId) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.schedules.remove(idx);
        Ok(())
    }
}

/// Project directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Vec<Project>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Looks up a project.
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

impl ProjectDirectory for InMemoryProjectDirectory {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.projects.clone())
    }

    fn update_project_status(
        &mut self,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> Result<(), StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(StoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;
        project.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn payload(bay_id: BayId, start: &str, end: &str) -> SchedulePayload {
        SchedulePayload {
            project_id: 100,
            bay_id,
            start_date: parse_date(start).unwrap(),
            end_date: parse_date(end).unwrap(),
            row: 1,
            total_hours: None,
        }
    }

    #[test]
    fn test_create_assigns_ids() {
        let mut store = InMemoryScheduleStore::new().with_bay(Bay::new(1, 1));
        let a = store.create_schedule(&payload(1, "2025-06-01", "2025-06-05")).unwrap();
        let b = store.create_schedule(&payload(1, "2025-06-10", "2025-06-12")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.row, 1);
        assert_eq!(store.list_schedules().unwrap().len(), 2);
    }

    #[test]
    fn test_ids_continue_after_seeded_schedules() {
        let seeded = BaySchedule::new(41, 1, 1, DateRange::single(parse_date("2025-06-01").unwrap()));
        let mut store = InMemoryScheduleStore::new().with_schedule(seeded);
        let created = store.create_schedule(&payload(1, "2025-07-01", "2025-07-02")).unwrap();
        assert_eq!(created.id, 42);
    }

    #[test]
    fn test_update_keeps_status() {
        let mut store = InMemoryScheduleStore::new();
        let created = store.create_schedule(&payload(1, "2025-06-01", "2025-06-05")).unwrap();
        store
            .set_schedule_status(created.id, ScheduleStatus::InProgress)
            .unwrap();
        let updated = store
            .update_schedule(created.id, &payload(2, "2025-06-03", "2025-06-09"))
            .unwrap();
        assert_eq!(updated.bay_id, 2);
        assert_eq!(updated.status, ScheduleStatus::InProgress);
    }

    #[test]
    fn test_missing_schedule() {
        let mut store = InMemoryScheduleStore::new();
        assert_eq!(
            store.delete_schedule(7),
            Err(StoreError::NotFound {
                entity: "schedule",
                id: 7
            })
        );
        assert!(store
            .update_schedule(7, &payload(1, "2025-06-01", "2025-06-02"))
            .is_err());
    }

    #[test]
    fn test_project_status_update() {
        let mut dir = InMemoryProjectDirectory::new().with_project(Project::new(5, "P5"));
        dir.update_project_status(5, ProjectStatus::Active).unwrap();
        assert_eq!(dir.get(5).unwrap().status, ProjectStatus::Active);
        assert!(dir.update_project_status(6, ProjectStatus::Active).is_err());
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = serde_json::to_value(payload(3, "2025-06-01", "2025-06-10")).unwrap();
        assert_eq!(json["projectId"], 100);
        assert_eq!(json["bayId"], 3);
        assert_eq!(json["startDate"], "2025-06-01");
        assert_eq!(json["endDate"], "2025-06-10");
        assert!(json.get("totalHours").is_none());
    }
}
