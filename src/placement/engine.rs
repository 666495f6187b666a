//! Placement engine.
//!
//! # Algorithm (create and move)
//!
//! 1. Validate what needs no store: project, dates, hours, row.
//! 2. Derive the end date when absent, then check the bay exists and is active.
//! 3. Check conflicts in the target bay, excluding the moved schedule.
//! 4. On conflict, stop with [`PlacementError::Conflict`]; nothing is written.
//! 5. Persist through the [`ScheduleStore`].
//! 6. If today falls inside the new range, ask the [`ProjectDirectory`]
//!    to mark the project active. Failure only yields a warning.
//! 7. Return the schedule as saved.
//!
//! The engine holds no state between calls beyond its collaborators
//! and configuration: every operation re-reads the schedule snapshot.

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::{PlacementOutcome, PlacementTarget, RowHint};
use crate::config::PlacementConfig;
use crate::conflict::ConflictCheck;
use crate::error::{CollidingSchedule, ConflictDetails, PlacementError, SideEffectWarning};
use crate::models::{
    Bay, BayId, BaySchedule, DateRange, ProjectId, ProjectStatus, ScheduleId, ScheduleStatus,
};
use crate::rows::{resolve_row, DropEvent};
use crate::slots::{build_slots, Slot, SlotId, ViewMode};
use crate::store::{ProjectDirectory, SchedulePayload, ScheduleStore};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Places projects into bays.
///
/// # Example
///
/// ```
/// use bay_schedule::models::{parse_date, Bay, Project};
/// use bay_schedule::placement::{PlacementEngine, PlacementTarget};
/// use bay_schedule::store::{InMemoryProjectDirectory, InMemoryScheduleStore};
///
/// let store = InMemoryScheduleStore::new().with_bay(Bay::new(1, 1));
/// let projects = InMemoryProjectDirectory::new().with_project(Project::new(7, "804512"));
/// let mut engine = PlacementEngine::new(store, projects)
///     .with_today(parse_date("2025-01-01").unwrap());
///
/// let target = PlacementTarget::new(1, parse_date("2025-06-01").unwrap());
/// let outcome = engine.create_schedule(7, target).unwrap();
/// assert_eq!(outcome.schedule.end_date, parse_date("2025-06-07").unwrap());
///
/// let clash = PlacementTarget::new(1, parse_date("2025-06-05").unwrap());
/// assert!(engine.create_schedule(8, clash).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PlacementEngine<S, P> {
    store: S,
    projects: P,
    config: PlacementConfig,
    today: Option<NaiveDate>,
}

/// A validated request ready for the conflict check.
struct Resolved {
    project_id: ProjectId,
    range: DateRange,
    row: u32,
}

impl<S: ScheduleStore, P: ProjectDirectory> PlacementEngine<S, P> {
    /// Creates an engine with the default configuration.
    pub fn new(store: S, projects: P) -> Self {
        Self {
            store,
            projects,
            config: PlacementConfig::default(),
            today: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PlacementConfig) -> Self {
        self.config = config;
        self
    }

    /// Pins "today" (defaults to the local calendar date).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Schedule store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Project directory.
    pub fn projects(&self) -> &P {
        &self.projects
    }

    /// Releases the collaborators.
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.projects)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Places `project_id` into a bay.
    ///
    /// Without an end date the schedule lasts `default_duration_days`.
    pub fn create_schedule(
        &mut self,
        project_id: ProjectId,
        target: PlacementTarget,
    ) -> Result<PlacementOutcome, PlacementError> {
        if project_id <= 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingProject,
                "A project is required to create a schedule",
            )
            .into());
        }

        self.check_request(&target)?;
        let range = self.target_range(&target, None)?;

        let bays = self.store.list_bays()?;
        let schedules = self.store.list_schedules()?;
        let resolved = self.resolve(project_id, &target, range, &bays, None)?;
        self.ensure_free(&target, &resolved, &schedules, None)?;

        let payload = payload_for(&target, &resolved);
        let saved = self.store.create_schedule(&payload)?;
        info!(
            schedule_id = saved.id,
            project_id,
            bay_id = saved.bay_id,
            start = %saved.start_date,
            end = %saved.end_date,
            row = saved.row,
            "schedule created"
        );

        Ok(self.finish(saved, resolved.row))
    }

    /// Moves an existing schedule to another bay, dates or lane.
    ///
    /// Without an end date the schedule keeps its current length; with
    /// [`RowHint::Default`] it keeps its current lane.
    pub fn move_schedule(
        &mut self,
        schedule_id: ScheduleId,
        target: PlacementTarget,
    ) -> Result<PlacementOutcome, PlacementError> {
        self.check_request(&target)?;

        let bays = self.store.list_bays()?;
        let schedules = self.store.list_schedules()?;
        let existing = find_schedule(&schedules, schedule_id)?;

        let range = self.target_range(&target, Some(existing))?;
        let resolved =
            self.resolve(existing.project_id, &target, range, &bays, Some(existing))?;
        self.ensure_free(&target, &resolved, &schedules, Some(schedule_id))?;

        let payload = payload_for(&target, &resolved);
        let saved = self.store.update_schedule(schedule_id, &payload)?;
        info!(
            schedule_id,
            from_bay = existing.bay_id,
            to_bay = saved.bay_id,
            start = %saved.start_date,
            end = %saved.end_date,
            row = saved.row,
            "schedule moved"
        );

        Ok(self.finish(saved, resolved.row))
    }

    /// Creates a schedule from a drop on a slot.
    ///
    /// The schedule starts on the slot's anchor date and lasts the
    /// default duration; its lane comes from the drop.
    pub fn drop_on_slot(
        &mut self,
        project_id: ProjectId,
        slot_id: &str,
        drop: DropEvent,
    ) -> Result<PlacementOutcome, PlacementError> {
        let slot = SlotId::parse(slot_id)?;
        debug!(project_id, %slot_id, "drop on slot");
        self.create_schedule(project_id, PlacementTarget::from_slot(slot).with_drop(drop))
    }

    /// Deletes a schedule, returning its project to the unassigned pool.
    pub fn unassign_schedule(
        &mut self,
        schedule_id: ScheduleId,
    ) -> Result<BaySchedule, PlacementError> {
        let schedules = self.store.list_schedules()?;
        let existing = find_schedule(&schedules, schedule_id)?.clone();
        self.store.delete_schedule(schedule_id)?;
        info!(
            schedule_id,
            project_id = existing.project_id,
            bay_id = existing.bay_id,
            "schedule unassigned"
        );
        Ok(existing)
    }

    /// Changes a schedule's status along the allowed lifecycle.
    pub fn update_status(
        &mut self,
        schedule_id: ScheduleId,
        status: ScheduleStatus,
    ) -> Result<BaySchedule, PlacementError> {
        let schedules = self.store.list_schedules()?;
        let existing = find_schedule(&schedules, schedule_id)?;
        if !existing.status.can_transition_to(status) {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidTransition,
                format!(
                    "Schedule {schedule_id} cannot go from {} to {}",
                    existing.status.as_str(),
                    status.as_str()
                ),
            )
            .into());
        }
        let saved = self.store.set_schedule_status(schedule_id, status)?;
        info!(schedule_id, status = status.as_str(), "schedule status changed");
        Ok(saved)
    }

    /// Slot grid for the current snapshot.
    pub fn slots(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
        view_mode: ViewMode,
    ) -> Result<BTreeMap<BayId, Vec<Slot>>, PlacementError> {
        let bays = self.store.list_bays()?;
        let schedules = self.store.list_schedules()?;
        Ok(build_slots(&bays, &schedules, window_start, window_end, view_mode))
    }

    /// Checks that need no store access: date order, hours, lane bound.
    fn check_request(&self, target: &PlacementTarget) -> Result<(), PlacementError> {
        if let Some(end) = target.end {
            DateRange::new(target.start, end)?;
        }

        if let Some(hours) = target.total_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidHours,
                    format!("Total hours must be a non-negative number, got {hours}"),
                )
                .into());
            }
        }

        let max_rows = self.config.lane_layout().max_rows;
        if let RowHint::Explicit(row) = target.row {
            if row >= max_rows {
                return Err(ValidationError::new(
                    ValidationErrorKind::RowOutOfRange,
                    format!("Row {row} is outside 0..{max_rows}"),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Requested range, deriving a missing end date.
    fn target_range(
        &self,
        target: &PlacementTarget,
        existing: Option<&BaySchedule>,
    ) -> Result<DateRange, ValidationError> {
        match (target.end, existing) {
            (Some(end), _) => DateRange::new(target.start, end),
            (None, Some(current)) => current.range().moved_to(target.start),
            (None, None) => DateRange::with_length(target.start, self.config.default_duration_days),
        }
    }

    fn resolve(
        &self,
        project_id: ProjectId,
        target: &PlacementTarget,
        range: DateRange,
        bays: &[Bay],
        existing: Option<&BaySchedule>,
    ) -> Result<Resolved, PlacementError> {
        let bay = bays.iter().find(|b| b.id == target.bay_id).ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::UnknownBay,
                format!("Bay {} does not exist", target.bay_id),
            )
        })?;
        if !bay.is_active {
            return Err(ValidationError::new(
                ValidationErrorKind::InactiveBay,
                format!("Bay {} is not active", bay.id),
            )
            .into());
        }

        let layout = self.config.lane_layout();
        let row = match target.row {
            RowHint::Explicit(row) => row,
            RowHint::Drop(event) => resolve_row(&event, &layout),
            RowHint::Default => existing.map_or(0, |s| layout.clamp_row(s.row)),
        };

        Ok(Resolved {
            project_id,
            range,
            row,
        })
    }

    fn ensure_free(
        &self,
        target: &PlacementTarget,
        resolved: &Resolved,
        schedules: &[BaySchedule],
        exclude: Option<ScheduleId>,
    ) -> Result<(), PlacementError> {
        let mut check = ConflictCheck::new(target.bay_id, resolved.range)
            .with_row(resolved.row)
            .with_scope(self.config.conflict_scope);
        check.exclude = exclude;

        let hits = check.conflicts(schedules);
        if hits.is_empty() {
            return Ok(());
        }

        warn!(
            bay_id = target.bay_id,
            start = %resolved.range.start,
            end = %resolved.range.end,
            colliding = hits.len(),
            "placement rejected: bay occupied"
        );
        Err(PlacementError::Conflict(ConflictDetails {
            bay_id: target.bay_id,
            requested: resolved.range,
            colliding: hits
                .into_iter()
                .map(|s| CollidingSchedule {
                    schedule_id: s.id,
                    project_id: s.project_id,
                    range: s.range(),
                    row: s.row,
                })
                .collect(),
        }))
    }

    fn finish(&mut self, saved: BaySchedule, requested_row: u32) -> PlacementOutcome {
        if saved.row != requested_row {
            warn!(
                schedule_id = saved.id,
                requested_row,
                saved_row = saved.row,
                "store saved a different row than requested"
            );
        }

        let warning = if self.config.promote_active && saved.is_active_on(self.today()) {
            self.promote_project(saved.project_id)
        } else {
            None
        };

        PlacementOutcome {
            schedule: saved,
            requested_row,
            warning,
        }
    }

    fn promote_project(&mut self, project_id: ProjectId) -> Option<SideEffectWarning> {
        match self
            .projects
            .update_project_status(project_id, ProjectStatus::Active)
        {
            Ok(()) => {
                debug!(project_id, "project marked active");
                None
            }
            Err(e) => {
                warn!(project_id, error = %e, "could not mark project active");
                Some(SideEffectWarning {
                    project_id,
                    requested_status: ProjectStatus::Active,
                    message: e.to_string(),
                })
            }
        }
    }
}

fn find_schedule(
    schedules: &[BaySchedule],
    schedule_id: ScheduleId,
) -> Result<&BaySchedule, PlacementError> {
    schedules
        .iter()
        .find(|s| s.id == schedule_id)
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::UnknownSchedule,
                format!("Schedule {schedule_id} does not exist"),
            )
            .into()
        })
}

fn payload_for(target: &PlacementTarget, resolved: &Resolved) -> SchedulePayload {
    SchedulePayload {
        project_id: resolved.project_id,
        bay_id: target.bay_id,
        start_date: resolved.range.start,
        end_date: resolved.range.end,
        row: resolved.row,
        total_hours: target.total_hours,
    }
}
