//! Bay schedule model.
//!
//! A schedule assigns exactly one project to exactly one bay for a
//! contiguous, inclusive date range, in one lane (row) of that bay.
//! Schedules reference bays and projects by id only.
//!
//! # Status Lifecycle
//!
//! ```text
//! scheduled ──▶ in_progress ──▶ complete
//!     ▲
//!     └──────── maintenance ◀── (any state)
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BayId, DateRange, ProjectId};

/// Schedule identifier.
pub type ScheduleId = i64;

/// An assignment of a project to a bay over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaySchedule {
    /// Unique schedule identifier (assigned by the store).
    pub id: ScheduleId,
    /// Scheduled project.
    pub project_id: ProjectId,
    /// Hosting bay.
    pub bay_id: BayId,
    /// First day in the bay (inclusive).
    pub start_date: NaiveDate,
    /// Last day in the bay (inclusive).
    pub end_date: NaiveDate,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ScheduleStatus,
    /// Lane within the bay (0-based).
    #[serde(default)]
    pub row: u32,
    /// Optional override of the project's total hours.
    #[serde(default)]
    pub total_hours: Option<f64>,
}

/// Lifecycle status of a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Placed but not started.
    #[default]
    Scheduled,
    /// Work under way.
    InProgress,
    /// Work finished.
    Complete,
    /// Bay held for maintenance.
    Maintenance,
}

impl ScheduleStatus {
    /// Whether a manual or date-driven edit may move from `self` to `next`.
    ///
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: ScheduleStatus) -> bool {
        use ScheduleStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (InProgress, Complete)
                | (_, Maintenance)
                | (Maintenance, Scheduled)
        )
    }

    /// Wire name (`scheduled`, `in_progress`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::InProgress => "in_progress",
            ScheduleStatus::Complete => "complete",
            ScheduleStatus::Maintenance => "maintenance",
        }
    }
}

impl BaySchedule {
    /// Creates a scheduled entry in row 0.
    pub fn new(id: ScheduleId, project_id: ProjectId, bay_id: BayId, range: DateRange) -> Self {
        Self {
            id,
            project_id,
            bay_id,
            start_date: range.start,
            end_date: range.end,
            status: ScheduleStatus::Scheduled,
            row: 0,
            total_hours: None,
        }
    }

    /// Sets the lane.
    pub fn with_row(mut self, row: u32) -> Self {
        self.row = row;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ScheduleStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the total-hours override.
    pub fn with_total_hours(mut self, hours: f64) -> Self {
        self.total_hours = Some(hours);
        self
    }

    /// The occupied date range.
    ///
    /// Stored schedules are expected to satisfy `start <= end`; an
    /// inverted pair coming from outside is normalized by swapping.
    #[inline]
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date.min(self.end_date),
            end: self.start_date.max(self.end_date),
        }
    }

    /// Inclusive length in days.
    pub fn duration_days(&self) -> i64 {
        self.range().days()
    }

    /// Whether `day` falls inside the schedule.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.range().contains(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn range(s: &str, e: &str) -> DateRange {
        DateRange::new(parse_date(s).unwrap(), parse_date(e).unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_builder() {
        let s = BaySchedule::new(1, 20, 3, range("2025-06-01", "2025-06-10"))
            .with_row(2)
            .with_status(ScheduleStatus::InProgress)
            .with_total_hours(320.0);

        assert_eq!(s.row, 2);
        assert_eq!(s.status, ScheduleStatus::InProgress);
        assert_eq!(s.total_hours, Some(320.0));
        assert_eq!(s.duration_days(), 10);
        assert!(s.is_active_on(parse_date("2025-06-10").unwrap()));
        assert!(!s.is_active_on(parse_date("2025-06-11").unwrap()));
    }

    #[test]
    fn test_status_transitions() {
        use ScheduleStatus::*;
        assert!(Scheduled.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Complete));
        assert!(Complete.can_transition_to(Maintenance));
        assert!(Scheduled.can_transition_to(Maintenance));
        assert!(Maintenance.can_transition_to(Scheduled));
        assert!(Complete.can_transition_to(Complete));

        assert!(!Scheduled.can_transition_to(Complete));
        assert!(!Complete.can_transition_to(InProgress));
        assert!(!Maintenance.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Scheduled));
    }

    #[test]
    fn test_wire_shape() {
        let s = BaySchedule::new(5, 20, 3, range("2025-06-01", "2025-06-10")).with_row(1);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["projectId"], 20);
        assert_eq!(json["bayId"], 3);
        assert_eq!(json["startDate"], "2025-06-01");
        assert_eq!(json["endDate"], "2025-06-10");
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["row"], 1);
    }

    #[test]
    fn test_deserialize_defaults() {
        let s: BaySchedule = serde_json::from_str(
            r#"{"id":1,"projectId":2,"bayId":3,"startDate":"2025-06-01","endDate":"2025-06-03"}"#,
        )
        .unwrap();
        assert_eq!(s.row, 0);
        assert_eq!(s.status, ScheduleStatus::Scheduled);
        assert!(s.total_hours.is_none());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(ScheduleStatus::InProgress.as_str(), "in_progress");
        assert_eq!(ScheduleStatus::Maintenance.as_str(), "maintenance");
    }
}
