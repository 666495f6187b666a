//! Placement request and outcome types.

use chrono::NaiveDate;

use crate::error::SideEffectWarning;
use crate::models::{parse_date, BayId, BaySchedule};
use crate::rows::DropEvent;
use crate::slots::SlotId;
use crate::validation::ValidationError;

/// How the lane of a placement is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RowHint {
    /// Lane 0 for new schedules; the current lane for moves.
    #[default]
    Default,
    /// A specific lane; rejected if outside the bay.
    Explicit(u32),
    /// Resolved from the drop position.
    Drop(DropEvent),
}

/// Where and when to put a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementTarget {
    /// Target bay.
    pub bay_id: BayId,
    /// First day.
    pub start: NaiveDate,
    /// Last day. `None` derives it from the default duration (create)
    /// or the schedule's current length (move).
    pub end: Option<NaiveDate>,
    /// Lane selection.
    pub row: RowHint,
    /// Optional total-hours override.
    pub total_hours: Option<f64>,
}

impl PlacementTarget {
    /// Creates a target starting on `start` with a derived end.
    pub fn new(bay_id: BayId, start: NaiveDate) -> Self {
        Self {
            bay_id,
            start,
            end: None,
            row: RowHint::Default,
            total_hours: None,
        }
    }

    /// Target for a drop on a slot: its bay and anchor date.
    pub fn from_slot(slot: SlotId) -> Self {
        Self::new(slot.bay_id, slot.anchor)
    }

    /// Builds a target from ISO date strings, as sent by a form.
    pub fn from_iso(bay_id: BayId, start: &str, end: Option<&str>) -> Result<Self, ValidationError> {
        let mut target = Self::new(bay_id, parse_date(start)?);
        if let Some(end) = end {
            target.end = Some(parse_date(end)?);
        }
        Ok(target)
    }

    /// Sets the last day.
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Requests a specific lane.
    pub fn with_row(mut self, row: u32) -> Self {
        self.row = RowHint::Explicit(row);
        self
    }

    /// Resolves the lane from a drop.
    pub fn with_drop(mut self, event: DropEvent) -> Self {
        self.row = RowHint::Drop(event);
        self
    }

    /// Sets the total-hours override.
    pub fn with_total_hours(mut self, hours: f64) -> Self {
        self.total_hours = Some(hours);
        self
    }
}

/// A successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    /// The schedule as the store saved it.
    pub schedule: BaySchedule,
    /// Lane the engine asked for.
    pub requested_row: u32,
    /// Set when the project-status side effect failed.
    pub warning: Option<SideEffectWarning>,
}

impl PlacementOutcome {
    /// Whether the store kept the requested lane.
    pub fn row_matches(&self) -> bool {
        self.schedule.row == self.requested_row
    }
}
