//! Bay conflict detection.
//!
//! Decides whether a candidate date range collides with schedules
//! already placed in a bay. Pure and deterministic: O(n) in the number
//! of schedules passed in, no side effects.
//!
//! # Overlap Rule
//! `[s1, e1]` and `[s2, e2]` conflict iff `s1 <= e2 && s2 <= e1`.
//! Both ends are inclusive, so a schedule ending on the day another
//! starts is a conflict.
//!
//! # Scope
//! By default the whole bay is one exclusive resource
//! ([`ConflictScope::Bay`]). [`ConflictScope::Row`] treats each lane
//! as independent and only compares schedules in the same row.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BayId, BaySchedule, DateRange, ScheduleId};

/// Which schedules a candidate is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictScope {
    /// Any schedule in the same bay.
    #[default]
    Bay,
    /// Only schedules in the same bay and the same row.
    Row,
}

/// A candidate placement to check for collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictCheck {
    /// Target bay.
    pub bay_id: BayId,
    /// Requested range.
    pub range: DateRange,
    /// Requested row (only consulted under [`ConflictScope::Row`]).
    pub row: u32,
    /// Comparison scope.
    pub scope: ConflictScope,
    /// Schedule to ignore, typically the one being moved.
    pub exclude: Option<ScheduleId>,
}

impl ConflictCheck {
    /// Creates a bay-scoped check for row 0.
    pub fn new(bay_id: BayId, range: DateRange) -> Self {
        Self {
            bay_id,
            range,
            row: 0,
            scope: ConflictScope::Bay,
            exclude: None,
        }
    }

    /// Sets the requested row.
    pub fn with_row(mut self, row: u32) -> Self {
        self.row = row;
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: ConflictScope) -> Self {
        self.scope = scope;
        self
    }

    /// Ignores the given schedule.
    pub fn excluding(mut self, schedule_id: ScheduleId) -> Self {
        self.exclude = Some(schedule_id);
        self
    }

    /// Whether `schedule` collides with this candidate.
    pub fn collides_with(&self, schedule: &BaySchedule) -> bool {
        if schedule.bay_id != self.bay_id || self.exclude == Some(schedule.id) {
            return false;
        }
        if self.scope == ConflictScope::Row && schedule.row != self.row {
            return false;
        }
        self.range.overlaps(&schedule.range())
    }

    /// All colliding schedules, ordered by start date then id.
    pub fn conflicts<'a>(&self, schedules: &'a [BaySchedule]) -> Vec<&'a BaySchedule> {
        let mut hits: Vec<&BaySchedule> = schedules
            .iter()
            .filter(|s| self.collides_with(s))
            .collect();
        hits.sort_by_key(|s| (s.start_date, s.id));

        debug!(
            bay_id = self.bay_id,
            start = %self.range.start,
            end = %self.range.end,
            scope = ?self.scope,
            hits = hits.len(),
            "conflict check"
        );
        hits
    }

    /// Whether any schedule collides.
    pub fn has_conflict(&self, schedules: &[BaySchedule]) -> bool {
        schedules.iter().any(|s| self.collides_with(s))
    }
}

/// Whether `range` in `bay_id` overlaps any schedule in that bay.
///
/// Schedules in other bays never conflict. `exclude` removes one
/// schedule from consideration, so a schedule being moved is not
/// compared against itself.
pub fn has_conflict(
    bay_id: BayId,
    range: &DateRange,
    schedules: &[BaySchedule],
    exclude: Option<ScheduleId>,
) -> bool {
    let mut check = ConflictCheck::new(bay_id, *range);
    check.exclude = exclude;
    check.has_conflict(schedules)
}

/// Every pair of colliding schedules under `scope`.
///
/// Pairs are `(earlier_id, later_id)` with the earlier schedule by
/// start date first. Used to audit a snapshot fetched from the store.
pub fn overlapping_pairs(
    schedules: &[BaySchedule],
    scope: ConflictScope,
) -> Vec<(ScheduleId, ScheduleId)> {
    let mut sorted: Vec<&BaySchedule> = schedules.iter().collect();
    sorted.sort_by_key(|s| (s.bay_id, s.range().start, s.id));

    let mut pairs = Vec::new();
    for (i, a) in sorted.iter().enumerate() {
        let check = ConflictCheck::new(a.bay_id, a.range())
            .with_row(a.row)
            .with_scope(scope)
            .excluding(a.id);
        for b in &sorted[i + 1..] {
            if b.bay_id != a.bay_id || b.range().start > a.range().end {
                break;
            }
            if check.collides_with(b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}
