//! Error taxonomy for placement operations.
//!
//! | Kind | Raised when | Recovery |
//! |------|-------------|----------|
//! | Conflict | Target bay already booked for the range | User picks another bay or dates |
//! | Validation | Malformed request, checked before any store write | Fix the input |
//! | Persistence | The schedule store failed | User retries |
//!
//! A failed project-status side effect is not an error: it is reported
//! as a [`SideEffectWarning`] on an otherwise successful outcome.

use std::fmt;
use thiserror::Error;

use crate::models::{format_date, BayId, DateRange, ProjectId, ProjectStatus, ScheduleId};
use crate::validation::ValidationError;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Overlap with an existing schedule.
    Conflict,
    /// Malformed input.
    Validation,
    /// Store failure.
    Persistence,
}

/// A placement failure. No schedule was written.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The requested range collides with existing schedules.
    #[error("{0}")]
    Conflict(ConflictDetails),
    /// The request was rejected before any conflict check.
    #[error("invalid placement: {0}")]
    Validation(#[from] ValidationError),
    /// The schedule store could not be read or written.
    #[error("schedule store failed: {0}")]
    Persistence(#[source] StoreError),
}

impl PlacementError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlacementError::Conflict(_) => ErrorKind::Conflict,
            PlacementError::Validation(_) => ErrorKind::Validation,
            PlacementError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// Conflict details, if this is a conflict.
    pub fn conflict(&self) -> Option<&ConflictDetails> {
        match self {
            PlacementError::Conflict(details) => Some(details),
            _ => None,
        }
    }
}

impl From<StoreError> for PlacementError {
    fn from(err: StoreError) -> Self {
        PlacementError::Persistence(err)
    }
}

/// What a rejected placement collided with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictDetails {
    /// Target bay.
    pub bay_id: BayId,
    /// Requested range.
    pub requested: DateRange,
    /// Colliding schedules, ordered by start date.
    pub colliding: Vec<CollidingSchedule>,
}

/// One schedule standing in the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CollidingSchedule {
    /// Schedule id.
    pub schedule_id: ScheduleId,
    /// Project occupying the bay.
    pub project_id: ProjectId,
    /// Occupied range.
    pub range: DateRange,
    /// Lane.
    pub row: u32,
}

impl fmt::Display for ConflictDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bay {} is already booked between {} and {}",
            self.bay_id,
            format_date(self.requested.start),
            format_date(self.requested.end)
        )?;
        if let Some(first) = self.colliding.first() {
            write!(
                f,
                " (schedule {} holds {} to {}",
                first.schedule_id,
                format_date(first.range.start),
                format_date(first.range.end)
            )?;
            if self.colliding.len() > 1 {
                write!(f, ", {} more", self.colliding.len() - 1)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Failure reported by a store collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// A best-effort side effect that failed after a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SideEffectWarning {
    /// Project whose status was not updated.
    pub project_id: ProjectId,
    /// Status that was requested.
    pub requested_status: ProjectStatus,
    /// Underlying failure.
    pub message: String,
}

impl fmt::Display for SideEffectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schedule saved, but project {} could not be marked {:?}: {}",
            self.project_id, self.requested_status, self.message
        )
    }
}
