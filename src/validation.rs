//! Input validation for bay scheduling.
//!
//! Two layers:
//! - [`ValidationError`] is the rejection raised for a single malformed
//!   placement request, before any conflict check or store call.
//! - [`validate_snapshot`] audits a whole bay/schedule snapshot and
//!   reports every problem at once. Detects:
//!   - Duplicate bay or schedule IDs
//!   - Schedules referencing unknown bays
//!   - Inverted date ranges
//!   - Rows outside the configured lane count
//!   - Overlapping schedules under the configured conflict scope

use std::collections::HashSet;
use thiserror::Error;

use crate::config::PlacementConfig;
use crate::conflict::overlapping_pairs;
use crate::models::{Bay, BaySchedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A schedule or request references a bay that doesn't exist.
    UnknownBay,
    /// The target bay exists but is not active.
    InactiveBay,
    /// A move or status change names a schedule that doesn't exist.
    UnknownSchedule,
    /// The project reference is missing.
    MissingProject,
    /// End date before start date.
    InvertedRange,
    /// A derived date falls outside the supported calendar.
    DateOutOfRange,
    /// A date string is not `yyyy-MM-dd`.
    MalformedDate,
    /// Row is outside `[0, max_rows - 1]`.
    RowOutOfRange,
    /// Total hours is negative or not a number.
    InvalidHours,
    /// Two schedules overlap in the same bay (or row).
    OverlappingSchedules,
    /// A drop-target id cannot be decoded.
    MalformedSlotId,
    /// A status change not allowed by the lifecycle.
    InvalidTransition,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a bay/schedule snapshot.
///
/// Checks:
/// 1. No duplicate bay IDs
/// 2. No duplicate schedule IDs
/// 3. Every schedule references an existing bay
/// 4. Every schedule has `start <= end`
/// 5. Every row is below `config.max_rows`
/// 6. No two schedules overlap under `config.conflict_scope`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(
    bays: &[Bay],
    schedules: &[BaySchedule],
    config: &PlacementConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut bay_ids = HashSet::new();
    for bay in bays {
        if !bay_ids.insert(bay.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate bay ID: {}", bay.id),
            ));
        }
    }

    let mut schedule_ids = HashSet::new();
    for s in schedules {
        if !schedule_ids.insert(s.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate schedule ID: {}", s.id),
            ));
        }

        if !bay_ids.contains(&s.bay_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownBay,
                format!("Schedule {} references unknown bay {}", s.id, s.bay_id),
            ));
        }

        if s.end_date < s.start_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!(
                    "Schedule {} ends ({}) before it starts ({})",
                    s.id, s.end_date, s.start_date
                ),
            ));
        }

        if s.row >= config.max_rows {
            errors.push(ValidationError::new(
                ValidationErrorKind::RowOutOfRange,
                format!(
                    "Schedule {} uses row {} but bays have {} rows",
                    s.id, s.row, config.max_rows
                ),
            ));
        }
    }

    for (a, b) in overlapping_pairs(schedules, config.conflict_scope) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OverlappingSchedules,
            format!("Schedules {a} and {b} overlap"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictScope;
    use crate::models::{parse_date, DateRange};

    fn range(s: &str, e: &str) -> DateRange {
        DateRange::new(parse_date(s).unwrap(), parse_date(e).unwrap()).unwrap()
    }

    fn sample_bays() -> Vec<Bay> {
        vec![Bay::new(1, 1), Bay::new(2, 2)]
    }

    fn sample_schedules() -> Vec<BaySchedule> {
        vec![
            BaySchedule::new(10, 100, 1, range("2025-06-01", "2025-06-10")),
            BaySchedule::new(11, 101, 1, range("2025-06-11", "2025-06-20")),
            BaySchedule::new(12, 102, 2, range("2025-06-05", "2025-06-15")).with_row(3),
        ]
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_snapshot() {
        let config = PlacementConfig::default();
        assert!(validate_snapshot(&sample_bays(), &sample_schedules(), &config).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let bays = vec![Bay::new(1, 1), Bay::new(1, 2)];
        let mut schedules = sample_schedules();
        schedules.truncate(2);
        schedules.push(BaySchedule::new(10, 103, 1, range("2025-07-01", "2025-07-02")));

        let errors = validate_snapshot(&bays, &schedules, &PlacementConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("bay")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("schedule")));
    }

    #[test]
    fn test_unknown_bay() {
        let schedules = vec![BaySchedule::new(1, 1, 42, range("2025-06-01", "2025-06-02"))];
        let errors =
            validate_snapshot(&sample_bays(), &schedules, &PlacementConfig::default()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnknownBay));
    }

    #[test]
    fn test_inverted_range() {
        let mut s = BaySchedule::new(1, 1, 1, range("2025-06-01", "2025-06-02"));
        s.end_date = parse_date("2025-05-01").unwrap();
        let errors =
            validate_snapshot(&sample_bays(), &[s], &PlacementConfig::default()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvertedRange));
    }

    #[test]
    fn test_row_out_of_range() {
        let schedules = vec![BaySchedule::new(1, 1, 1, range("2025-06-01", "2025-06-02")).with_row(4)];
        let errors =
            validate_snapshot(&sample_bays(), &schedules, &PlacementConfig::default()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::RowOutOfRange));
    }

    #[test]
    fn test_overlap_respects_scope() {
        let schedules = vec![
            BaySchedule::new(1, 1, 1, range("2025-06-01", "2025-06-10")),
            BaySchedule::new(2, 2, 1, range("2025-06-05", "2025-06-12")).with_row(1),
        ];

        let errors =
            validate_snapshot(&sample_bays(), &schedules, &PlacementConfig::default()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::OverlappingSchedules));

        let per_row = PlacementConfig {
            conflict_scope: ConflictScope::Row,
            ..PlacementConfig::default()
        };
        assert!(validate_snapshot(&sample_bays(), &schedules, &per_row).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let schedules = vec![
            BaySchedule::new(1, 1, 42, range("2025-06-01", "2025-06-10")).with_row(9),
            BaySchedule::new(1, 2, 1, range("2025-06-01", "2025-06-10")),
        ];
        let errors =
            validate_snapshot(&sample_bays(), &schedules, &PlacementConfig::default()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
