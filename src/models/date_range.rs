//! Date-only value types.
//!
//! Every date in the crate is a `chrono::NaiveDate`: a calendar day with
//! no time of day and no timezone. Parsing and formatting go through
//! [`parse_date`] and [`format_date`] only, so overlap checks and slot
//! generation always agree on what "the same day" means.
//!
//! # Range Model
//! A [`DateRange`] is closed on both ends: `[start, end]`. A range whose
//! start equals its end is a valid one-day range.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Wire format for dates (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!(
                    "End date {} is before start date {}",
                    format_date(end),
                    format_date(start)
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// A range of `days` days beginning at `start` (at least one day).
    ///
    /// Fails when the end would fall past the last representable date.
    pub fn with_length(start: NaiveDate, days: u32) -> Result<Self, ValidationError> {
        let extra = i64::from(days.max(1) - 1);
        let end = shift(start, extra)?;
        Ok(Self { start, end })
    }

    /// Number of days covered, counting both ends.
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `day` falls within the range.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Whether two ranges share at least one day.
    ///
    /// `[s1, e1]` and `[s2, e2]` overlap iff `s1 <= e2 && s2 <= e1`.
    /// Touching ranges (one ends on the day the other starts) overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The days shared by both ranges, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Shifts the range so it starts on `start`, keeping its length.
    pub fn moved_to(&self, start: NaiveDate) -> Result<Self, ValidationError> {
        let end = shift(start, (self.end - self.start).num_days())?;
        Ok(Self { start, end })
    }
}

fn shift(start: NaiveDate, days: i64) -> Result<NaiveDate, ValidationError> {
    Duration::try_days(days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::DateOutOfRange,
                format!(
                    "{} plus {days} days is past the last supported date",
                    format_date(start)
                ),
            )
        })
}

/// Parses a calendar date.
///
/// Accepts `yyyy-MM-dd`, optionally followed by a time-of-day part
/// separated by `T` or a space (`2025-06-01T08:00:00Z`). The time part
/// and any offset are discarded, never converted: `2025-06-01T23:30:00-05:00`
/// is June 1st.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let date_part = trimmed
        .split_once(['T', ' '])
        .map_or(trimmed, |(date, _)| date);

    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|e| {
        ValidationError::new(
            ValidationErrorKind::MalformedDate,
            format!("Cannot parse '{input}' as yyyy-MM-dd: {e}"),
        )
    })
}

/// Formats a date as `yyyy-MM-dd`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted() {
        let err = DateRange::new(d("2025-06-10"), d("2025-06-01")).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvertedRange);
        assert!(DateRange::new(d("2025-06-01"), d("2025-06-01")).is_ok());
    }

    #[test]
    fn test_range_days() {
        let r = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        assert_eq!(r.days(), 10);
        assert_eq!(DateRange::single(d("2025-06-01")).days(), 1);
        assert_eq!(
            DateRange::with_length(d("2025-06-01"), 7).unwrap().end,
            d("2025-06-07")
        );
        assert_eq!(DateRange::with_length(d("2025-06-01"), 0).unwrap().days(), 1);
    }

    #[test]
    fn test_range_overlap_inclusive() {
        let a = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        let touching = DateRange::new(d("2025-06-10"), d("2025-06-12")).unwrap();
        let adjacent = DateRange::new(d("2025-06-11"), d("2025-06-20")).unwrap();

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&adjacent));
        assert!(!adjacent.overlaps(&a));
    }

    #[test]
    fn test_range_intersection() {
        let a = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        let b = DateRange::new(d("2025-06-08"), d("2025-06-20")).unwrap();
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.start, d("2025-06-08"));
        assert_eq!(i.end, d("2025-06-10"));

        let c = DateRange::single(d("2025-07-01"));
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_moved_to_keeps_length() {
        let a = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        let moved = a.moved_to(d("2025-06-15")).unwrap();
        assert_eq!(moved.end, d("2025-06-24"));
        assert_eq!(moved.days(), a.days());
    }

    #[test]
    fn test_length_past_calendar_end() {
        let err = DateRange::with_length(NaiveDate::MAX, 2).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DateOutOfRange);
        let err = DateRange::with_length(d("2025-06-01"), u32::MAX).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DateOutOfRange);
        assert_eq!(DateRange::with_length(NaiveDate::MAX, 1).unwrap().days(), 1);
    }

    #[test]
    fn test_moved_to_past_calendar_end() {
        let a = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        let err = a.moved_to(NaiveDate::MAX).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DateOutOfRange);
    }

    #[test]
    fn test_parse_date_strips_time() {
        assert_eq!(d("2025-06-01T23:30:00-05:00"), d("2025-06-01"));
        assert_eq!(d("2025-06-01T00:00:00.000Z"), d("2025-06-01"));
        assert_eq!(d("2025-06-01 08:30"), d("2025-06-01"));
        assert_eq!(d("  2025-06-01  "), d("2025-06-01"));
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        let err = parse_date("06/01/2025").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedDate);
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(d("2025-06-01")), "2025-06-01");
    }

    #[test]
    fn test_range_serde_uses_iso_dates() {
        let r = DateRange::new(d("2025-06-01"), d("2025-06-10")).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"start":"2025-06-01","end":"2025-06-10"}"#);
    }
}
