//! Timeline granularity.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

/// Granularity of the timeline: one slot per day, week or month.
///
/// Week slots start on Monday. Month slots start on the 1st and last
/// for the whole calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One slot per day.
    Day,
    /// One slot per Monday-based week.
    #[default]
    Week,
    /// One slot per calendar month.
    Month,
}

impl ViewMode {
    /// All view modes, finest first.
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    /// Nominal slot length in days (1, 7, 30).
    ///
    /// Month slots really last 28–31 days; see [`ViewMode::slot_range`].
    pub fn nominal_days(self) -> u32 {
        match self {
            ViewMode::Day => 1,
            ViewMode::Week => 7,
            ViewMode::Month => 30,
        }
    }

    /// Suffix appended to slot ids for this mode.
    pub fn id_suffix(self) -> &'static str {
        match self {
            ViewMode::Day => "",
            ViewMode::Week => "-week",
            ViewMode::Month => "-month",
        }
    }

    /// First day of the slot containing `date`.
    pub fn anchor_for(self, date: NaiveDate) -> NaiveDate {
        match self {
            ViewMode::Day => date,
            ViewMode::Week => date - Duration::days(i64::from(date.weekday().num_days_from_monday())),
            ViewMode::Month => date - Duration::days(i64::from(date.day0())),
        }
    }

    /// Whether `date` is the first day of a slot.
    pub fn is_anchor(self, date: NaiveDate) -> bool {
        self.anchor_for(date) == date
    }

    /// Anchor of the slot after the one anchored at `anchor`.
    ///
    /// `None` at the end of the representable calendar.
    pub fn next_anchor(self, anchor: NaiveDate) -> Option<NaiveDate> {
        match self {
            ViewMode::Day => anchor.succ_opt(),
            ViewMode::Week => anchor.checked_add_signed(Duration::days(7)),
            ViewMode::Month => anchor.checked_add_months(Months::new(1)),
        }
    }

    /// Days covered by the slot anchored at `anchor`.
    pub fn slot_range(self, anchor: NaiveDate) -> DateRange {
        let end = self
            .next_anchor(anchor)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        DateRange { start: anchor, end }
    }

    /// Slot ranges covering `[window_start, window_end]`, widened to whole slots.
    ///
    /// Empty when `window_end < window_start`.
    pub fn slot_ranges(self, window_start: NaiveDate, window_end: NaiveDate) -> Vec<DateRange> {
        let mut ranges = Vec::new();
        if window_end < window_start {
            return ranges;
        }

        let mut anchor = Some(self.anchor_for(window_start));
        while let Some(current) = anchor {
            if current > window_end {
                break;
            }
            ranges.push(self.slot_range(current));
            anchor = self.next_anchor(current);
        }
        ranges
    }
}
