//! Timeline geometry.
//!
//! Pixel math shared by the board renderer and drop handling: where a
//! schedule bar starts, how wide it is, and which day sits under a
//! horizontal pointer offset. Bars are proportional to duration at the
//! scale of the current view mode.
//!
//! Month slots have a fixed pixel width even though months differ in
//! length, so in month view a day's width depends on its month.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::BaySchedule;
use crate::rows::LaneLayout;
use crate::slots::ViewMode;

/// Width of one slot per view mode (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineScale {
    /// Width of a day slot.
    #[serde(default = "default_day_width")]
    pub day_width_px: f64,
    /// Width of a week slot.
    #[serde(default = "default_week_width")]
    pub week_width_px: f64,
    /// Width of a month slot.
    #[serde(default = "default_month_width")]
    pub month_width_px: f64,
}

fn default_day_width() -> f64 {
    40.0
}

fn default_week_width() -> f64 {
    120.0
}

fn default_month_width() -> f64 {
    240.0
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self {
            day_width_px: default_day_width(),
            week_width_px: default_week_width(),
            month_width_px: default_month_width(),
        }
    }
}

impl TimelineScale {
    /// Width of one slot in `view`.
    pub fn slot_width(&self, view: ViewMode) -> f64 {
        match view {
            ViewMode::Day => self.day_width_px,
            ViewMode::Week => self.week_width_px,
            ViewMode::Month => self.month_width_px,
        }
    }

    /// Checks that every width is positive and finite.
    pub fn validate(&self) -> Result<(), String> {
        for view in ViewMode::ALL {
            let w = self.slot_width(view);
            if !(w.is_finite() && w > 0.0) {
                return Err(format!("{view:?} slot width must be positive, got {w}"));
            }
        }
        Ok(())
    }
}

/// Position and size of a schedule bar (px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Left edge relative to the timeline origin.
    pub left_px: f64,
    /// Bar width.
    pub width_px: f64,
    /// Top edge relative to the bay's lane area.
    pub top_px: f64,
    /// Bar height (one lane).
    pub height_px: f64,
}

/// Horizontal axis of the board for one window and view mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineAxis {
    origin: NaiveDate,
    view: ViewMode,
    scale: TimelineScale,
}

impl TimelineAxis {
    /// Creates an axis whose x=0 is the start of the slot containing
    /// `window_start`.
    pub fn new(window_start: NaiveDate, view: ViewMode, scale: TimelineScale) -> Self {
        Self {
            origin: view.anchor_for(window_start),
            view,
            scale,
        }
    }

    /// Date at x=0.
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// X offset of the start of `date` (px). Negative before the origin.
    pub fn offset_px(&self, date: NaiveDate) -> f64 {
        let slot = self.scale.slot_width(self.view);
        match self.view {
            ViewMode::Day | ViewMode::Week => {
                let per_day = slot / f64::from(self.view.nominal_days());
                (date - self.origin).num_days() as f64 * per_day
            }
            ViewMode::Month => {
                let months = month_index(date) - month_index(self.origin);
                let fraction = f64::from(date.day0()) / days_in_month(date) as f64;
                (months as f64 + fraction) * slot
            }
        }
    }

    /// Day under a horizontal offset. `None` if outside the calendar.
    pub fn date_at(&self, x_px: f64) -> Option<NaiveDate> {
        if !x_px.is_finite() {
            return None;
        }
        let slot = self.scale.slot_width(self.view);
        match self.view {
            ViewMode::Day | ViewMode::Week => {
                let per_day = slot / f64::from(self.view.nominal_days());
                let days = (x_px / per_day).floor();
                if days.abs() > 1e7 {
                    return None;
                }
                self.origin.checked_add_signed(Duration::days(days as i64))
            }
            ViewMode::Month => {
                let position = x_px / slot;
                let months = position.floor();
                if months.abs() > 1e5 {
                    return None;
                }
                let month_start = if months >= 0.0 {
                    self.origin.checked_add_months(Months::new(months as u32))?
                } else {
                    self.origin.checked_sub_months(Months::new((-months) as u32))?
                };
                let day0 = ((position - months) * days_in_month(month_start) as f64).floor();
                month_start.checked_add_signed(Duration::days(day0 as i64))
            }
        }
    }

    /// Geometry of a schedule bar in its lane.
    pub fn bar(&self, schedule: &BaySchedule, layout: &LaneLayout) -> BarGeometry {
        let range = schedule.range();
        let left_px = self.offset_px(range.start);
        let right_px = range
            .end
            .succ_opt()
            .map_or_else(|| left_px, |after| self.offset_px(after));
        BarGeometry {
            left_px,
            width_px: (right_px - left_px).max(0.0),
            top_px: layout.row_top_px(schedule.row),
            height_px: layout.row_height_px,
        }
    }

    /// Total width needed to show through the end of `window_end`'s slot.
    pub fn width_through(&self, window_end: NaiveDate) -> f64 {
        self.view
            .slot_range(self.view.anchor_for(window_end))
            .end
            .succ_opt()
            .map_or(0.0, |after| self.offset_px(after).max(0.0))
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn days_in_month(date: NaiveDate) -> i64 {
    ViewMode::Month.slot_range(ViewMode::Month.anchor_for(date)).days()
}
