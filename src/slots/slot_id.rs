//! Drop-target identifiers.
//!
//! A slot id embeds everything needed to place a project without a
//! lookup table:
//!
//! | View | Format |
//! |------|--------|
//! | Day | `slot-<bayId>-<yyyy-MM-dd>` |
//! | Week | `slot-<bayId>-<yyyy-MM-dd>-week` |
//! | Month | `slot-<bayId>-<yyyy-MM-dd>-month` |

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::ViewMode;
use crate::models::{format_date, parse_date, BayId};
use crate::validation::{ValidationError, ValidationErrorKind};

const PREFIX: &str = "slot-";
const DATE_LEN: usize = 10;

/// Identity of one slot: bay, anchor date and granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    /// Bay the slot belongs to.
    pub bay_id: BayId,
    /// First day of the slot.
    pub anchor: NaiveDate,
    /// Granularity.
    pub view_mode: ViewMode,
}

impl SlotId {
    /// Creates a slot id, snapping `date` to the anchor of its slot.
    pub fn new(bay_id: BayId, date: NaiveDate, view_mode: ViewMode) -> Self {
        Self {
            bay_id,
            anchor: view_mode.anchor_for(date),
            view_mode,
        }
    }

    /// Decodes a slot id string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let malformed = |why: &str| {
            ValidationError::new(
                ValidationErrorKind::MalformedSlotId,
                format!("Malformed slot id '{input}': {why}"),
            )
        };

        let body = input
            .strip_prefix(PREFIX)
            .ok_or_else(|| malformed("missing 'slot-' prefix"))?;

        let (body, view_mode) = if let Some(rest) = body.strip_suffix(ViewMode::Week.id_suffix()) {
            (rest, ViewMode::Week)
        } else if let Some(rest) = body.strip_suffix(ViewMode::Month.id_suffix()) {
            (rest, ViewMode::Month)
        } else {
            (body, ViewMode::Day)
        };

        // The date has a fixed width, so split from the right.
        if body.len() < DATE_LEN + 2 || !body.is_char_boundary(body.len() - DATE_LEN) {
            return Err(malformed("too short"));
        }
        let (bay_part, date_part) = body.split_at(body.len() - DATE_LEN);
        let bay_part = bay_part
            .strip_suffix('-')
            .ok_or_else(|| malformed("expected '-' before date"))?;

        let bay_id: BayId = bay_part
            .parse()
            .map_err(|_| malformed("bay id is not a number"))?;
        let anchor = parse_date(date_part).map_err(|_| malformed("invalid date"))?;
        if format_date(anchor) != date_part {
            return Err(malformed("date is not yyyy-MM-dd"));
        }

        if !view_mode.is_anchor(anchor) {
            return Err(malformed("date is not the first day of its slot"));
        }

        Ok(Self {
            bay_id,
            anchor,
            view_mode,
        })
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}{}-{}{}",
            self.bay_id,
            format_date(self.anchor),
            self.view_mode.id_suffix()
        )
    }
}

impl FromStr for SlotId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
