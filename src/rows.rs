//! Lane (row) resolution inside a bay.
//!
//! A bay is drawn as `max_rows` stacked lanes. When a project is dropped
//! with a pointer, its lane comes from the vertical drop position
//! relative to the top of the bay's lane area:
//!
//! ```text
//! row = clamp(floor((pointer_y - container_top) / row_height), 0, max_rows - 1)
//! ```
//!
//! Drops without a pointer (dialogs, programmatic placement) use the
//! explicit row they carry, or lane 0.
//!
//! The hovered row travels from pointer-move to drop inside a
//! [`DragSession`] owned by the caller; there is no global drag state.

use serde::{Deserialize, Serialize};

use crate::models::{ProjectId, ScheduleId};

/// Vertical geometry of a bay's lanes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneLayout {
    /// Height of one lane (px).
    pub row_height_px: f64,
    /// Number of lanes.
    pub max_rows: u32,
}

/// Pointer position at drop time, in the same coordinate space as the
/// lane container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerPosition {
    /// Pointer y (px).
    pub y: f64,
    /// Top edge of the bay's lane area (px).
    pub container_top: f64,
}

/// What the user let go of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEvent {
    /// Pointer position, when the drop came from a pointer.
    #[serde(default)]
    pub pointer: Option<PointerPosition>,
    /// Row chosen without a pointer.
    #[serde(default)]
    pub explicit_row: Option<u32>,
}

/// The thing being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSubject {
    /// An unassigned project from the sidebar.
    Project(ProjectId),
    /// An existing schedule bar.
    Schedule(ScheduleId),
}

/// State carried from drag start to drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    subject: DragSubject,
    layout: LaneLayout,
    pointer: Option<PointerPosition>,
    hovered_row: Option<u32>,
}

impl LaneLayout {
    /// Creates a layout; `max_rows` is raised to at least 1.
    pub fn new(row_height_px: f64, max_rows: u32) -> Self {
        Self {
            row_height_px,
            max_rows: max_rows.max(1),
        }
    }

    /// Highest valid row index.
    #[inline]
    pub fn last_row(&self) -> u32 {
        self.max_rows.saturating_sub(1)
    }

    /// Clamps a row into `[0, max_rows - 1]`.
    #[inline]
    pub fn clamp_row(&self, row: u32) -> u32 {
        row.min(self.last_row())
    }

    /// Lane under a pointer. Non-finite input or a degenerate row height
    /// resolves to lane 0.
    pub fn row_at(&self, pointer: PointerPosition) -> u32 {
        let relative_y = pointer.y - pointer.container_top;
        if !relative_y.is_finite() || !(self.row_height_px > 0.0) || relative_y <= 0.0 {
            return 0;
        }
        let row = (relative_y / self.row_height_px).floor();
        if row >= f64::from(self.last_row()) {
            self.last_row()
        } else {
            row as u32
        }
    }

    /// Top edge of a lane relative to the container (px).
    pub fn row_top_px(&self, row: u32) -> f64 {
        f64::from(self.clamp_row(row)) * self.row_height_px
    }
}

impl DropEvent {
    /// A pointer drop.
    pub fn at_pointer(y: f64, container_top: f64) -> Self {
        Self {
            pointer: Some(PointerPosition { y, container_top }),
            explicit_row: None,
        }
    }

    /// A drop with an explicit row and no pointer.
    pub fn in_row(row: u32) -> Self {
        Self {
            pointer: None,
            explicit_row: Some(row),
        }
    }
}

/// Resolves the lane for a drop.
///
/// Pointer position wins; otherwise the explicit row; otherwise lane 0.
/// The result is always within `[0, max_rows - 1]`.
pub fn resolve_row(event: &DropEvent, layout: &LaneLayout) -> u32 {
    match (event.pointer, event.explicit_row) {
        (Some(pointer), _) => layout.row_at(pointer),
        (None, Some(row)) => layout.clamp_row(row),
        (None, None) => 0,
    }
}

impl DragSession {
    /// Starts dragging `subject`.
    pub fn begin(subject: DragSubject, layout: LaneLayout) -> Self {
        Self {
            subject,
            layout,
            pointer: None,
            hovered_row: None,
        }
    }

    /// What is being dragged.
    pub fn subject(&self) -> DragSubject {
        self.subject
    }

    /// Records a pointer move over a bay and returns the hovered lane.
    pub fn pointer_moved(&mut self, y: f64, container_top: f64) -> u32 {
        let pointer = PointerPosition { y, container_top };
        let row = self.layout.row_at(pointer);
        self.pointer = Some(pointer);
        self.hovered_row = Some(row);
        row
    }

    /// Lane under the pointer at the last move, for drop previews.
    pub fn hovered_row(&self) -> Option<u32> {
        self.hovered_row
    }

    /// Ends the drag on a valid target.
    pub fn finish(self) -> (DragSubject, DropEvent) {
        let event = DropEvent {
            pointer: self.pointer,
            explicit_row: self.hovered_row,
        };
        (self.subject, event)
    }

    /// Ends the drag outside any target. Nothing is produced, so no
    /// placement can follow.
    pub fn cancel(self) -> DragSubject {
        self.subject
    }
}
