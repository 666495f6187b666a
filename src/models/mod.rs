//! Bay scheduling domain models.
//!
//! Provides the data types shared by conflict detection, slot
//! generation and placement. Schedules refer to bays and projects by
//! id only, so there is no ownership cycle between them.
//!
//! # Domain Mappings
//!
//! | bay-schedule | Shop floor | Generic scheduling |
//! |--------------|------------|--------------------|
//! | Bay | Assembly bay | Resource |
//! | Project | Customer order | Task |
//! | BaySchedule | Bay booking | Assignment |
//! | Row | Lane inside a bay | Resource unit |

mod bay;
mod date_range;
mod project;
mod schedule;

pub use bay::{group_bays_by_team, Bay, BayId, TeamGroup};
pub use date_range::{format_date, parse_date, DateRange, DATE_FORMAT};
pub use project::{unassigned_projects, Project, ProjectId, ProjectStatus};
pub use schedule::{BaySchedule, ScheduleId, ScheduleStatus};
