//! Bay scheduling for manufacturing operations.
//!
//! Places projects into manufacturing bays over calendar time, detects
//! scheduling conflicts, resolves which lane of a bay a dropped project
//! lands in, and builds the day/week/month slot grid the board renders.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Bay`, `Project`, `BaySchedule`,
//!   `DateRange`, and the single date parsing contract
//! - **`conflict`**: Overlap detection within a bay (or a bay lane)
//! - **`slots`**: Slot grid generation and drop-target ids
//! - **`rows`**: Lane resolution from drop position, drag sessions
//! - **`placement`**: Create/move/unassign orchestration
//! - **`store`**: Persistence and project collaborator traits
//! - **`timeline`**: Bar geometry and pixel ↔ date conversion
//! - **`kpi`**: Bay utilization
//! - **`validation`**: Input and snapshot integrity checks
//!
//! # Architecture
//!
//! Everything except [`placement::PlacementEngine`] is a pure function of
//! its inputs. The engine reads a fresh snapshot from its
//! [`store::ScheduleStore`] on every call and holds no drag or grid state.
//!
//! # Time Model
//!
//! All dates are calendar days (`chrono::NaiveDate`) with no time of day
//! and no timezone. Ranges are inclusive on both ends.

pub mod config;
pub mod conflict;
pub mod error;
pub mod kpi;
pub mod models;
pub mod placement;
pub mod rows;
pub mod slots;
pub mod store;
pub mod timeline;
pub mod validation;

pub use config::PlacementConfig;
pub use error::{ErrorKind, PlacementError};
pub use placement::{PlacementEngine, PlacementTarget};
