//! Schedule placement.
//!
//! Orchestrates create and move operations: validates the drop target,
//! derives missing dates, gates the write on the conflict detector,
//! persists through the store and applies the best-effort
//! project-status promotion.
//!
//! # Usage
//!
//! ```
//! use bay_schedule::models::{parse_date, Bay, Project};
//! use bay_schedule::placement::PlacementEngine;
//! use bay_schedule::rows::DropEvent;
//! use bay_schedule::store::{InMemoryProjectDirectory, InMemoryScheduleStore};
//!
//! let store = InMemoryScheduleStore::new().with_bay(Bay::new(4, 1));
//! let projects = InMemoryProjectDirectory::new().with_project(Project::new(1, "804512"));
//! let mut engine = PlacementEngine::new(store, projects)
//!     .with_today(parse_date("2025-01-01").unwrap());
//!
//! // Pointer 130px down a lane area starting at 10px, 60px lanes: row 2.
//! let outcome = engine
//!     .drop_on_slot(1, "slot-4-2025-06-02", DropEvent::at_pointer(130.0, 10.0))
//!     .unwrap();
//! assert_eq!(outcome.schedule.row, 2);
//! ```

mod engine;
mod request;

pub use engine::PlacementEngine;
pub use request::{PlacementOutcome, PlacementTarget, RowHint};
