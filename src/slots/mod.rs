//! Slot grid generation.
//!
//! Builds the time axis of the board: for each active bay, one slot per
//! day, week or month across the visible window, each flagged occupied
//! or free by overlap with that bay's schedules.
//!
//! The grid is recomputed from scratch on every call. Windows are a few
//! weeks to a few months wide, so there is nothing to cache.
//!
//! # Usage
//!
//! ```
//! use bay_schedule::models::{parse_date, Bay, BaySchedule, DateRange};
//! use bay_schedule::slots::{build_slots, ViewMode};
//!
//! let bays = vec![Bay::new(1, 1)];
//! let range = DateRange::new(
//!     parse_date("2025-06-02").unwrap(),
//!     parse_date("2025-06-04").unwrap(),
//! ).unwrap();
//! let schedules = vec![BaySchedule::new(10, 100, 1, range)];
//!
//! let grid = build_slots(
//!     &bays,
//!     &schedules,
//!     parse_date("2025-06-01").unwrap(),
//!     parse_date("2025-06-07").unwrap(),
//!     ViewMode::Day,
//! );
//! let occupied: Vec<bool> = grid[&1].iter().map(|s| s.occupied).collect();
//! assert_eq!(occupied, vec![false, true, true, true, false, false, false]);
//! ```

mod slot_id;
mod view_mode;

pub use slot_id::SlotId;
pub use view_mode::ViewMode;

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::{Bay, BayId, BaySchedule, DateRange, ScheduleId};

/// One computed cell of the board. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Stable id, also used as the drop-target id.
    pub id: SlotId,
    /// Days covered by the slot.
    pub range: DateRange,
    /// Whether any schedule in the bay overlaps the slot.
    pub occupied: bool,
    /// Earliest overlapping schedule (by start date, then id).
    pub schedule_id: Option<ScheduleId>,
    /// Number of overlapping schedules (lanes in use).
    pub occupancy: usize,
}

impl Slot {
    /// Bay the slot belongs to.
    #[inline]
    pub fn bay_id(&self) -> BayId {
        self.id.bay_id
    }

    /// First day of the slot.
    #[inline]
    pub fn anchor(&self) -> NaiveDate {
        self.id.anchor
    }

    /// Slot length in days.
    #[inline]
    pub fn interval_days(&self) -> i64 {
        self.range.days()
    }
}

/// Builds the slot grid for every active bay.
///
/// # Algorithm
/// 1. Compute the slot ranges covering `[window_start, window_end]`,
///    widened outward to whole slots for `view_mode`.
/// 2. Bucket schedules by bay.
/// 3. For each active bay and each slot, collect the bay's schedules
///    overlapping the slot (inclusive overlap, all rows).
///
/// Inactive bays are omitted. An inverted window yields an empty
/// sequence for each active bay.
///
/// # Complexity
/// O(b * s * k) where b=active bays, s=slots, k=schedules per bay.
pub fn build_slots(
    bays: &[Bay],
    schedules: &[BaySchedule],
    window_start: NaiveDate,
    window_end: NaiveDate,
    view_mode: ViewMode,
) -> BTreeMap<BayId, Vec<Slot>> {
    let ranges = view_mode.slot_ranges(window_start, window_end);

    let mut by_bay: HashMap<BayId, Vec<&BaySchedule>> = HashMap::new();
    for s in schedules {
        by_bay.entry(s.bay_id).or_default().push(s);
    }
    for bucket in by_bay.values_mut() {
        bucket.sort_by_key(|s| (s.range().start, s.id));
    }

    let mut grid = BTreeMap::new();
    for bay in bays.iter().filter(|b| b.is_active) {
        let bay_schedules = by_bay.get(&bay.id).map(Vec::as_slice).unwrap_or(&[]);
        let slots = ranges
            .iter()
            .map(|range| {
                let mut hits = bay_schedules.iter().filter(|s| s.range().overlaps(range));
                let first = hits.next().map(|s| s.id);
                let occupancy = first.map_or(0, |_| 1 + hits.count());
                Slot {
                    id: SlotId {
                        bay_id: bay.id,
                        anchor: range.start,
                        view_mode,
                    },
                    range: *range,
                    occupied: first.is_some(),
                    schedule_id: first,
                    occupancy,
                }
            })
            .collect();
        grid.insert(bay.id, slots);
    }

    debug!(
        bays = grid.len(),
        slots_per_bay = ranges.len(),
        view = ?view_mode,
        "built slot grid"
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn range(s: &str, e: &str) -> DateRange {
        DateRange::new(d(s), d(e)).unwrap()
    }

    fn sample_bays() -> Vec<Bay> {
        vec![Bay::new(1, 1), Bay::new(2, 2), Bay::new(3, 3).inactive()]
    }

    fn sample_schedules() -> Vec<BaySchedule> {
        vec![
            BaySchedule::new(10, 100, 1, range("2025-06-03", "2025-06-10")),
            BaySchedule::new(11, 101, 1, range("2025-06-09", "2025-06-12")).with_row(1),
            BaySchedule::new(12, 102, 3, range("2025-06-01", "2025-06-30")),
        ]
    }

    #[test]
    fn test_inactive_bays_skipped() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-06-01"),
            d("2025-06-14"),
            ViewMode::Day,
        );
        assert_eq!(grid.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(grid[&1].len(), 14);
        assert!(grid[&2].iter().all(|s| !s.occupied));
    }

    #[test]
    fn test_day_occupancy() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-06-01"),
            d("2025-06-14"),
            ViewMode::Day,
        );
        let bay1 = &grid[&1];
        assert!(!bay1[1].occupied); // 06-02
        assert!(bay1[2].occupied); // 06-03
        assert_eq!(bay1[2].schedule_id, Some(10));
        assert_eq!(bay1[8].occupancy, 2); // 06-09, both lanes
        assert_eq!(bay1[11].schedule_id, Some(11)); // 06-12
        assert!(!bay1[12].occupied); // 06-13
    }

    #[test]
    fn test_week_slots() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-06-04"),
            d("2025-06-20"),
            ViewMode::Week,
        );
        let bay1 = &grid[&1];
        assert_eq!(bay1.len(), 3);
        assert_eq!(bay1[0].anchor(), d("2025-06-02"));
        assert_eq!(bay1[0].interval_days(), 7);
        assert!(bay1[0].occupied);
        assert_eq!(bay1[1].occupancy, 2);
        assert!(!bay1[2].occupied);
        assert_eq!(bay1[1].id.to_string(), "slot-1-2025-06-09-week");
    }

    #[test]
    fn test_month_slots() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-05-20"),
            d("2025-07-10"),
            ViewMode::Month,
        );
        let bay1 = &grid[&1];
        assert_eq!(bay1.len(), 3);
        assert!(!bay1[0].occupied);
        assert!(bay1[1].occupied);
        assert_eq!(bay1[1].interval_days(), 30);
        assert!(!bay1[2].occupied);
    }

    #[test]
    fn test_inverted_window() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-06-10"),
            d("2025-06-01"),
            ViewMode::Day,
        );
        assert_eq!(grid.len(), 2);
        assert!(grid.values().all(Vec::is_empty));
    }

    #[test]
    fn test_slot_ids_parse_back() {
        let grid = build_slots(
            &sample_bays(),
            &sample_schedules(),
            d("2025-06-01"),
            d("2025-08-31"),
            ViewMode::Month,
        );
        for slot in grid.values().flatten() {
            let parsed = SlotId::parse(&slot.id.to_string()).unwrap();
            assert_eq!(parsed, slot.id);
            assert_eq!(parsed.bay_id, slot.bay_id());
        }
    }

    #[test]
    fn test_idempotent_randomized() {
        let mut rng = StdRng::seed_from_u64(11);
        let bays: Vec<Bay> = (1..=4).map(|i| Bay::new(i, i as i32)).collect();
        let base = d("2025-01-01");

        for round in 0..20 {
            let schedules: Vec<BaySchedule> = (0..30)
                .map(|i| {
                    let start = base + chrono::Duration::days(rng.random_range(0..90));
                    let len = rng.random_range(1..20u32);
                    BaySchedule::new(i, i, rng.random_range(1..=4), DateRange::with_length(start, len).unwrap())
                })
                .collect();
            let mode = ViewMode::ALL[round % 3];
            let a = build_slots(&bays, &schedules, base, d("2025-03-31"), mode);
            let b = build_slots(&bays, &schedules, base, d("2025-03-31"), mode);
            assert_eq!(a, b);
        }
    }
}
