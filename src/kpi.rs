//! Bay utilization metrics.
//!
//! Measures how busy each bay is over a window of days.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Occupied days | Days in the window covered by at least one schedule |
//! | Booked lane-days | Sum over schedules of days inside the window |
//! | Utilization | occupied days / window days |
//!
//! Occupied days count each calendar day once regardless of how many
//! lanes are in use; booked lane-days count every lane.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Bay, BayId, BaySchedule, DateRange};

/// Utilization of one bay.
#[derive(Debug, Clone, PartialEq)]
pub struct BayLoad {
    /// Days with at least one schedule.
    pub occupied_days: i64,
    /// Schedule-days inside the window, summed over lanes.
    pub booked_lane_days: i64,
    /// occupied_days / window days (0.0..1.0).
    pub utilization: f64,
}

/// Utilization of all active bays over a window.
#[derive(Debug, Clone)]
pub struct BayUtilization {
    /// Window measured.
    pub window: DateRange,
    /// Per-bay load (active bays only).
    pub by_bay: BTreeMap<BayId, BayLoad>,
    /// Mean utilization across active bays.
    pub avg_utilization: f64,
}

impl BayUtilization {
    /// Computes utilization for every active bay.
    ///
    /// # Arguments
    /// * `bays` - Bays to measure; inactive ones are skipped.
    /// * `schedules` - Current schedules.
    /// * `window` - Days to measure.
    pub fn calculate(bays: &[Bay], schedules: &[BaySchedule], window: DateRange) -> Self {
        // A hand-built window may be inverted; it then covers no day.
        let window_days = window.days().max(1);
        let mut by_bay = BTreeMap::new();

        for bay in bays.iter().filter(|b| b.is_active) {
            let mut days = BTreeSet::new();
            let mut booked: i64 = 0;

            for s in schedules.iter().filter(|s| s.bay_id == bay.id) {
                if let Some(overlap) = s.range().intersection(&window) {
                    booked += overlap.days();
                    days.extend(overlap.start.iter_days().take(overlap.days() as usize));
                }
            }

            let occupied = days.len() as i64;
            by_bay.insert(
                bay.id,
                BayLoad {
                    occupied_days: occupied,
                    booked_lane_days: booked,
                    utilization: occupied as f64 / window_days as f64,
                },
            );
        }

        let avg_utilization = if by_bay.is_empty() {
            0.0
        } else {
            by_bay.values().map(|l| l.utilization).sum::<f64>() / by_bay.len() as f64
        };

        Self {
            window,
            by_bay,
            avg_utilization,
        }
    }

    /// Bays with no schedule in the window.
    pub fn idle_bays(&self) -> Vec<BayId> {
        self.by_bay
            .iter()
            .filter(|(_, load)| load.occupied_days == 0)
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn range(s: &str, e: &str) -> DateRange {
        DateRange::new(parse_date(s).unwrap(), parse_date(e).unwrap()).unwrap()
    }

    #[test]
    fn test_utilization() {
        let bays = vec![Bay::new(1, 1), Bay::new(2, 2), Bay::new(3, 3).inactive()];
        let schedules = vec![
            BaySchedule::new(1, 1, 1, range("2025-05-28", "2025-06-05")),
            BaySchedule::new(2, 2, 1, range("2025-06-04", "2025-06-06")).with_row(1),
            BaySchedule::new(3, 3, 3, range("2025-06-01", "2025-06-10")),
        ];
        let util = BayUtilization::calculate(&bays, &schedules, range("2025-06-01", "2025-06-10"));

        let bay1 = &util.by_bay[&1];
        assert_eq!(bay1.occupied_days, 6); // 06-01..06-06
        assert_eq!(bay1.booked_lane_days, 8); // 5 + 3
        assert!((bay1.utilization - 0.6).abs() < 1e-10);

        assert_eq!(util.by_bay[&2].occupied_days, 0);
        assert!(!util.by_bay.contains_key(&3));
        assert!((util.avg_utilization - 0.3).abs() < 1e-10);
        assert_eq!(util.idle_bays(), vec![2]);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let bays = vec![Bay::new(1, 1)];
        let schedules = vec![BaySchedule::new(1, 1, 1, range("2025-06-01", "2025-06-10"))];
        let window = DateRange {
            start: parse_date("2025-06-10").unwrap(),
            end: parse_date("2025-06-01").unwrap(),
        };
        let util = BayUtilization::calculate(&bays, &schedules, window);

        let load = &util.by_bay[&1];
        assert_eq!(load.occupied_days, 0);
        assert_eq!(load.utilization, 0.0);
        assert!(util.avg_utilization.is_finite());
    }

    #[test]
    fn test_no_bays() {
        let util = BayUtilization::calculate(&[], &[], range("2025-06-01", "2025-06-10"));
        assert_eq!(util.avg_utilization, 0.0);
        assert!(util.idle_bays().is_empty());
    }
}
