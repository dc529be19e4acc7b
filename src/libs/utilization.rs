//! Shift utilization for one process.
//!
//! ## Formula
//!
//! ```text
//! maintenance = sum of maintenance group totals over all blocks
//! downtime    = sum of downtime durations
//! operating   = 0 (reserved for direct operating-time entry)
//! remaining   = max(0, 480 - maintenance - operating - downtime)
//! ```
//!
//! Segment percentages are `minutes / 480 * 100` and are not clamped, so a
//! process with more than a shift's worth of maintenance shows over 100% on
//! that segment while `remaining` stays at zero.

use crate::libs::grouping::Grouping;
use crate::libs::record::{DowntimeRecord, MaintenanceRecord, ShiftRecord};
use crate::libs::shift::SHIFT_MINUTES;
use serde::Serialize;

/// Minute breakdown of one process's shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTimeSummary {
    pub maintenance_minutes: u32,
    pub operating_minutes: u32,
    pub downtime_minutes: u32,
    pub remaining_minutes: u32,
}

impl ProcessTimeSummary {
    pub fn from_minutes(maintenance_minutes: u32, operating_minutes: u32, downtime_minutes: u32) -> Self {
        let used = maintenance_minutes.saturating_add(operating_minutes).saturating_add(downtime_minutes);
        Self {
            maintenance_minutes,
            operating_minutes,
            downtime_minutes,
            remaining_minutes: SHIFT_MINUTES.saturating_sub(used),
        }
    }

    /// Rolls a process's record lists for one shift into a summary.
    ///
    /// Only group totals are counted for maintenance, so an addendum is
    /// counted once through its primary and orphans not at all.
    pub fn calculate(maintenance: &[MaintenanceRecord], downtime: &[DowntimeRecord]) -> Self {
        let maintenance_minutes = maintenance.groups().iter().fold(0u32, |total, g| total.saturating_add(g.minutes));
        let downtime_minutes = downtime.iter().fold(0u32, |total, d| total.saturating_add(d.minutes()));
        Self::from_minutes(maintenance_minutes, 0, downtime_minutes)
    }

    pub fn maintenance_percent(&self) -> f64 {
        percent_of_shift(self.maintenance_minutes)
    }

    pub fn operating_percent(&self) -> f64 {
        percent_of_shift(self.operating_minutes)
    }

    pub fn downtime_percent(&self) -> f64 {
        percent_of_shift(self.downtime_minutes)
    }

    pub fn remaining_percent(&self) -> f64 {
        percent_of_shift(self.remaining_minutes)
    }
}

/// Share of the 480-minute shift, in percent.
pub fn percent_of_shift(minutes: u32) -> f64 {
    minutes as f64 / SHIFT_MINUTES as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_clamped_at_zero() {
        let summary = ProcessTimeSummary::from_minutes(500, 0, 50);
        assert_eq!(summary.remaining_minutes, 0);
        assert!(summary.maintenance_percent() > 100.0);
    }

    #[test]
    fn groups_and_downtime_are_summed() {
        let first = MaintenanceRecord::from_minutes(30, "clean", None, 0);
        let extra = MaintenanceRecord::from_minutes(15, "recheck", None, 0).attach_to(first.id);
        let other = MaintenanceRecord::from_minutes(20, "lube", None, 1);
        let orphan = MaintenanceRecord::from_minutes(99, "lost", None, 0).attach_to(other.id);
        let downtime = vec![
            DowntimeRecord::from_minutes(10, "", "power", 0),
            DowntimeRecord::from_minutes(5, "", "material", 1),
        ];

        let summary = ProcessTimeSummary::calculate(&[first, extra, other, orphan], &downtime);
        assert_eq!(summary.maintenance_minutes, 65);
        assert_eq!(summary.downtime_minutes, 15);
        assert_eq!(summary.operating_minutes, 0);
        assert_eq!(summary.remaining_minutes, 400);
    }

    #[test]
    fn huge_durations_saturate() {
        let primary = MaintenanceRecord::from_minutes(u32::MAX, "overhaul", None, 0);
        let extra = MaintenanceRecord::from_minutes(1, "recheck", None, 0).attach_to(primary.id);
        let downtime = vec![
            DowntimeRecord::from_minutes(u32::MAX, "", "power", 0),
            DowntimeRecord::from_minutes(7, "", "jam", 0),
        ];

        let summary = ProcessTimeSummary::calculate(&[primary, extra], &downtime);
        assert_eq!(summary.maintenance_minutes, u32::MAX);
        assert_eq!(summary.downtime_minutes, u32::MAX);
        assert_eq!(summary.remaining_minutes, 0);
    }

    #[test]
    fn empty_shift_is_all_remaining() {
        let summary = ProcessTimeSummary::calculate(&[], &[]);
        assert_eq!(summary.remaining_minutes, SHIFT_MINUTES);
        assert!((summary.remaining_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_uses_full_shift() {
        assert!((percent_of_shift(120) - 25.0).abs() < 1e-9);
        assert!((percent_of_shift(720) - 150.0).abs() < 1e-9);
    }
}
