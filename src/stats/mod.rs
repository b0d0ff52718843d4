//! Summary counts over the current record set.
//!
//! The store delivers full snapshots, not deltas, so the stats are a pure
//! function recomputed from scratch every time. No incremental state is
//! carried between snapshots.

use serde::Serialize;

use crate::models::{AttendanceRecord, Category};

/// Aggregate attendance counts for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total: usize,
    pub members: usize,
    pub first_timers: usize,
    pub returning: usize,
    /// Share of first-time guests in the total, 0 for an empty set.
    pub first_timer_ratio: f64,
}

impl AttendanceStats {
    /// Compute counts from a snapshot.
    pub fn compute(records: &[AttendanceRecord]) -> Self {
        let total = records.len();
        let count =
            |category: Category| records.iter().filter(|r| r.category == category).count();

        let first_timers = count(Category::FirstTimerGuest);
        Self {
            total,
            members: count(Category::Member),
            first_timers,
            returning: count(Category::ReturningMember),
            first_timer_ratio: if total == 0 {
                0.0
            } else {
                first_timers as f64 / total as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, Sex};

    fn record(category: Category) -> AttendanceRecord {
        AttendanceRecord {
            id: "x".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            phone: "1".into(),
            sex: Sex::Male,
            age_range: AgeRange::Under19,
            category,
            location: "Igando".into(),
            event_id: "e".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_counts_per_category() {
        let records = vec![
            record(Category::Member),
            record(Category::Member),
            record(Category::FirstTimerGuest),
        ];
        let stats = AttendanceStats::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.members, 2);
        assert_eq!(stats.first_timers, 1);
        assert_eq!(stats.returning, 0);
    }

    #[test]
    fn test_empty_set_has_zero_ratio() {
        let stats = AttendanceStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.first_timer_ratio, 0.0);
    }

    #[test]
    fn test_ratio() {
        let records = vec![
            record(Category::FirstTimerGuest),
            record(Category::Member),
            record(Category::Member),
            record(Category::Member),
        ];
        let stats = AttendanceStats::compute(&records);
        assert!((stats.first_timer_ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let records = vec![record(Category::Member), record(Category::ReturningMember)];
        assert_eq!(
            AttendanceStats::compute(&records),
            AttendanceStats::compute(&records)
        );
    }
}
