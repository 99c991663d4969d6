//! Schedule entity module
//!
//! Interval and Schedule types. Intervals are half-open: a submission
//! occupies the days `[start_date, end_date)`, so `end_date` itself is the
//! first free day. All capacity accounting in the engine uses this rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

/// A half-open time interval `[start_date, end_date)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Interval {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Builds an interval from a start date and a duration in days.
    pub fn with_duration(start_date: NaiveDate, duration_days: i64) -> Self {
        Self {
            start_date,
            end_date: start_date + Duration::days(duration_days),
        }
    }

    /// Duration in days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Checks whether a day falls inside the half-open interval.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day < self.end_date
    }

    /// Iterates every occupied day.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_date;
        (0..self.duration_days()).map(move |offset| start + Duration::days(offset))
    }
}

/// A schedule mapping submission IDs to their intervals
///
/// Backed by an ordered map so that iteration, serialization, and equality
/// are deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    pub intervals: BTreeMap<String, Interval>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the interval for a submission.
    pub fn add_interval(&mut self, submission_id: impl Into<String>, interval: Interval) {
        self.intervals.insert(submission_id.into(), interval);
    }

    /// Removes a submission's interval (used when backtracking).
    pub fn remove(&mut self, submission_id: &str) -> Option<Interval> {
        self.intervals.remove(submission_id)
    }

    pub fn get(&self, submission_id: &str) -> Option<&Interval> {
        self.intervals.get(submission_id)
    }

    pub fn contains(&self, submission_id: &str) -> bool {
        self.intervals.contains_key(submission_id)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Interval)> {
        self.intervals.iter()
    }

    /// Earliest start across all scheduled submissions.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.intervals.values().map(|i| i.start_date).min()
    }

    /// Latest end across all scheduled submissions.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.intervals.values().map(|i| i.end_date).max()
    }

    /// Days between the earliest start and the latest end; 0 when empty.
    pub fn makespan_days(&self) -> i64 {
        match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_interval_is_half_open() {
        let interval = Interval::with_duration(d(2026, 4, 1), 14);
        assert_eq!(interval.end_date, d(2026, 4, 15));
        assert!(interval.contains_day(d(2026, 4, 1)));
        assert!(interval.contains_day(d(2026, 4, 14)));
        assert!(!interval.contains_day(d(2026, 4, 15)));
        assert_eq!(interval.days().count(), 14);
    }

    #[test]
    fn test_schedule_bounds_and_makespan() {
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 4, 1), 30));
        schedule.add_interval("b", Interval::with_duration(d(2026, 5, 1), 30));

        assert_eq!(schedule.start_date(), Some(d(2026, 4, 1)));
        assert_eq!(schedule.end_date(), Some(d(2026, 5, 31)));
        assert_eq!(schedule.makespan_days(), 60);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::new();
        assert!(schedule.is_empty());
        assert_eq!(schedule.makespan_days(), 0);
        assert_eq!(schedule.start_date(), None);
    }

    #[test]
    fn test_deterministic_iteration_order() {
        let mut schedule = Schedule::new();
        schedule.add_interval("z", Interval::with_duration(d(2026, 4, 1), 1));
        schedule.add_interval("a", Interval::with_duration(d(2026, 4, 2), 1));
        let ids: Vec<&String> = schedule.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_json_round_trip(
                entries in proptest::collection::btree_map(
                    "[a-z]{1,8}",
                    (0i64..2000, 1i64..200),
                    0..12,
                )
            ) {
                let base = d(2026, 1, 1);
                let mut schedule = Schedule::new();
                for (id, (offset, duration)) in entries {
                    schedule.add_interval(
                        id,
                        Interval::with_duration(base + Duration::days(offset), duration),
                    );
                }

                let json = serde_json::to_string(&schedule).unwrap();
                let restored: Schedule = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(schedule, restored);
            }
        }
    }
}
