//! Backtracking scheduler module
//!
//! Depth-first search over the topological order: each submission is placed
//! at its earliest feasible date; when a later submission cannot be placed
//! within `max_backtrack_days` of its first feasible date, the most recent
//! commitment is unwound and retried later. A per-run iteration ceiling
//! bounds the search.

use chrono::{Duration, NaiveDate};

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::feasibility::{
    earliest_candidate, is_feasible_start, DeadlineMode, LoadLedger,
};
use crate::application::schedulers::greedy::{build_schedule, unplaced_ids};
use crate::application::schedulers::Scheduler;
use crate::domain::entities::{Config, Interval, Schedule};
use crate::domain::errors::EngineError;

/// Depth-first backtracking scheduler.
#[derive(Debug)]
pub struct BacktrackingScheduler {
    config: Config,
}

impl BacktrackingScheduler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Scheduler for BacktrackingScheduler {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        let ctx = SchedulingContext::new(&self.config)?;
        let mut search = Search {
            ctx: &ctx,
            placed: vec![None; ctx.len()],
            ledger: LoadLedger::new(
                self.config.max_concurrent_submissions,
                self.config.scheduling_options.enable_concurrency_control,
            ),
            iterations: 0,
            iteration_limit: self.config.scheduling_options.max_algorithm_iterations,
        };

        if search.place_from(0)? {
            Ok(build_schedule(&ctx, &search.placed))
        } else {
            Err(EngineError::Unschedulable(unplaced_ids(
                &ctx,
                &search.placed,
            )))
        }
    }
}

struct Search<'a, 'c> {
    ctx: &'a SchedulingContext<'c>,
    placed: Vec<Option<Interval>>,
    ledger: LoadLedger,
    iterations: u64,
    iteration_limit: u64,
}

impl Search<'_, '_> {
    /// Finds the first feasible start at or after `from`, up to the window end.
    fn first_feasible(&self, idx: usize, from: NaiveDate) -> Option<NaiveDate> {
        let mut date = from;
        while date <= self.ctx.window_end {
            if is_feasible_start(
                self.ctx,
                idx,
                date,
                &self.placed,
                &self.ledger,
                DeadlineMode::Strict,
            ) {
                return Some(date);
            }
            date += Duration::days(1);
        }
        None
    }

    /// Places submissions `position..` of the topological order, returning
    /// whether a complete placement exists from this state.
    fn place_from(&mut self, position: usize) -> Result<bool, EngineError> {
        if position == self.ctx.topo_order.len() {
            return Ok(true);
        }
        self.iterations += 1;
        if self.iterations > self.iteration_limit {
            return Err(EngineError::IterationLimit(self.iteration_limit));
        }

        let idx = self.ctx.topo_order[position];
        let lower = earliest_candidate(self.ctx, idx, &self.placed);
        let Some(first) = self.first_feasible(idx, lower) else {
            return Ok(false);
        };

        let retry_limit = first + Duration::days(self.ctx.config.max_backtrack_days);
        let mut date = first;
        while date <= retry_limit {
            if is_feasible_start(
                self.ctx,
                idx,
                date,
                &self.placed,
                &self.ledger,
                DeadlineMode::Strict,
            ) {
                let interval = Interval::with_duration(date, self.ctx.durations[idx]);
                self.ledger.occupy(&interval);
                self.placed[idx] = Some(interval);

                if self.place_from(position + 1)? {
                    return Ok(true);
                }

                self.ledger.release(&interval);
                self.placed[idx] = None;
            }
            date += Duration::days(1);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, ConferenceType, Submission, SubmissionType,
    };
    use std::collections::BTreeMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config_with_papers(count: usize, cap: u32, deadline_days: i64) -> Config {
        let mut config = Config::default_config();
        let start = d(2026, 2, 2);
        config.scheduling_start_date = Some(start);
        config.max_concurrent_submissions = cap;
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, start + Duration::days(deadline_days));
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        for n in 0..count {
            let mut sub =
                Submission::new(format!("p{n}"), format!("Paper {n}"), SubmissionType::Paper);
            sub.conference_id = Some("cts".into());
            sub.draft_window_months = 1;
            config.submissions.push(sub);
        }
        config
    }

    #[test]
    fn test_places_all_with_ample_capacity() {
        let schedule = BacktrackingScheduler::new(config_with_papers(3, 3, 365))
            .schedule()
            .unwrap();
        assert_eq!(schedule.len(), 3);
        // All feasible on day one with cap 3
        for (_, interval) in schedule.iter() {
            assert_eq!(interval.start_date, d(2026, 2, 2));
        }
    }

    #[test]
    fn test_cap_one_serializes_within_backtrack_window() {
        let mut config = config_with_papers(2, 1, 365);
        config.max_backtrack_days = 60;
        let schedule = BacktrackingScheduler::new(config).schedule().unwrap();
        let p0 = schedule.get("p0").unwrap();
        let p1 = schedule.get("p1").unwrap();
        assert!(p1.start_date >= p0.end_date || p0.start_date >= p1.end_date);
    }

    #[test]
    fn test_impossible_deadline_is_unschedulable() {
        let err = BacktrackingScheduler::new(config_with_papers(1, 1, 5))
            .schedule()
            .unwrap_err();
        assert!(matches!(err, EngineError::Unschedulable(_)));
    }

    #[test]
    fn test_iteration_ceiling_reported() {
        // Cap 1 with a deadline that admits only one of the two papers keeps
        // the search retrying until the ceiling.
        let mut config = config_with_papers(2, 1, 40);
        config.scheduling_options.max_algorithm_iterations = 3;
        config.max_backtrack_days = 400;
        let result = BacktrackingScheduler::new(config).schedule();
        assert!(matches!(
            result,
            Err(EngineError::IterationLimit(3)) | Err(EngineError::Unschedulable(_))
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut config = config_with_papers(0, 1, 365);
        let mut a = Submission::new("a", "A", SubmissionType::Paper);
        a.depends_on = vec!["b".into()];
        let mut b = Submission::new("b", "B", SubmissionType::Paper);
        b.depends_on = vec!["a".into()];
        config.submissions = vec![a, b];
        assert!(matches!(
            BacktrackingScheduler::new(config).schedule(),
            Err(EngineError::CircularDependency(_))
        ));
    }

    #[test]
    fn test_determinism() {
        let config = config_with_papers(3, 2, 365);
        let first = BacktrackingScheduler::new(config.clone()).schedule().unwrap();
        let second = BacktrackingScheduler::new(config).schedule().unwrap();
        assert_eq!(first, second);
    }
}
