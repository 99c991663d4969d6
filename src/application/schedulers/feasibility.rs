//! Feasibility placement module
//!
//! The predicate deciding whether "submission S may start on date D given the
//! partial schedule P", plus the incremental daily-load ledger every strategy
//! shares. Intervals occupy the half-open range `[start, end)`.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::application::schedulers::context::SchedulingContext;
use crate::domain::entities::Interval;

/// How a resolved conference deadline is treated by the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineMode {
    /// A placement that would finish past the deadline is infeasible.
    Strict,
    /// Late placements are allowed; the caller prices the lateness.
    Relaxed,
}

/// Incremental daily-load histogram for a partial schedule.
#[derive(Debug, Clone)]
pub struct LoadLedger {
    daily_load: BTreeMap<NaiveDate, u32>,
    cap: u32,
    enforce: bool,
}

impl LoadLedger {
    pub fn new(cap: u32, enforce: bool) -> Self {
        Self {
            daily_load: BTreeMap::new(),
            cap,
            enforce,
        }
    }

    /// Adds an interval's occupancy to the histogram.
    pub fn occupy(&mut self, interval: &Interval) {
        for day in interval.days() {
            *self.daily_load.entry(day).or_insert(0) += 1;
        }
    }

    /// Removes an interval's occupancy (used when backtracking).
    pub fn release(&mut self, interval: &Interval) {
        for day in interval.days() {
            if let Some(load) = self.daily_load.get_mut(&day) {
                *load -= 1;
                if *load == 0 {
                    self.daily_load.remove(&day);
                }
            }
        }
    }

    pub fn load_on(&self, day: NaiveDate) -> u32 {
        self.daily_load.get(&day).copied().unwrap_or(0)
    }

    /// Checks that adding one submission over `[start, start+duration)`
    /// keeps every day at or below the cap.
    pub fn fits(&self, start: NaiveDate, duration_days: i64) -> bool {
        if !self.enforce {
            return true;
        }
        (0..duration_days)
            .map(|offset| start + Duration::days(offset))
            .all(|day| self.load_on(day) < self.cap)
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }
}

/// The feasibility placement predicate
///
/// Returns true iff submission `idx` may start on `date` given the partial
/// placements and load ledger: scheduling window, earliest-start and
/// engineering-ready floors, dependency completion plus lead time, capacity,
/// blackout policy, deadline (per `mode`), and venue acceptance.
pub fn is_feasible_start(
    ctx: &SchedulingContext,
    idx: usize,
    date: NaiveDate,
    placed: &[Option<Interval>],
    ledger: &LoadLedger,
    mode: DeadlineMode,
) -> bool {
    let submission = ctx.submissions[idx];

    if date < ctx.window_start {
        return false;
    }
    if let Some(earliest) = submission.earliest_start_date {
        if date < earliest {
            return false;
        }
    }
    if let Some(ready) = submission.engineering_ready_date {
        if date < ready {
            return false;
        }
    }

    if ctx.config.scheduling_options.enable_dependency_tracking {
        for &dep in &ctx.deps[idx] {
            match &placed[dep] {
                Some(interval) => {
                    let cleared =
                        interval.end_date + Duration::days(submission.lead_time_from_parents);
                    if cleared > date {
                        return false;
                    }
                }
                None => return false,
            }
        }
    }

    if !ledger.fits(date, ctx.durations[idx]) {
        return false;
    }

    if ctx.config.blackouts_enabled() {
        if !ctx.is_working_day(date) {
            return false;
        }
        let spans_blackout = (0..ctx.durations[idx])
            .map(|offset| date + Duration::days(offset))
            .any(|day| ctx.blackouts.contains(&day));
        if spans_blackout {
            return false;
        }
    }

    if mode == DeadlineMode::Strict {
        if let Some(deadline) = ctx.deadlines[idx] {
            if date + Duration::days(ctx.durations[idx]) > deadline {
                return false;
            }
        }
    }

    ctx.venue_ok[idx]
}

/// Lower bound on the start date: window start, earliest-start and
/// engineering-ready floors, and every placed dependency's clearance date.
pub fn earliest_candidate(
    ctx: &SchedulingContext,
    idx: usize,
    placed: &[Option<Interval>],
) -> NaiveDate {
    let submission = ctx.submissions[idx];
    let mut candidate = ctx.window_start;
    if let Some(earliest) = submission.earliest_start_date {
        candidate = candidate.max(earliest);
    }
    if let Some(ready) = submission.engineering_ready_date {
        candidate = candidate.max(ready);
    }
    for &dep in &ctx.deps[idx] {
        if let Some(interval) = &placed[dep] {
            candidate =
                candidate.max(interval.end_date + Duration::days(submission.lead_time_from_parents));
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Config, Submission, SubmissionType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn two_submission_config() -> Config {
        let mut config = Config::default_config();
        config.scheduling_start_date = Some(d(2026, 1, 1));
        let mut a = Submission::new("a", "A", SubmissionType::Paper);
        a.draft_window_months = 1;
        let mut b = Submission::new("b", "B", SubmissionType::Paper);
        b.draft_window_months = 1;
        b.depends_on = vec!["a".into()];
        b.lead_time_from_parents = 5;
        config.submissions = vec![a, b];
        config
    }

    #[test]
    fn test_ledger_occupy_release_roundtrip() {
        let mut ledger = LoadLedger::new(2, true);
        let interval = Interval::with_duration(d(2026, 1, 1), 10);
        ledger.occupy(&interval);
        assert_eq!(ledger.load_on(d(2026, 1, 5)), 1);
        assert_eq!(ledger.load_on(d(2026, 1, 11)), 0); // half-open
        ledger.release(&interval);
        assert_eq!(ledger.load_on(d(2026, 1, 5)), 0);
    }

    #[test]
    fn test_fits_respects_cap() {
        let mut ledger = LoadLedger::new(1, true);
        ledger.occupy(&Interval::with_duration(d(2026, 1, 1), 10));
        assert!(!ledger.fits(d(2026, 1, 5), 3));
        // First free day is the half-open end
        assert!(ledger.fits(d(2026, 1, 11), 3));
    }

    #[test]
    fn test_dependency_and_lead_time_gate_start() {
        let config = two_submission_config();
        let ctx = SchedulingContext::new(&config).unwrap();
        let a = ctx.index_of("a").unwrap();
        let b = ctx.index_of("b").unwrap();
        let ledger = LoadLedger::new(config.max_concurrent_submissions, true);

        let mut placed = vec![None, None];
        assert!(!is_feasible_start(
            &ctx,
            b,
            d(2026, 3, 1),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));

        placed[a] = Some(Interval::with_duration(d(2026, 1, 1), 30));
        // a ends Jan 31; 5-day lead time clears on Feb 5
        assert!(!is_feasible_start(
            &ctx,
            b,
            d(2026, 2, 4),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));
        assert!(is_feasible_start(
            &ctx,
            b,
            d(2026, 2, 5),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));
        assert_eq!(earliest_candidate(&ctx, b, &placed), d(2026, 2, 5));
    }

    #[test]
    fn test_blackout_start_and_span_rejected() {
        let mut config = two_submission_config();
        config.scheduling_options.enable_blackout_periods = true;
        config.blackout_dates = vec![d(2026, 1, 14)];
        let ctx = SchedulingContext::new(&config).unwrap();
        let a = ctx.index_of("a").unwrap();
        let ledger = LoadLedger::new(config.max_concurrent_submissions, true);
        let placed = vec![None, None];

        // 2026-01-05 is a Monday but the interval spans the blackout
        assert!(!is_feasible_start(
            &ctx,
            a,
            d(2026, 1, 5),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));
        // Saturday start rejected outright
        assert!(!is_feasible_start(
            &ctx,
            a,
            d(2026, 1, 3),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));
    }

    #[test]
    fn test_relaxed_mode_ignores_deadline() {
        let mut config = two_submission_config();
        config.scheduling_start_date = Some(d(2026, 1, 1));
        let mut deadlines = std::collections::BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, d(2026, 1, 10));
        config.conferences.push(crate::domain::entities::Conference::new(
            "cts",
            "CTS",
            crate::domain::entities::ConferenceType::Medical,
            crate::domain::entities::ConferenceRecurrence::Annual,
            deadlines,
        ));
        config.submissions[0].conference_id = Some("cts".into());
        let ctx = SchedulingContext::new(&config).unwrap();
        let a = ctx.index_of("a").unwrap();
        let ledger = LoadLedger::new(config.max_concurrent_submissions, true);
        let placed = vec![None, None];

        assert!(!is_feasible_start(
            &ctx,
            a,
            d(2026, 1, 1),
            &placed,
            &ledger,
            DeadlineMode::Strict
        ));
        assert!(is_feasible_start(
            &ctx,
            a,
            d(2026, 1, 1),
            &placed,
            &ledger,
            DeadlineMode::Relaxed
        ));
    }
}
