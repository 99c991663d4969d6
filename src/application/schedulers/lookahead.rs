//! Lookahead scheduler module
//!
//! Before committing a placement, the top-ranked candidates are scored by
//! simulating a short greedy run from each hypothetical state; the candidate
//! whose simulation leaves the most downstream slack wins. A bonus nudges
//! the choice toward candidates that unlock the most unplaced successors.

use chrono::{Duration, NaiveDate};

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::feasibility::{
    is_feasible_start, DeadlineMode, LoadLedger,
};
use crate::application::schedulers::greedy::{
    build_schedule, rank_candidates, ready_candidates, unplaced_ids,
};
use crate::application::schedulers::Scheduler;
use crate::domain::constants::{LOOKAHEAD_CANDIDATES, LOOKAHEAD_WINDOW_DAYS};
use crate::domain::entities::{Config, Interval, Schedule};
use crate::domain::errors::EngineError;

/// Greedy scheduler with bounded forward simulation.
#[derive(Debug)]
pub struct LookaheadScheduler {
    config: Config,
    window_days: i64,
    name: &'static str,
}

impl LookaheadScheduler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            window_days: LOOKAHEAD_WINDOW_DAYS,
            name: "lookahead",
        }
    }

    /// Deeper-window variant used by the `advanced` strategy tag.
    pub fn advanced(config: Config) -> Self {
        Self {
            config,
            window_days: 2 * LOOKAHEAD_WINDOW_DAYS,
            name: "advanced",
        }
    }
}

impl Scheduler for LookaheadScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        let ctx = SchedulingContext::new(&self.config)?;
        run_lookahead(&ctx, self.window_days)
    }
}

/// Slack left by a hypothetical placement: the candidate is committed, a
/// greedy simulation runs `window_days` forward, and every simulated
/// placement contributes `deadline - end_date` days.
fn simulate_placement(
    ctx: &SchedulingContext,
    candidate: usize,
    day: NaiveDate,
    placed: &[Option<Interval>],
    ledger: &LoadLedger,
    window_days: i64,
) -> f64 {
    let mut sim_placed = placed.to_vec();
    let mut sim_ledger = ledger.clone();

    let interval = Interval::with_duration(day, ctx.durations[candidate]);
    sim_ledger.occupy(&interval);
    sim_placed[candidate] = Some(interval);

    let mut slack = slack_of(ctx, candidate, &interval);
    let mut current = day + Duration::days(1);
    let horizon = (day + Duration::days(window_days)).min(ctx.window_end);

    while current <= horizon {
        if !ctx.is_working_day(current) {
            current += Duration::days(1);
            continue;
        }
        let mut candidates: Vec<(usize, f64)> = ready_candidates(ctx, &sim_placed)
            .into_iter()
            .map(|idx| (idx, ctx.priorities[idx]))
            .collect();
        rank_candidates(ctx, &mut candidates);
        for (idx, _) in candidates {
            if ctx.config.scheduling_options.enable_concurrency_control
                && sim_ledger.load_on(current) >= sim_ledger.cap()
            {
                break;
            }
            if is_feasible_start(ctx, idx, current, &sim_placed, &sim_ledger, DeadlineMode::Strict)
            {
                let sim_interval = Interval::with_duration(current, ctx.durations[idx]);
                sim_ledger.occupy(&sim_interval);
                sim_placed[idx] = Some(sim_interval);
                slack += slack_of(ctx, idx, &sim_interval);
            }
        }
        current += Duration::days(1);
    }

    slack
}

fn slack_of(ctx: &SchedulingContext, idx: usize, interval: &Interval) -> f64 {
    match ctx.deadlines[idx] {
        Some(deadline) => (deadline - interval.end_date).num_days() as f64,
        None => 0.0,
    }
}

/// Successors of `idx` not yet placed; each one adds the bonus increment.
fn successor_bonus(ctx: &SchedulingContext, idx: usize, placed: &[Option<Interval>]) -> f64 {
    let unlocked = ctx.successors[idx]
        .iter()
        .filter(|&&succ| placed[succ].is_none())
        .count();
    ctx.config.lookahead_bonus_increment * unlocked as f64
}

fn run_lookahead(ctx: &SchedulingContext, window_days: i64) -> Result<Schedule, EngineError> {
    let total = ctx.len();
    let mut placed: Vec<Option<Interval>> = vec![None; total];
    let mut ledger = LoadLedger::new(
        ctx.config.max_concurrent_submissions,
        ctx.config.scheduling_options.enable_concurrency_control,
    );
    let mut placed_count = 0usize;

    let mut current = ctx.window_start;
    while current <= ctx.window_end && placed_count < total {
        if !ctx.is_working_day(current) {
            current += Duration::days(1);
            continue;
        }

        // Keep placing on this day until the cap or the candidates run out.
        loop {
            if ctx.config.scheduling_options.enable_concurrency_control
                && ledger.load_on(current) >= ledger.cap()
            {
                break;
            }
            let mut candidates: Vec<(usize, f64)> = ready_candidates(ctx, &placed)
                .into_iter()
                .filter(|&idx| {
                    is_feasible_start(ctx, idx, current, &placed, &ledger, DeadlineMode::Strict)
                })
                .map(|idx| (idx, ctx.priorities[idx]))
                .collect();
            rank_candidates(ctx, &mut candidates);
            if candidates.is_empty() {
                break;
            }

            let best = candidates
                .iter()
                .take(LOOKAHEAD_CANDIDATES)
                .map(|&(idx, priority)| {
                    let score = simulate_placement(ctx, idx, current, &placed, &ledger, window_days)
                        + successor_bonus(ctx, idx, &placed);
                    (idx, score, priority)
                })
                .max_by(|a, b| {
                    a.1.partial_cmp(&b.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| {
                            a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal)
                        })
                        .then_with(|| ctx.id(b.0).cmp(ctx.id(a.0)))
                })
                .map(|(idx, _, _)| idx)
                .expect("non-empty candidates");

            let interval = Interval::with_duration(current, ctx.durations[best]);
            ledger.occupy(&interval);
            placed[best] = Some(interval);
            placed_count += 1;
        }

        current += Duration::days(1);
    }

    if placed_count < total {
        return Err(EngineError::Unschedulable(unplaced_ids(ctx, &placed)));
    }
    Ok(build_schedule(ctx, &placed))
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

    fn small_config() -> Config {
        let mut config = Config::default_config();
        config.scheduling_start_date = Some(d(2026, 2, 2));
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, d(2027, 2, 1));
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        let mut root = Submission::new("root", "Root", SubmissionType::Paper);
        root.draft_window_months = 1;
        let mut leaf1 = Submission::new("leaf1", "Leaf 1", SubmissionType::Paper);
        leaf1.draft_window_months = 1;
        leaf1.depends_on = vec!["root".into()];
        leaf1.conference_id = Some("cts".into());
        let mut solo = Submission::new("solo", "Solo", SubmissionType::Paper);
        solo.draft_window_months = 1;
        solo.conference_id = Some("cts".into());
        config.submissions = vec![root, leaf1, solo];
        config
    }

    #[test]
    fn test_lookahead_places_everything() {
        let schedule = LookaheadScheduler::new(small_config()).schedule().unwrap();
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_lookahead_is_deterministic() {
        let config = small_config();
        let first = LookaheadScheduler::new(config.clone()).schedule().unwrap();
        let second = LookaheadScheduler::new(config).schedule().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dependencies_still_respected() {
        let schedule = LookaheadScheduler::new(small_config()).schedule().unwrap();
        let root = schedule.get("root").unwrap();
        let leaf = schedule.get("leaf1").unwrap();
        assert!(root.end_date <= leaf.start_date);
    }

    #[test]
    fn test_advanced_uses_wider_window() {
        let scheduler = LookaheadScheduler::advanced(small_config());
        assert_eq!(scheduler.name(), "advanced");
        assert_eq!(scheduler.window_days, 2 * LOOKAHEAD_WINDOW_DAYS);
    }
}
