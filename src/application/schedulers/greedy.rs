//! Greedy scheduler module
//!
//! Day-stepping greedy placement: each calendar day, finished submissions
//! retire, ready submissions are ranked by priority (closest deadline, then
//! ID, as tie-breaks) and placed while the concurrency cap allows. The same
//! loop body backs the stochastic strategy through a priority jitter hook.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::feasibility::{
    earliest_candidate, is_feasible_start, DeadlineMode, LoadLedger,
};
use crate::application::schedulers::Scheduler;
use crate::domain::calendar;
use crate::domain::entities::{Config, Interval, Schedule, SubmissionType};
use crate::domain::errors::EngineError;

/// Greedy day-by-day scheduler.
#[derive(Debug)]
pub struct GreedyScheduler {
    config: Config,
}

impl GreedyScheduler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Scheduler for GreedyScheduler {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        let ctx = SchedulingContext::new(&self.config)?;
        run_daily_loop(&ctx, |_| 0.0)
    }
}

/// Builds a Schedule from index-addressed placements.
pub(crate) fn build_schedule(ctx: &SchedulingContext, placed: &[Option<Interval>]) -> Schedule {
    let mut schedule = Schedule::new();
    for (idx, interval) in placed.iter().enumerate() {
        if let Some(interval) = interval {
            schedule.add_interval(ctx.id(idx), *interval);
        }
    }
    schedule
}

/// IDs still unplaced, ascending.
pub(crate) fn unplaced_ids(ctx: &SchedulingContext, placed: &[Option<Interval>]) -> Vec<String> {
    let mut ids: Vec<String> = placed
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(idx, _)| ctx.id(idx).to_string())
        .collect();
    ids.sort();
    ids
}

/// Ranks candidate indices: jittered priority descending, then closest
/// deadline, then submission ID ascending for determinism.
pub(crate) fn rank_candidates(
    ctx: &SchedulingContext,
    candidates: &mut Vec<(usize, f64)>,
) {
    candidates.sort_by(|&(a, score_a), &(b, score_b)| {
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let deadline_a = ctx.deadlines[a].unwrap_or(NaiveDate::MAX);
                let deadline_b = ctx.deadlines[b].unwrap_or(NaiveDate::MAX);
                deadline_a.cmp(&deadline_b)
            })
            .then_with(|| ctx.id(a).cmp(ctx.id(b)))
    });
}

/// Submissions whose dependencies are all placed and not yet placed
/// themselves, in topological order.
pub(crate) fn ready_candidates(
    ctx: &SchedulingContext,
    placed: &[Option<Interval>],
) -> Vec<usize> {
    ctx.topo_order
        .iter()
        .copied()
        .filter(|&idx| placed[idx].is_none())
        .filter(|&idx| ctx.deps[idx].iter().all(|&dep| placed[dep].is_some()))
        .collect()
}

/// Pre-places abstracts `abstract_advance_days` before their deadline, or
/// when their dependencies clear, whichever is later.
fn schedule_early_abstracts(
    ctx: &SchedulingContext,
    placed: &mut [Option<Interval>],
    ledger: &mut LoadLedger,
) {
    let advance = ctx.config.scheduling_options.abstract_advance_days;
    for &idx in &ctx.topo_order {
        let submission = ctx.submissions[idx];
        if submission.kind != SubmissionType::Abstract || placed[idx].is_some() {
            continue;
        }
        let Some(deadline) = ctx.deadlines[idx] else {
            continue;
        };
        if !ctx.deps[idx].iter().all(|&dep| placed[dep].is_some()) {
            continue;
        }

        let deps_ready = earliest_candidate(ctx, idx, placed);
        let ideal = deadline - Duration::days(advance);
        let start = calendar::next_working_day(
            deps_ready.max(ideal).max(ctx.window_start),
            &ctx.config.blackout_dates,
            ctx.config.blackouts_enabled(),
        );

        if is_feasible_start(ctx, idx, start, placed, ledger, DeadlineMode::Strict) {
            let interval = Interval::with_duration(start, ctx.durations[idx]);
            ledger.occupy(&interval);
            placed[idx] = Some(interval);
            debug!(id = ctx.id(idx), %start, "pre-placed abstract");
        }
    }
}

/// The shared greedy day loop
///
/// `jitter` perturbs each candidate's ranking priority; the greedy strategy
/// passes a zero jitter, the stochastic strategy passes scaled noise.
pub(crate) fn run_daily_loop<F>(
    ctx: &SchedulingContext,
    mut jitter: F,
) -> Result<Schedule, EngineError>
where
    F: FnMut(usize) -> f64,
{
    let total = ctx.len();
    let mut placed: Vec<Option<Interval>> = vec![None; total];
    let mut ledger = LoadLedger::new(
        ctx.config.max_concurrent_submissions,
        ctx.config.scheduling_options.enable_concurrency_control,
    );
    let mut placed_count = 0usize;

    if ctx.config.scheduling_options.enable_early_abstract_scheduling {
        schedule_early_abstracts(ctx, &mut placed, &mut ledger);
        placed_count = placed.iter().filter(|slot| slot.is_some()).count();
    }

    let mut current = ctx.window_start;
    while current <= ctx.window_end && placed_count < total {
        if !ctx.is_working_day(current) {
            current += Duration::days(1);
            continue;
        }

        // The load ledger already reflects retirements: a submission whose
        // interval ended before today contributes nothing to today's load.
        let mut candidates: Vec<(usize, f64)> = ready_candidates(ctx, &placed)
            .into_iter()
            .map(|idx| (idx, ctx.priorities[idx] + jitter(idx)))
            .collect();
        rank_candidates(ctx, &mut candidates);

        for (idx, _) in candidates {
            let cap_reached = ctx.config.scheduling_options.enable_concurrency_control
                && ledger.load_on(current) >= ledger.cap();
            if cap_reached {
                break;
            }
            if is_feasible_start(ctx, idx, current, &placed, &ledger, DeadlineMode::Strict) {
                let interval = Interval::with_duration(current, ctx.durations[idx]);
                ledger.occupy(&interval);
                placed[idx] = Some(interval);
                placed_count += 1;
            }
        }

        current += Duration::days(1);
    }

    if placed_count < total {
        return Err(EngineError::Unschedulable(unplaced_ids(ctx, &placed)));
    }
    Ok(build_schedule(ctx, &placed))
}
