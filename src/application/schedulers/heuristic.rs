//! Heuristic scheduler module
//!
//! List scheduling under a parameterized ordering rule: among the available
//! submissions (dependencies placed), the best by the rule is placed at its
//! earliest feasible date. Kept for ablation against the ranked greedy.

use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::feasibility::{
    earliest_candidate, is_feasible_start, DeadlineMode, LoadLedger,
};
use crate::application::schedulers::greedy::{build_schedule, unplaced_ids};
use crate::application::schedulers::Scheduler;
use crate::domain::entities::{Config, Interval, Schedule};
use crate::domain::errors::EngineError;

/// Ordering rule for the heuristic scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicRule {
    #[default]
    EarliestDeadline,
    ShortestProcessing,
    PriorityWeighted,
}

impl FromStr for HeuristicRule {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earliest_deadline" => Ok(HeuristicRule::EarliestDeadline),
            "shortest_processing" => Ok(HeuristicRule::ShortestProcessing),
            "priority_weighted" => Ok(HeuristicRule::PriorityWeighted),
            other => Err(EngineError::Config(format!(
                "unknown heuristic rule '{other}'"
            ))),
        }
    }
}

/// Rule-ordered list scheduler.
#[derive(Debug)]
pub struct HeuristicScheduler {
    config: Config,
    rule: HeuristicRule,
}

impl HeuristicScheduler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rule: HeuristicRule::default(),
        }
    }

    pub fn with_rule(config: Config, rule: HeuristicRule) -> Self {
        Self { config, rule }
    }
}

impl Scheduler for HeuristicScheduler {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        let ctx = SchedulingContext::new(&self.config)?;
        run_heuristic(&ctx, self.rule)
    }
}

/// Picks the best available submission under the rule; ID ascending breaks
/// every remaining tie.
fn pick_next(
    ctx: &SchedulingContext,
    rule: HeuristicRule,
    available: &[usize],
) -> usize {
    let mut best = available[0];
    for &idx in &available[1..] {
        let better = match rule {
            HeuristicRule::EarliestDeadline => {
                let deadline = ctx.deadlines[idx].unwrap_or(NaiveDate::MAX);
                let best_deadline = ctx.deadlines[best].unwrap_or(NaiveDate::MAX);
                deadline
                    .cmp(&best_deadline)
                    .then_with(|| ctx.id(idx).cmp(ctx.id(best)))
                    .is_lt()
            }
            HeuristicRule::ShortestProcessing => ctx.durations[idx]
                .cmp(&ctx.durations[best])
                .then_with(|| ctx.id(idx).cmp(ctx.id(best)))
                .is_lt(),
            HeuristicRule::PriorityWeighted => {
                // Higher priority first; deeper chains break priority ties.
                (ctx.priorities[best], ctx.depths[best])
                    .partial_cmp(&(ctx.priorities[idx], ctx.depths[idx]))
                    .map(|ordering| {
                        ordering
                            .then_with(|| ctx.id(idx).cmp(ctx.id(best)))
                            .is_lt()
                    })
                    .unwrap_or(false)
            }
        };
        if better {
            best = idx;
        }
    }
    best
}

fn run_heuristic(ctx: &SchedulingContext, rule: HeuristicRule) -> Result<Schedule, EngineError> {
    let total = ctx.len();
    let mut placed: Vec<Option<Interval>> = vec![None; total];
    let mut ledger = LoadLedger::new(
        ctx.config.max_concurrent_submissions,
        ctx.config.scheduling_options.enable_concurrency_control,
    );
    let mut placed_count = 0usize;

    while placed_count < total {
        let available: Vec<usize> = ctx
            .topo_order
            .iter()
            .copied()
            .filter(|&idx| placed[idx].is_none())
            .filter(|&idx| ctx.deps[idx].iter().all(|&dep| placed[dep].is_some()))
            .collect();
        if available.is_empty() {
            break;
        }

        let idx = pick_next(ctx, rule, &available);

        let mut date = earliest_candidate(ctx, idx, &placed);
        let mut start = None;
        while date <= ctx.window_end {
            if is_feasible_start(ctx, idx, date, &placed, &ledger, DeadlineMode::Strict) {
                start = Some(date);
                break;
            }
            date += Duration::days(1);
        }
        let Some(start) = start else {
            break;
        };

        let interval = Interval::with_duration(start, ctx.durations[idx]);
        ledger.occupy(&interval);
        placed[idx] = Some(interval);
        placed_count += 1;
    }

    if placed_count < total {
        return Err(EngineError::Unschedulable(unplaced_ids(ctx, &placed)));
    }
    Ok(build_schedule(ctx, &placed))
}
