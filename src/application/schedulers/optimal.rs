//! Optimal scheduler module
//!
//! Exact search over the scheduling problem's decision variables: one start
//! date per submission, precedence, daily-load, and blackout constraints,
//! minimizing either total deadline-and-slack penalty or makespan. The
//! search is a depth-first branch-and-bound over the topological order with
//! incumbent pruning and a wall-clock budget; oversized instances, timeouts,
//! and infeasible models fall back to the greedy strategy transparently.

use std::collections::BTreeSet;
use std::time::{Duration as StdDuration, Instant};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::feasibility::{
    earliest_candidate, is_feasible_start, DeadlineMode, LoadLedger,
};
use crate::application::schedulers::greedy::{build_schedule, run_daily_loop};
use crate::application::schedulers::Scheduler;
use crate::domain::calendar;
use crate::domain::calendar::months_between;
use crate::domain::constants::{FULL_YEAR_DEFERRAL_MONTHS, MILP_MAX_SUBMISSIONS};
use crate::domain::entities::{Config, Interval, Schedule};
use crate::domain::errors::EngineError;

/// What the optimal strategy minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Deadline lateness plus slack-cost terms.
    #[default]
    MinPenalty,
    /// Days between the earliest start and the latest end.
    MinMakespan,
}

/// How the solve concluded; informational, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The search ran to completion within budget.
    Optimal,
    /// Instance exceeded the size policy; greedy result returned.
    FallbackTooLarge,
    /// Budget expired; the best schedule found so far is returned.
    FallbackTimeout,
    /// No feasible assignment exists in the model; greedy result returned.
    FallbackInfeasible,
}

/// Exact branch-and-bound scheduler with greedy fallback.
#[derive(Debug)]
pub struct OptimalScheduler {
    config: Config,
    objective: Objective,
}

impl OptimalScheduler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            objective: Objective::default(),
        }
    }

    pub fn with_objective(config: Config, objective: Objective) -> Self {
        Self { config, objective }
    }

    /// Runs the solve, reporting how the schedule was obtained.
    pub fn solve(&self) -> Result<(Schedule, SolveStatus), EngineError> {
        // Circular dependencies are detected before any formulation work.
        let ctx = SchedulingContext::new(&self.config)?;

        if ctx.len() > MILP_MAX_SUBMISSIONS {
            warn!(
                submissions = ctx.len(),
                limit = MILP_MAX_SUBMISSIONS,
                "instance too large for exact search, falling back to greedy"
            );
            let schedule = run_daily_loop(&ctx, |_| 0.0)?;
            return Ok((schedule, SolveStatus::FallbackTooLarge));
        }

        let budget =
            StdDuration::from_secs(self.config.scheduling_options.milp_timeout_seconds);
        let mut search = BranchAndBound {
            ctx: &ctx,
            objective: self.objective,
            placed: vec![None; ctx.len()],
            ledger: LoadLedger::new(
                self.config.max_concurrent_submissions,
                self.config.scheduling_options.enable_concurrency_control,
            ),
            best: None,
            best_cost: f64::INFINITY,
            started: Instant::now(),
            budget,
            timed_out: false,
        };

        // Seed the incumbent with the greedy solution when one exists; it
        // bounds the search and guarantees we never return something worse.
        if let Ok(greedy) = run_daily_loop(&ctx, |_| 0.0) {
            let placements = placements_of(&ctx, &greedy);
            search.best_cost = total_cost(&ctx, self.objective, &placements);
            search.best = Some(placements);
        }

        search.explore(0, 0.0);

        if search.timed_out {
            warn!("optimal search budget expired, returning best schedule found");
            return match search.best {
                Some(placements) => {
                    Ok((build_schedule(&ctx, &placements), SolveStatus::FallbackTimeout))
                }
                // A greedy failure is never masked by the fallback.
                None => run_daily_loop(&ctx, |_| 0.0)
                    .map(|schedule| (schedule, SolveStatus::FallbackTimeout)),
            };
        }

        match search.best {
            Some(placements) => {
                info!(cost = search.best_cost, "optimal search completed");
                Ok((build_schedule(&ctx, &placements), SolveStatus::Optimal))
            }
            None => {
                warn!("no feasible assignment in the exact model, falling back to greedy");
                run_daily_loop(&ctx, |_| 0.0)
                    .map(|schedule| (schedule, SolveStatus::FallbackInfeasible))
            }
        }
    }
}

impl Scheduler for OptimalScheduler {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        self.solve().map(|(schedule, status)| {
            info!(?status, "optimal strategy outcome");
            schedule
        })
    }
}

fn placements_of(ctx: &SchedulingContext, schedule: &Schedule) -> Vec<Option<Interval>> {
    let mut placed = vec![None; ctx.len()];
    for (id, interval) in schedule.iter() {
        if let Some(idx) = ctx.index_of(id) {
            placed[idx] = Some(*interval);
        }
    }
    placed
}

/// Deadline lateness plus slack-cost terms for one placement.
fn placement_penalty(ctx: &SchedulingContext, idx: usize, interval: &Interval) -> f64 {
    let submission = ctx.submissions[idx];
    let costs = &ctx.config.penalty_costs;
    let mut penalty = 0.0;

    if let Some(deadline) = ctx.deadlines[idx] {
        let days_late = (interval.end_date - deadline).num_days();
        if days_late > 0 {
            let per_day = submission.penalty_cost_per_day.unwrap_or(if submission.is_work_item() {
                costs.default_mod_penalty_per_day
            } else {
                costs.default_paper_penalty_per_day
            });
            penalty += days_late as f64 * per_day;
        }
    }

    if let Some(earliest) = submission.earliest_start_date {
        let slack = submission.free_slack_months.unwrap_or(0);
        let months_delay =
            (months_between(earliest, interval.start_date) - slack).max(0);
        let monthly = submission
            .penalty_cost_per_month
            .unwrap_or(costs.monthly_slip_penalty);
        penalty += monthly * months_delay as f64;
        if months_delay >= FULL_YEAR_DEFERRAL_MONTHS {
            penalty += costs.full_year_deferral_penalty;
        }
    }

    penalty
}

fn total_cost(
    ctx: &SchedulingContext,
    objective: Objective,
    placed: &[Option<Interval>],
) -> f64 {
    match objective {
        Objective::MinPenalty => placed
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|interval| (idx, interval)))
            .map(|(idx, interval)| placement_penalty(ctx, idx, interval))
            .sum(),
        Objective::MinMakespan => span_days(placed) as f64,
    }
}

fn span_days(placed: &[Option<Interval>]) -> i64 {
    let starts = placed.iter().flatten().map(|i| i.start_date).min();
    let ends = placed.iter().flatten().map(|i| i.end_date).max();
    match (starts, ends) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 0,
    }
}

struct BranchAndBound<'a, 'c> {
    ctx: &'a SchedulingContext<'c>,
    objective: Objective,
    placed: Vec<Option<Interval>>,
    ledger: LoadLedger,
    best: Option<Vec<Option<Interval>>>,
    best_cost: f64,
    started: Instant,
    budget: StdDuration,
    timed_out: bool,
}

impl BranchAndBound<'_, '_> {
    /// Candidate start dates for one level: the earliest legal date plus
    /// every capacity-release point after it. Later dates only ever cost
    /// more, so release points are the only other starts worth branching on.
    fn candidate_dates(&self, idx: usize) -> Vec<NaiveDate> {
        let lower = earliest_candidate(self.ctx, idx, &self.placed);
        let mut candidates: BTreeSet<NaiveDate> = BTreeSet::new();
        candidates.insert(self.working_day_at_or_after(lower));
        for interval in self.placed.iter().flatten() {
            if interval.end_date >= lower {
                candidates.insert(self.working_day_at_or_after(interval.end_date));
            }
        }
        candidates
            .into_iter()
            .filter(|&date| date <= self.ctx.window_end)
            .collect()
    }

    fn working_day_at_or_after(&self, date: NaiveDate) -> NaiveDate {
        calendar::next_working_day(
            date,
            &self.ctx.config.blackout_dates,
            self.ctx.config.blackouts_enabled(),
        )
    }

    fn explore(&mut self, position: usize, cost_so_far: f64) {
        if self.timed_out {
            return;
        }
        if self.started.elapsed() > self.budget {
            self.timed_out = true;
            return;
        }
        let bound = match self.objective {
            Objective::MinPenalty => cost_so_far,
            Objective::MinMakespan => span_days(&self.placed) as f64,
        };
        if bound >= self.best_cost {
            return;
        }
        if position == self.ctx.topo_order.len() {
            let cost = total_cost(self.ctx, self.objective, &self.placed);
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best = Some(self.placed.clone());
            }
            return;
        }

        let idx = self.ctx.topo_order[position];
        for date in self.candidate_dates(idx) {
            if !is_feasible_start(
                self.ctx,
                idx,
                date,
                &self.placed,
                &self.ledger,
                DeadlineMode::Relaxed,
            ) {
                continue;
            }
            let interval = Interval::with_duration(date, self.ctx.durations[idx]);
            let step_cost = match self.objective {
                Objective::MinPenalty => placement_penalty(self.ctx, idx, &interval),
                Objective::MinMakespan => 0.0,
            };
            self.ledger.occupy(&interval);
            self.placed[idx] = Some(interval);
            self.explore(position + 1, cost_so_far + step_cost);
            self.ledger.release(&interval);
            self.placed[idx] = None;
            if self.timed_out {
                return;
            }
        }
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

    fn base_config() -> Config {
        let mut config = Config::default_config();
        config.scheduling_start_date = Some(d(2026, 2, 2));
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, d(2026, 12, 1));
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        config
    }

    fn paper(id: &str) -> Submission {
        let mut sub = Submission::new(id, format!("Paper {id}"), SubmissionType::Paper);
        sub.conference_id = Some("cts".into());
        sub.draft_window_months = 1;
        sub
    }

    #[test]
    fn test_small_instance_solves_optimally() {
        let mut config = base_config();
        config.submissions = vec![paper("p1"), paper("p2")];
        let (schedule, status) = OptimalScheduler::new(config).solve().unwrap();
        assert_eq!(status, SolveStatus::Optimal);
        assert_eq!(schedule.len(), 2);
        // Ample capacity: both start on day one, zero penalty.
        assert_eq!(schedule.get("p1").unwrap().start_date, d(2026, 2, 2));
        assert_eq!(schedule.get("p2").unwrap().start_date, d(2026, 2, 2));
    }

    #[test]
    fn test_oversized_instance_falls_back() {
        let mut config = base_config();
        for n in 0..(MILP_MAX_SUBMISSIONS + 1) {
            config.submissions.push(paper(&format!("p{n:02}")));
        }
        let (schedule, status) = OptimalScheduler::new(config).solve().unwrap();
        assert_eq!(status, SolveStatus::FallbackTooLarge);
        assert_eq!(schedule.len(), MILP_MAX_SUBMISSIONS + 1);
    }

    #[test]
    fn test_cycle_detected_before_formulation() {
        let mut config = base_config();
        let mut a = paper("a");
        a.depends_on = vec!["b".into()];
        let mut b = paper("b");
        b.depends_on = vec!["a".into()];
        config.submissions = vec![a, b];
        assert!(matches!(
            OptimalScheduler::new(config).solve(),
            Err(EngineError::CircularDependency(_))
        ));
    }

    #[test]
    fn test_makespan_objective_serialization() {
        let mut config = base_config();
        config.max_concurrent_submissions = 1;
        config.submissions = vec![paper("p1"), paper("p2")];
        let (schedule, status) =
            OptimalScheduler::with_objective(config, Objective::MinMakespan)
                .solve()
                .unwrap();
        assert_eq!(status, SolveStatus::Optimal);
        // Cap 1 forces back-to-back placement: 60 days total.
        assert_eq!(schedule.makespan_days(), 60);
    }

    #[test]
    fn test_trait_entry_point_matches_solve() {
        let mut config = base_config();
        config.submissions = vec![paper("p1")];
        let scheduler = OptimalScheduler::new(config);
        let via_trait = scheduler.schedule().unwrap();
        let (via_solve, _) = scheduler.solve().unwrap();
        assert_eq!(via_trait, via_solve);
    }
}
