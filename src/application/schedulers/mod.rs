//! Scheduler strategies module
//!
//! The `Scheduler` trait, the strategy registry, and the shared feasibility
//! kernel. All strategies share the topological order, the feasibility
//! predicate, and the duration calculator; they differ only in how the next
//! `(submission, start date)` pair is chosen.

pub mod context;
pub mod feasibility;
pub mod greedy;
pub mod stochastic;
pub mod lookahead;
pub mod backtracking;
pub mod heuristic;
pub mod optimal;

use std::fmt;
use std::str::FromStr;

pub use backtracking::BacktrackingScheduler;
pub use context::SchedulingContext;
pub use feasibility::{DeadlineMode, LoadLedger};
pub use greedy::GreedyScheduler;
pub use heuristic::{HeuristicRule, HeuristicScheduler};
pub use lookahead::LookaheadScheduler;
pub use optimal::{Objective, OptimalScheduler, SolveStatus};
pub use stochastic::StochasticScheduler;

use crate::domain::entities::{Config, Schedule};
use crate::domain::errors::EngineError;

/// A scheduling strategy: a pure function of its Config producing a Schedule.
pub trait Scheduler: std::fmt::Debug {
    /// The registry tag this scheduler answers to.
    fn name(&self) -> &'static str;

    /// Produces a complete schedule or an engine error.
    fn schedule(&self) -> Result<Schedule, EngineError>;
}

/// The strategy vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStrategy {
    Greedy,
    Stochastic,
    Lookahead,
    Backtracking,
    Random,
    Heuristic,
    Optimal,
    Advanced,
}

impl SchedulerStrategy {
    /// Every registered strategy, in tag order.
    pub fn all() -> [SchedulerStrategy; 8] {
        [
            SchedulerStrategy::Greedy,
            SchedulerStrategy::Stochastic,
            SchedulerStrategy::Lookahead,
            SchedulerStrategy::Backtracking,
            SchedulerStrategy::Random,
            SchedulerStrategy::Heuristic,
            SchedulerStrategy::Optimal,
            SchedulerStrategy::Advanced,
        ]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SchedulerStrategy::Greedy => "greedy",
            SchedulerStrategy::Stochastic => "stochastic",
            SchedulerStrategy::Lookahead => "lookahead",
            SchedulerStrategy::Backtracking => "backtracking",
            SchedulerStrategy::Random => "random",
            SchedulerStrategy::Heuristic => "heuristic",
            SchedulerStrategy::Optimal => "optimal",
            SchedulerStrategy::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SchedulerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for SchedulerStrategy {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SchedulerStrategy::all()
            .into_iter()
            .find(|strategy| strategy.tag() == value)
            .ok_or_else(|| EngineError::UnknownStrategy(value.to_string()))
    }
}

/// Constructs the scheduler registered under `tag`
///
/// The config is cloned into the scheduler, making each instance an
/// independent engine run.
///
/// # Errors
///
/// `EngineError::UnknownStrategy` when the tag is not registered.
pub fn create_scheduler(tag: &str, config: Config) -> Result<Box<dyn Scheduler>, EngineError> {
    let strategy: SchedulerStrategy = tag.parse()?;
    Ok(match strategy {
        SchedulerStrategy::Greedy => Box::new(GreedyScheduler::new(config)),
        SchedulerStrategy::Stochastic => Box::new(StochasticScheduler::new(config)),
        SchedulerStrategy::Random => Box::new(StochasticScheduler::fully_random(config)),
        SchedulerStrategy::Lookahead => Box::new(LookaheadScheduler::new(config)),
        SchedulerStrategy::Advanced => Box::new(LookaheadScheduler::advanced(config)),
        SchedulerStrategy::Backtracking => Box::new(BacktrackingScheduler::new(config)),
        SchedulerStrategy::Heuristic => Box::new(HeuristicScheduler::new(config)),
        SchedulerStrategy::Optimal => Box::new(OptimalScheduler::new(config)),
    })
}

/// The registered strategy tags, for help output and enumeration.
pub fn available_strategies() -> Vec<&'static str> {
    SchedulerStrategy::all().iter().map(|s| s.tag()).collect()
}
