//! Engine error taxonomy
//!
//! All failures the engine can produce are value-like and tagged. Scorers and
//! validators never fail; only the schedulers, the topological sort, and the
//! configuration loader construct these.

use thiserror::Error;

/// Errors produced by the scheduling engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required configuration field is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested strategy tag is not in the registry.
    #[error("unknown scheduling strategy '{0}'")]
    UnknownStrategy(String),

    /// A date string could not be parsed as ISO-8601.
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// The dependency graph contains a cycle.
    #[error("circular dependency detected: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),

    /// A strategy exhausted its horizon with submissions still unplaced.
    #[error("could not schedule submissions: {}", .0.join(", "))]
    Unschedulable(Vec<String>),

    /// The backtracking search hit its iteration ceiling.
    #[error("iteration limit of {0} reached before a complete schedule was found")]
    IterationLimit(u64),
}

impl EngineError {
    /// Process exit code for a CLI wrapping the engine: 1 for user/config
    /// errors, 2 for engine-internal failure to schedule.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Config(_)
            | EngineError::UnknownStrategy(_)
            | EngineError::InvalidDate(_)
            | EngineError::CircularDependency(_) => 1,
            EngineError::Unschedulable(_) | EngineError::IterationLimit(_) => 2,
        }
    }

    /// The set of submission IDs a feasibility failure left unplaced.
    pub fn unplaced(&self) -> Option<&[String]> {
        match self {
            EngineError::Unschedulable(ids) => Some(ids),
            _ => None,
        }
    }
}
