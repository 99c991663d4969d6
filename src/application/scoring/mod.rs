//! Scoring module
//!
//! Pure functions from `(Schedule, Config)` to penalty, quality, and
//! efficiency scores. Scorers never fail and never mutate their inputs;
//! they are independently swappable and composed by the analytics
//! aggregator.

pub mod penalty;
pub mod quality;
pub mod efficiency;

pub use penalty::penalty_score;
pub use quality::{quality_balance, quality_robustness, quality_score};
pub use efficiency::{
    efficiency_score, resource_efficiency, timeline_efficiency, EfficiencyMetrics,
    TimelineMetrics,
};
