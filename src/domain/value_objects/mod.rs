pub mod violation;
pub mod penalty_breakdown;
pub mod schedule_metrics;

pub use violation::{
    DependencyIssue, Severity, ValidationMetadata, ValidationResult, Violation, ViolationKind,
};
pub use penalty_breakdown::PenaltyBreakdown;
pub use schedule_metrics::ScheduleMetrics;
