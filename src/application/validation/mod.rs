//! Validation kernel module
//!
//! Per-schedule constraint checks. Each check returns a `ValidationResult`
//! and never fails; `validate_schedule` composes them all. Load-time
//! configuration validation lives in `config`.

pub mod config;
pub mod deadline;
pub mod dependency;
pub mod resources;
pub mod venue;
pub mod blackout;
pub mod schedule;

pub use config::validate_config;
pub use deadline::validate_deadline_compliance;
pub use dependency::validate_dependency_satisfaction;
pub use resources::validate_resource_constraints;
pub use venue::{validate_single_conference_policy, validate_venue_compatibility};
pub use blackout::validate_blackout_dates;
pub use schedule::validate_schedule;
