//! Composite schedule validation
//!
//! Runs every constraint check and returns one result whose violations are
//! the union and whose validity is the conjunction.

use crate::application::validation::blackout::validate_blackout_dates;
use crate::application::validation::deadline::validate_deadline_compliance;
use crate::application::validation::dependency::validate_dependency_satisfaction;
use crate::application::validation::resources::validate_resource_constraints;
use crate::application::validation::venue::{
    validate_single_conference_policy, validate_venue_compatibility,
};
use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{ValidationMetadata, ValidationResult};

/// Runs all constraint checks over a schedule.
pub fn validate_schedule(schedule: &Schedule, config: &Config) -> ValidationResult {
    let results = [
        validate_deadline_compliance(schedule, config),
        validate_dependency_satisfaction(schedule, config),
        validate_resource_constraints(schedule, config),
        validate_venue_compatibility(schedule, config),
        validate_single_conference_policy(schedule, config),
        validate_blackout_dates(schedule, config),
    ];

    let mut violations = Vec::new();
    let mut total = 0usize;
    let mut compliant = 0usize;
    for result in results {
        total += result.metadata.total;
        compliant += result.metadata.compliant;
        violations.extend(result.violations);
    }

    let metadata = ValidationMetadata::from_counts(total, compliant);
    ValidationResult {
        is_valid: violations.is_empty(),
        summary: format!(
            "schedule validation: {} violations across {} checks",
            violations.len(),
            6
        ),
        violations,
        metadata,
    }
}
