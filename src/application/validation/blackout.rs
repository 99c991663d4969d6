//! Blackout date validation

use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{Severity, ValidationResult, Violation, ViolationKind};

/// Checks that no scheduled interval covers a blackout date. A no-op when
/// blackout enforcement is disabled or no blackout dates are configured.
pub fn validate_blackout_dates(schedule: &Schedule, config: &Config) -> ValidationResult {
    if !config.blackouts_enabled() || config.blackout_dates.is_empty() {
        return ValidationResult::empty("blackout dates");
    }

    let mut violations = Vec::new();
    let mut total = 0usize;
    let mut compliant = 0usize;

    for (sid, interval) in schedule.iter() {
        total += 1;
        match interval
            .days()
            .find(|day| config.blackout_dates.contains(day))
        {
            Some(day) => violations.push(Violation {
                submission_id: sid.clone(),
                description: format!("scheduled across blackout date {day}"),
                severity: Severity::High,
                kind: ViolationKind::Blackout { date: day },
            }),
            None => compliant += 1,
        }
    }

    ValidationResult::from_parts(violations, total, compliant, "blackout dates")
}
