//! Resource constraint validation
//!
//! Daily-load accounting over half-open intervals. The accumulation rule:
//! one violation per over-capacity day, carrying that day's `excess`
//! (load minus the cap), so four submissions on one day with cap 2 yield a
//! single violation with excess 2.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{Severity, ValidationResult, Violation, ViolationKind};

/// Builds the daily-load histogram for a schedule.
pub fn daily_load(schedule: &Schedule) -> BTreeMap<NaiveDate, u32> {
    let mut load: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for (_, interval) in schedule.iter() {
        for day in interval.days() {
            *load.entry(day).or_insert(0) += 1;
        }
    }
    load
}

/// Checks the concurrency cap for every day any interval covers.
pub fn validate_resource_constraints(schedule: &Schedule, config: &Config) -> ValidationResult {
    let limit = config.max_concurrent_submissions;
    let load = daily_load(schedule);

    let mut violations = Vec::new();
    for (&day, &count) in &load {
        if count > limit {
            violations.push(Violation {
                submission_id: String::new(),
                description: format!(
                    "{day} has {count} active submissions (limit {limit})"
                ),
                severity: Severity::Medium,
                kind: ViolationKind::Resource {
                    date: day,
                    load: count,
                    limit,
                    excess: count - limit,
                },
            });
        }
    }

    let total = load.len();
    let compliant = total - violations.len();
    ValidationResult::from_parts(violations, total, compliant, "resource constraints")
}
