//! Deadline compliance validation

use crate::domain::constants::{DEADLINE_SEVERITY_HIGH_DAYS, DEADLINE_SEVERITY_MEDIUM_DAYS};
use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{Severity, ValidationResult, Violation, ViolationKind};

/// Checks every scheduled submission with a resolved conference deadline
/// against its interval end date.
pub fn validate_deadline_compliance(schedule: &Schedule, config: &Config) -> ValidationResult {
    let mut violations = Vec::new();
    let mut total = 0usize;
    let mut compliant = 0usize;

    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        let Some(deadline) = config.deadline_for(submission) else {
            continue;
        };

        total += 1;
        if interval.end_date <= deadline {
            compliant += 1;
        } else {
            let days_late = (interval.end_date - deadline).num_days();
            let severity = if days_late > DEADLINE_SEVERITY_HIGH_DAYS {
                Severity::High
            } else if days_late > DEADLINE_SEVERITY_MEDIUM_DAYS {
                Severity::Medium
            } else {
                Severity::Low
            };
            violations.push(Violation {
                submission_id: sid.clone(),
                description: format!("deadline missed by {days_late} days"),
                severity,
                kind: ViolationKind::Deadline { days_late },
            });
        }
    }

    ValidationResult::from_parts(violations, total, compliant, "deadline compliance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, ConferenceType, Interval, Submission, SubmissionType,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config_with_deadline(deadline: NaiveDate) -> Config {
        let mut config = Config::default_config();
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, deadline);
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        let mut sub = Submission::new("p1", "Paper", SubmissionType::Paper);
        sub.conference_id = Some("cts".into());
        config.submissions = vec![sub];
        config
    }

    #[test]
    fn test_on_time_submission_is_compliant() {
        let config = config_with_deadline(d(2026, 10, 1));
        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 6, 1), 90));

        let result = validate_deadline_compliance(&schedule, &config);
        assert!(result.is_valid);
        assert_eq!(result.metadata.rate, 100.0);
    }

    #[test]
    fn test_late_submission_reports_days_late_and_severity() {
        let config = config_with_deadline(d(2026, 6, 10));
        let mut schedule = Schedule::new();
        // Ends 2026-06-20, ten days late
        schedule.add_interval("p1", Interval::with_duration(d(2026, 3, 22), 90));

        let result = validate_deadline_compliance(&schedule, &config);
        assert!(!result.is_valid);
        assert_eq!(result.violations.len(), 1);
        let violation = &result.violations[0];
        assert_eq!(violation.severity, Severity::High);
        assert!(matches!(
            violation.kind,
            ViolationKind::Deadline { days_late: 10 }
        ));
    }

    #[test]
    fn test_submission_without_deadline_is_skipped() {
        let mut config = Config::default_config();
        config.submissions = vec![Submission::new("w1", "Work item", SubmissionType::Paper)];
        let mut schedule = Schedule::new();
        schedule.add_interval("w1", Interval::with_duration(d(2026, 6, 1), 30));

        let result = validate_deadline_compliance(&schedule, &config);
        assert!(result.is_valid);
        assert_eq!(result.metadata.total, 0);
    }
}
