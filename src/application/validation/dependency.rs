//! Dependency satisfaction validation

use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{
    DependencyIssue, Severity, ValidationResult, Violation, ViolationKind,
};

/// Checks every `(dependency, dependent)` pair of the schedule: the
/// dependency must exist in the config, be scheduled, and finish no later
/// than the dependent starts.
pub fn validate_dependency_satisfaction(schedule: &Schedule, config: &Config) -> ValidationResult {
    let mut violations = Vec::new();
    let mut total = 0usize;
    let mut satisfied = 0usize;

    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };

        for dep_id in &submission.depends_on {
            total += 1;

            if !config.has_submission(dep_id) {
                violations.push(Violation {
                    submission_id: sid.clone(),
                    description: format!("dependency '{dep_id}' does not exist"),
                    severity: Severity::High,
                    kind: ViolationKind::Dependency {
                        dependency_id: dep_id.clone(),
                        issue: DependencyIssue::MissingDependency,
                    },
                });
                continue;
            }

            let Some(dep_interval) = schedule.get(dep_id) else {
                violations.push(Violation {
                    submission_id: sid.clone(),
                    description: format!("dependency '{dep_id}' is not scheduled"),
                    severity: Severity::High,
                    kind: ViolationKind::Dependency {
                        dependency_id: dep_id.clone(),
                        issue: DependencyIssue::InvalidDependency,
                    },
                });
                continue;
            };

            if dep_interval.end_date > interval.start_date {
                let days_violation = (dep_interval.end_date - interval.start_date).num_days();
                violations.push(Violation {
                    submission_id: sid.clone(),
                    description: format!(
                        "dependency '{dep_id}' ends {days_violation} days after '{sid}' starts"
                    ),
                    severity: Severity::Medium,
                    kind: ViolationKind::Dependency {
                        dependency_id: dep_id.clone(),
                        issue: DependencyIssue::TimingViolation { days_violation },
                    },
                });
            } else {
                satisfied += 1;
            }
        }
    }

    ValidationResult::from_parts(violations, total, satisfied, "dependency satisfaction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Interval, Submission, SubmissionType};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config_with_pair() -> Config {
        let mut config = Config::default_config();
        let a = Submission::new("a", "A", SubmissionType::Paper);
        let mut b = Submission::new("b", "B", SubmissionType::Paper);
        b.depends_on = vec!["a".into()];
        config.submissions = vec![a, b];
        config
    }

    #[test]
    fn test_satisfied_dependency() {
        let config = config_with_pair();
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        schedule.add_interval("b", Interval::with_duration(d(2026, 2, 1), 30));

        let result = validate_dependency_satisfaction(&schedule, &config);
        assert!(result.is_valid);
        assert_eq!(result.metadata.compliant, 1);
    }

    #[test]
    fn test_missing_vs_invalid_dependency() {
        let mut config = config_with_pair();
        config.submissions[1].depends_on = vec!["a".into(), "ghost".into()];
        let mut schedule = Schedule::new();
        // 'a' exists in config but is unscheduled; 'ghost' is not in config.
        schedule.add_interval("b", Interval::with_duration(d(2026, 2, 1), 30));

        let result = validate_dependency_satisfaction(&schedule, &config);
        assert_eq!(result.violations.len(), 2);
        let issues: Vec<_> = result
            .violations
            .iter()
            .map(|v| match &v.kind {
                ViolationKind::Dependency { issue, .. } => issue.clone(),
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();
        assert!(issues.contains(&DependencyIssue::InvalidDependency));
        assert!(issues.contains(&DependencyIssue::MissingDependency));
    }

    #[test]
    fn test_timing_violation_days() {
        let config = config_with_pair();
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        // b starts 10 days before a finishes
        schedule.add_interval("b", Interval::with_duration(d(2026, 1, 21), 30));

        let result = validate_dependency_satisfaction(&schedule, &config);
        assert_eq!(result.violations.len(), 1);
        assert!(matches!(
            &result.violations[0].kind,
            ViolationKind::Dependency {
                issue: DependencyIssue::TimingViolation { days_violation: 10 },
                ..
            }
        ));
    }
}
