//! Venue compatibility and single-conference policy validation

use std::collections::BTreeMap;

use crate::domain::entities::{
    Config, ConferenceType, Schedule, SubmissionType, SubmissionWorkflow,
};
use crate::domain::value_objects::{Severity, ValidationResult, Violation, ViolationKind};

/// Checks that each scheduled submission's venue accepts its kind and that
/// medical work never targets an engineering audience.
pub fn validate_venue_compatibility(schedule: &Schedule, config: &Config) -> ValidationResult {
    let mut violations = Vec::new();
    let mut total = 0usize;
    let mut compatible = 0usize;

    for (sid, _) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        let Some(conference_id) = submission.conference_id.as_deref() else {
            continue;
        };

        total += 1;
        let Some(conference) = config.conference(conference_id) else {
            violations.push(Violation {
                submission_id: sid.clone(),
                description: format!("references unknown conference '{conference_id}'"),
                severity: Severity::High,
                kind: ViolationKind::Venue {
                    conference_id: conference_id.to_string(),
                },
            });
            continue;
        };

        if !conference.accepts(submission.kind) {
            violations.push(Violation {
                submission_id: sid.clone(),
                description: format!(
                    "{} not accepted by conference '{}' ({:?})",
                    submission.kind,
                    conference_id,
                    conference.effective_workflow()
                ),
                severity: Severity::High,
                kind: ViolationKind::Venue {
                    conference_id: conference_id.to_string(),
                },
            });
            continue;
        }

        if !submission.engineering && conference.conf_type == ConferenceType::Engineering {
            violations.push(Violation {
                submission_id: sid.clone(),
                description: format!(
                    "medical submission targets engineering venue '{conference_id}'"
                ),
                severity: Severity::Medium,
                kind: ViolationKind::Venue {
                    conference_id: conference_id.to_string(),
                },
            });
            continue;
        }

        compatible += 1;
    }

    ValidationResult::from_parts(violations, total, compatible, "venue compatibility")
}

/// Checks the single-conference policy: at most one submission per venue,
/// except the abstract+paper pair at `AbstractThenPaper` venues and the
/// abstract+poster pair at `AllTypes` venues.
pub fn validate_single_conference_policy(schedule: &Schedule, config: &Config) -> ValidationResult {
    let mut by_conference: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut total = 0usize;

    for (sid, _) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        if let Some(conference_id) = submission.conference_id.as_deref() {
            total += 1;
            by_conference.entry(conference_id).or_default().push(sid);
        }
    }

    let mut violations = Vec::new();
    let mut compliant = 0usize;

    for (conference_id, sids) in &by_conference {
        if sids.len() == 1 {
            compliant += 1;
            continue;
        }

        let kinds: Vec<SubmissionType> = sids
            .iter()
            .filter_map(|sid| config.submission(sid))
            .map(|sub| sub.kind)
            .collect();
        let workflow = config
            .conference(conference_id)
            .map(|conf| conf.effective_workflow());

        let allowed_pair = match workflow {
            Some(SubmissionWorkflow::AbstractThenPaper) => {
                is_pair(&kinds, SubmissionType::Abstract, SubmissionType::Paper)
            }
            Some(SubmissionWorkflow::AllTypes) => {
                is_pair(&kinds, SubmissionType::Abstract, SubmissionType::Paper)
                    || is_pair(&kinds, SubmissionType::Abstract, SubmissionType::Poster)
            }
            _ => false,
        };

        if allowed_pair {
            compliant += sids.len();
        } else {
            violations.push(Violation {
                submission_id: sids.join(", "),
                description: format!(
                    "multiple submissions to conference '{conference_id}'"
                ),
                severity: Severity::Medium,
                kind: ViolationKind::SingleConference {
                    conference_id: conference_id.to_string(),
                },
            });
        }
    }

    ValidationResult::from_parts(violations, total, compliant, "single-conference policy")
}

fn is_pair(kinds: &[SubmissionType], first: SubmissionType, second: SubmissionType) -> bool {
    kinds.len() == 2 && kinds.contains(&first) && kinds.contains(&second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, Interval, Submission,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap as Map;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scheduled(config: &mut Config, id: &str, kind: SubmissionType, conf: &str) -> Submission {
        let mut sub = Submission::new(id, id, kind);
        sub.conference_id = Some(conf.to_string());
        config.submissions.push(sub.clone());
        sub
    }

    fn conf_with_workflow(id: &str, workflow: SubmissionWorkflow) -> Conference {
        let mut deadlines = Map::new();
        deadlines.insert(SubmissionType::Abstract, d(2026, 9, 1));
        deadlines.insert(SubmissionType::Paper, d(2026, 10, 1));
        deadlines.insert(SubmissionType::Poster, d(2026, 10, 15));
        let mut conf = Conference::new(
            id,
            id.to_uppercase(),
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        );
        conf.submission_workflow = Some(workflow);
        conf
    }

    #[test]
    fn test_abstract_then_paper_pair_allowed() {
        let mut config = Config::default_config();
        config.conferences = vec![conf_with_workflow(
            "ats",
            SubmissionWorkflow::AbstractThenPaper,
        )];
        scheduled(&mut config, "a1", SubmissionType::Abstract, "ats");
        scheduled(&mut config, "p1", SubmissionType::Paper, "ats");
        let mut schedule = Schedule::new();
        schedule.add_interval("a1", Interval::with_duration(d(2026, 7, 1), 14));
        schedule.add_interval("p1", Interval::with_duration(d(2026, 8, 1), 30));

        let result = validate_single_conference_policy(&schedule, &config);
        assert!(result.is_valid);
    }

    #[test]
    fn test_abstract_poster_pair_allowed_at_all_types() {
        let mut config = Config::default_config();
        config.conferences = vec![conf_with_workflow("all", SubmissionWorkflow::AllTypes)];
        scheduled(&mut config, "a1", SubmissionType::Abstract, "all");
        scheduled(&mut config, "po1", SubmissionType::Poster, "all");
        let mut schedule = Schedule::new();
        schedule.add_interval("a1", Interval::with_duration(d(2026, 7, 1), 14));
        schedule.add_interval("po1", Interval::with_duration(d(2026, 8, 1), 30));

        let result = validate_single_conference_policy(&schedule, &config);
        assert!(result.is_valid);
    }

    #[test]
    fn test_two_papers_same_conference_violates() {
        let mut config = Config::default_config();
        config.conferences = vec![conf_with_workflow("ats", SubmissionWorkflow::AbstractOrPaper)];
        scheduled(&mut config, "p1", SubmissionType::Paper, "ats");
        scheduled(&mut config, "p2", SubmissionType::Paper, "ats");
        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 7, 1), 30));
        schedule.add_interval("p2", Interval::with_duration(d(2026, 8, 1), 30));

        let result = validate_single_conference_policy(&schedule, &config);
        assert!(!result.is_valid);
        assert!(matches!(
            &result.violations[0].kind,
            ViolationKind::SingleConference { conference_id } if conference_id == "ats"
        ));
    }

    #[test]
    fn test_kind_rejected_by_workflow() {
        let mut config = Config::default_config();
        config.conferences = vec![conf_with_workflow("po", SubmissionWorkflow::PosterOnly)];
        scheduled(&mut config, "p1", SubmissionType::Paper, "po");
        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 7, 1), 30));

        let result = validate_venue_compatibility(&schedule, &config);
        assert!(!result.is_valid);
    }
}
