//! Quality scoring
//!
//! Constraint-compliance quality (0-100) plus the robustness and balance
//! measures surfaced in the metrics table.

use crate::application::validation::resources::daily_load;
use crate::application::validation::{
    validate_deadline_compliance, validate_dependency_satisfaction, validate_resource_constraints,
};
use crate::domain::constants::{
    BALANCE_VARIANCE_FACTOR, MAX_SCORE, MIN_SCORE, QUALITY_DEADLINE_WEIGHT,
    QUALITY_DEPENDENCY_WEIGHT, QUALITY_RESOURCE_FALLBACK_SCORE, QUALITY_RESOURCE_WEIGHT,
    ROBUSTNESS_SCALE_FACTOR, SINGLE_SUBMISSION_BALANCE, SINGLE_SUBMISSION_ROBUSTNESS,
};
use crate::domain::entities::{Config, Schedule};

/// Overall quality score (0-100): the weighted combination of deadline
/// compliance, dependency satisfaction, and resource validity.
pub fn quality_score(schedule: &Schedule, config: &Config) -> f64 {
    if schedule.is_empty() {
        return MIN_SCORE;
    }

    let deadline = validate_deadline_compliance(schedule, config);
    let dependency = validate_dependency_satisfaction(schedule, config);
    let resources = validate_resource_constraints(schedule, config);

    let resource_score = if resources.is_valid {
        MAX_SCORE
    } else {
        QUALITY_RESOURCE_FALLBACK_SCORE
    };

    let score = deadline.metadata.rate * QUALITY_DEADLINE_WEIGHT
        + dependency.metadata.rate * QUALITY_DEPENDENCY_WEIGHT
        + resource_score * QUALITY_RESOURCE_WEIGHT;

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// How robust the schedule is to disruption: average slack between
/// consecutive submissions, scaled to 0-100.
pub fn quality_robustness(schedule: &Schedule, _config: &Config) -> f64 {
    if schedule.is_empty() {
        return MIN_SCORE;
    }
    if schedule.len() < 2 {
        return SINGLE_SUBMISSION_ROBUSTNESS;
    }

    let mut intervals: Vec<_> = schedule.iter().map(|(_, interval)| *interval).collect();
    intervals.sort_by_key(|interval| interval.start_date);

    let mut total_slack = 0i64;
    for pair in intervals.windows(2) {
        let gap = (pair[1].start_date - pair[0].end_date).num_days();
        if gap > 0 {
            total_slack += gap;
        }
    }

    let avg_slack = total_slack as f64 / (intervals.len() - 1) as f64;
    (avg_slack * ROBUSTNESS_SCALE_FACTOR).clamp(MIN_SCORE, MAX_SCORE)
}

/// How evenly the work is spread: low daily-load variance scores high.
pub fn quality_balance(schedule: &Schedule, _config: &Config) -> f64 {
    if schedule.is_empty() {
        return MIN_SCORE;
    }

    let load = daily_load(schedule);
    if load.is_empty() {
        return MIN_SCORE;
    }

    let values: Vec<f64> = load.values().map(|&v| v as f64).collect();
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    if avg == 0.0 {
        return SINGLE_SUBMISSION_BALANCE;
    }

    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    (MAX_SCORE - (variance / avg) * BALANCE_VARIANCE_FACTOR).clamp(MIN_SCORE, MAX_SCORE)
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

    #[test]
    fn test_empty_schedule_scores_zero() {
        let config = Config::default_config();
        assert_eq!(quality_score(&Schedule::new(), &config), 0.0);
    }

    #[test]
    fn test_fully_compliant_schedule_scores_one_hundred() {
        let mut config = Config::default_config();
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, d(2026, 10, 1));
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
        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 6, 1), 90));

        assert_eq!(quality_score(&schedule, &config), 100.0);
    }

    #[test]
    fn test_resource_violation_halves_resource_component() {
        let mut config = Config::default_config();
        config.max_concurrent_submissions = 1;
        config.submissions = vec![
            Submission::new("a", "A", SubmissionType::Paper),
            Submission::new("b", "B", SubmissionType::Paper),
        ];
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        schedule.add_interval("b", Interval::with_duration(d(2026, 1, 1), 30));

        // deadline and dependency rates stay 100; resource drops to 50
        let expected = 100.0 * QUALITY_DEADLINE_WEIGHT
            + 100.0 * QUALITY_DEPENDENCY_WEIGHT
            + QUALITY_RESOURCE_FALLBACK_SCORE * QUALITY_RESOURCE_WEIGHT;
        assert_eq!(quality_score(&schedule, &config), expected);
    }

    #[test]
    fn test_single_submission_robustness() {
        let config = Config::default_config();
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        assert_eq!(
            quality_robustness(&schedule, &config),
            SINGLE_SUBMISSION_ROBUSTNESS
        );
    }

    #[test]
    fn test_balance_prefers_even_load() {
        let config = Config::default_config();
        let mut even = Schedule::new();
        even.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        even.add_interval("b", Interval::with_duration(d(2026, 1, 1), 30));

        let mut spiky = Schedule::new();
        spiky.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        spiky.add_interval("b", Interval::with_duration(d(2026, 1, 30), 1));

        assert!(quality_balance(&even, &config) >= quality_balance(&spiky, &config));
    }
}
