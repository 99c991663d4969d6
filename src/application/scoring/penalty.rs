//! Penalty scoring
//!
//! Computes the additive penalty decomposition for a schedule. Each
//! component is non-negative; the finalized breakdown's components sum to
//! the total exactly.

use chrono::Duration;

use crate::application::validation::resources::daily_load;
use crate::application::validation::venue::validate_single_conference_policy;
use crate::domain::calendar::months_between;
use crate::domain::constants::{EARLIEST_START_SOFT_WINDOW_DAYS, FULL_YEAR_DEFERRAL_MONTHS};
use crate::domain::entities::{
    Config, ConferenceType, Schedule, Submission, SubmissionType,
};
use crate::domain::value_objects::PenaltyBreakdown;

/// Calculates the full penalty breakdown for a schedule.
pub fn penalty_score(schedule: &Schedule, config: &Config) -> PenaltyBreakdown {
    if schedule.is_empty() {
        return PenaltyBreakdown::default();
    }

    PenaltyBreakdown {
        deadline_penalties: deadline_penalties(schedule, config),
        dependency_penalties: dependency_penalties(schedule, config),
        resource_penalties: resource_penalties(schedule, config),
        compatibility_penalties: compatibility_penalties(schedule, config),
        slack_penalties: slack_penalties(schedule, config),
        blackout_penalties: blackout_penalties(schedule, config),
        soft_block_penalties: soft_block_penalties(schedule, config),
        single_conference_penalties: single_conference_penalties(schedule, config),
        lead_time_penalties: lead_time_penalties(schedule, config),
        ..Default::default()
    }
    .finalize()
}

fn lateness_cost_per_day(submission: &Submission, config: &Config) -> f64 {
    submission.penalty_cost_per_day.unwrap_or_else(|| {
        if submission.is_work_item() {
            config.penalty_costs.default_mod_penalty_per_day
        } else {
            config.penalty_costs.default_paper_penalty_per_day
        }
    })
}

fn deadline_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let mut total = 0.0;
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        let Some(deadline) = config.deadline_for(submission) else {
            continue;
        };
        let days_late = (interval.end_date - deadline).num_days();
        if days_late > 0 {
            total += days_late as f64 * lateness_cost_per_day(submission, config);
        }
    }
    total
}

fn dependency_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let costs = &config.penalty_costs;
    let mut total = 0.0;
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        for dep_id in &submission.depends_on {
            match schedule.get(dep_id) {
                None => total += costs.monthly_slip_penalty,
                Some(dep_interval) => {
                    let days_violation =
                        (dep_interval.end_date - interval.start_date).num_days();
                    if days_violation > 0 {
                        total +=
                            days_violation as f64 * costs.dependency_violation_penalty_per_day;
                    }
                }
            }
        }
    }
    total
}

fn resource_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let limit = config.max_concurrent_submissions;
    daily_load(schedule)
        .values()
        .filter(|&&load| load > limit)
        .map(|&load| (load - limit) as f64 * config.penalty_costs.resource_violation_penalty)
        .sum()
}

/// Venue pairings that lose audience: an engineering paper routed to an
/// abstract-only medical venue, or a clinical paper to an engineering venue.
fn compatibility_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let costs = &config.penalty_costs;
    let mut total = 0.0;
    for (sid, _) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        if submission.kind != SubmissionType::Paper {
            continue;
        }
        let Some(conference) = submission
            .conference_id
            .as_deref()
            .and_then(|id| config.conference(id))
        else {
            continue;
        };

        if submission.engineering && conference.conf_type == ConferenceType::Medical {
            if !conference.has_deadline(SubmissionType::Paper) {
                total += costs.technical_audience_loss_penalty;
            }
        } else if !submission.engineering
            && conference.conf_type == ConferenceType::Engineering
        {
            total += costs.audience_mismatch_penalty;
        }
    }
    total
}

/// The slack-cost term: monthly-slip penalty on delay past the free slack,
/// a one-shot deferral penalty at a year or more, and the missed
/// abstract-only window penalty.
fn slack_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let costs = &config.penalty_costs;
    let mut total = 0.0;
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        if submission.kind != SubmissionType::Paper {
            continue;
        }

        if let Some(earliest) = submission.earliest_start_date {
            let slack = submission.free_slack_months.unwrap_or(0);
            let months_delay =
                (months_between(earliest, interval.start_date) - slack).max(0);
            let monthly = submission
                .penalty_cost_per_month
                .unwrap_or(costs.monthly_slip_penalty);
            total += monthly * months_delay as f64;
            if months_delay >= FULL_YEAR_DEFERRAL_MONTHS {
                total += costs.full_year_deferral_penalty;
            }
        }

        if missed_abstract_window(schedule, config, submission) {
            total += costs.missed_abstract_penalty;
        }
    }
    total
}

/// A paper at an abstract-first venue whose abstract deadline passed with no
/// abstract scheduled there.
fn missed_abstract_window(schedule: &Schedule, config: &Config, paper: &Submission) -> bool {
    let Some(conference_id) = paper.conference_id.as_deref() else {
        return false;
    };
    let Some(conference) = config.conference(conference_id) else {
        return false;
    };
    if !conference.requires_abstract_before_paper() {
        return false;
    }
    let Some(abstract_deadline) = conference.deadline(SubmissionType::Abstract) else {
        return false;
    };
    let Some(paper_interval) = schedule.get(&paper.id) else {
        return false;
    };
    if abstract_deadline >= paper_interval.start_date {
        return false;
    }

    !schedule.iter().any(|(sid, _)| {
        config
            .submission(sid)
            .map(|sub| {
                sub.kind == SubmissionType::Abstract
                    && sub.conference_id.as_deref() == Some(conference_id)
            })
            .unwrap_or(false)
    })
}

fn blackout_penalties(schedule: &Schedule, config: &Config) -> f64 {
    if !config.blackouts_enabled() || config.blackout_dates.is_empty() {
        return 0.0;
    }
    schedule
        .iter()
        .filter(|(_, interval)| {
            interval
                .days()
                .any(|day| config.blackout_dates.contains(&day))
        })
        .count() as f64
        * config.penalty_costs.blackout_violation_penalty
}

/// Starts outside the soft window around `earliest_start_date`.
fn soft_block_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let mut total = 0.0;
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        let Some(earliest) = submission.earliest_start_date else {
            continue;
        };
        let drift = (interval.start_date - earliest).num_days().abs();
        let excess = drift - EARLIEST_START_SOFT_WINDOW_DAYS;
        if excess > 0 {
            total += excess as f64 * config.penalty_costs.soft_block_penalty_per_day;
        }
    }
    total
}

fn single_conference_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let result = validate_single_conference_policy(schedule, config);
    result.violations.len() as f64 * config.penalty_costs.single_conference_violation_penalty
}

/// Lead-time shortfall: the dependency finished in time, but the gap to the
/// dependent's start is shorter than `lead_time_from_parents`.
fn lead_time_penalties(schedule: &Schedule, config: &Config) -> f64 {
    let costs = &config.penalty_costs;
    let mut total = 0.0;
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        if submission.lead_time_from_parents == 0 {
            continue;
        }
        for dep_id in &submission.depends_on {
            let Some(dep_interval) = schedule.get(dep_id) else {
                continue;
            };
            if dep_interval.end_date > interval.start_date {
                continue; // already a dependency violation
            }
            let required =
                dep_interval.end_date + Duration::days(submission.lead_time_from_parents);
            let shortfall = (required - interval.start_date).num_days();
            if shortfall > 0 {
                total += shortfall as f64 * costs.lead_time_penalty_per_day;
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, Interval, SubmissionWorkflow,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config_with_paper_deadline(deadline: NaiveDate) -> Config {
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
    fn test_empty_schedule_has_zero_penalty() {
        let config = Config::default_config();
        let breakdown = penalty_score(&Schedule::new(), &config);
        assert_eq!(breakdown.total_penalty, 0.0);
    }

    #[test]
    fn test_on_time_schedule_has_zero_penalty() {
        let config = config_with_paper_deadline(d(2026, 10, 1));
        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 6, 1), 90));
        let breakdown = penalty_score(&schedule, &config);
        assert_eq!(breakdown.total_penalty, 0.0);
    }

    #[test]
    fn test_late_paper_charged_per_day() {
        let config = config_with_paper_deadline(d(2026, 6, 10));
        let mut schedule = Schedule::new();
        // Ends 2026-06-20: ten days late
        schedule.add_interval("p1", Interval::with_duration(d(2026, 3, 22), 90));
        let breakdown = penalty_score(&schedule, &config);
        assert_eq!(
            breakdown.deadline_penalties,
            10.0 * config.penalty_costs.default_paper_penalty_per_day
        );
    }

    #[test]
    fn test_components_sum_to_total() {
        let mut config = config_with_paper_deadline(d(2026, 6, 10));
        config.max_concurrent_submissions = 1;
        let mut other = Submission::new("p2", "Other", SubmissionType::Paper);
        other.earliest_start_date = Some(d(2026, 1, 1));
        config.submissions.push(other);

        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 3, 22), 90));
        schedule.add_interval("p2", Interval::with_duration(d(2026, 6, 1), 90));
        let breakdown = penalty_score(&schedule, &config);
        let sum: f64 = breakdown.components().iter().map(|(_, v)| v).sum();
        assert!((sum - breakdown.total_penalty).abs() < 1e-9);
        assert!(breakdown.total_penalty > 0.0);
    }

    #[test]
    fn test_slack_penalty_uses_month_delay_and_free_slack() {
        let mut config = Config::default_config();
        let mut sub = Submission::new("p1", "Paper", SubmissionType::Paper);
        sub.earliest_start_date = Some(d(2026, 1, 1));
        sub.free_slack_months = Some(1);
        config.submissions = vec![sub];

        let mut schedule = Schedule::new();
        // Three months past earliest, one of which is free slack
        schedule.add_interval("p1", Interval::with_duration(d(2026, 4, 1), 90));
        let breakdown = penalty_score(&schedule, &config);
        assert_eq!(
            breakdown.slack_penalties,
            2.0 * config.penalty_costs.monthly_slip_penalty
        );
    }

    #[test]
    fn test_full_year_deferral_is_one_shot() {
        let mut config = Config::default_config();
        let mut sub = Submission::new("p1", "Paper", SubmissionType::Paper);
        sub.earliest_start_date = Some(d(2025, 1, 1));
        config.submissions = vec![sub];

        let mut schedule = Schedule::new();
        schedule.add_interval("p1", Interval::with_duration(d(2026, 2, 1), 90));
        let breakdown = penalty_score(&schedule, &config);
        let months = 13.0;
        assert_eq!(
            breakdown.slack_penalties,
            months * config.penalty_costs.monthly_slip_penalty
                + config.penalty_costs.full_year_deferral_penalty
        );
    }

    #[test]
    fn test_missed_abstract_window_penalized() {
        let mut config = Config::default_config();
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Abstract, d(2026, 3, 1));
        deadlines.insert(SubmissionType::Paper, d(2026, 12, 1));
        let mut conf = Conference::new(
            "ats",
            "ATS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        );
        conf.submission_workflow = Some(SubmissionWorkflow::AbstractThenPaper);
        config.conferences = vec![conf];
        let mut paper = Submission::new("p1", "Paper", SubmissionType::Paper);
        paper.conference_id = Some("ats".into());
        config.submissions = vec![paper];

        let mut schedule = Schedule::new();
        // Starts well after the abstract deadline with no abstract scheduled
        schedule.add_interval("p1", Interval::with_duration(d(2026, 6, 1), 90));
        let breakdown = penalty_score(&schedule, &config);
        assert_eq!(
            breakdown.slack_penalties,
            config.penalty_costs.missed_abstract_penalty
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_components_are_non_negative_and_sum_to_total(
                placements in proptest::collection::vec(
                    (0i64..400, 1i64..120, any::<bool>()),
                    1..8,
                )
            ) {
                let base = d(2026, 1, 1);
                let mut config = Config::default_config();
                config.max_concurrent_submissions = 2;
                let mut schedule = Schedule::new();
                for (i, (offset, duration, engineering)) in placements.iter().enumerate() {
                    let id = format!("s{i}");
                    let mut sub = Submission::new(id.clone(), id.clone(), SubmissionType::Paper);
                    sub.engineering = *engineering;
                    sub.earliest_start_date = Some(base);
                    if i > 0 {
                        sub.depends_on = vec![format!("s{}", i - 1)];
                        sub.lead_time_from_parents = 3;
                    }
                    config.submissions.push(sub);
                    schedule.add_interval(
                        id,
                        Interval::with_duration(base + Duration::days(*offset), *duration),
                    );
                }

                let breakdown = penalty_score(&schedule, &config);
                let sum: f64 = breakdown.components().iter().map(|(_, v)| v).sum();
                prop_assert!((sum - breakdown.total_penalty).abs() < 1e-6);
                for (name, amount) in breakdown.components() {
                    prop_assert!(amount >= 0.0, "{} went negative: {}", name, amount);
                }
            }
        }
    }

    #[test]
    fn test_lead_time_shortfall() {
        let mut config = Config::default_config();
        let a = Submission::new("a", "A", SubmissionType::Paper);
        let mut b = Submission::new("b", "B", SubmissionType::Paper);
        b.depends_on = vec!["a".into()];
        b.lead_time_from_parents = 10;
        config.submissions = vec![a, b];

        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 1), 30));
        // Starts 4 days after a ends; 6 days of lead time missing
        schedule.add_interval("b", Interval::with_duration(d(2026, 2, 4), 30));
        let breakdown = penalty_score(&schedule, &config);
        assert_eq!(
            breakdown.lead_time_penalties,
            6.0 * config.penalty_costs.lead_time_penalty_per_day
        );
        assert_eq!(breakdown.dependency_penalties, 0.0);
    }
}
