//! Analyze Schedule use case module
//!
//! The analytics aggregator: composes the penalty, quality, and efficiency
//! scorers (never re-implementing them) and adds the additive schedule
//! statistics into a single `ScheduleMetrics` record.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::application::scoring::{efficiency_score, penalty_score, quality_score};
use crate::application::validation::resources::daily_load;
use crate::domain::constants::PERCENTAGE_MULTIPLIER;
use crate::domain::entities::{Config, Schedule, SubmissionType};
use crate::domain::value_objects::ScheduleMetrics;

/// Use case composing scoring outputs into schedule-level metrics
pub struct AnalyzeSchedule;

impl AnalyzeSchedule {
    pub fn new() -> Self {
        Self
    }

    /// Produces the metrics record for a schedule
    ///
    /// Re-analyzing the schedule held by the returned record yields an
    /// identical record.
    pub fn execute(&self, schedule: &Schedule, config: &Config) -> ScheduleMetrics {
        let penalty_breakdown = penalty_score(schedule, config);
        let quality = quality_score(schedule, config);
        let efficiency = efficiency_score(schedule, config);

        let total_submissions = config.submissions.len();
        let scheduled_count = schedule.len();
        let completion_rate = if total_submissions > 0 {
            scheduled_count as f64 / total_submissions as f64 * PERCENTAGE_MULTIPLIER
        } else {
            PERCENTAGE_MULTIPLIER
        };

        let load = daily_load(schedule);
        let peak_daily_load = load.values().copied().max().unwrap_or(0);
        let avg_daily_load = if load.is_empty() {
            0.0
        } else {
            load.values().map(|&v| v as f64).sum::<f64>() / load.len() as f64
        };

        let mut type_counts: BTreeMap<SubmissionType, usize> = BTreeMap::new();
        let mut monthly: BTreeMap<String, usize> = BTreeMap::new();
        let mut quarterly: BTreeMap<String, usize> = BTreeMap::new();
        let mut yearly: BTreeMap<String, usize> = BTreeMap::new();
        for (sid, interval) in schedule.iter() {
            if let Some(submission) = config.submission(sid) {
                *type_counts.entry(submission.kind).or_insert(0) += 1;
            }
            let start = interval.start_date;
            *monthly
                .entry(format!("{:04}-{:02}", start.year(), start.month()))
                .or_insert(0) += 1;
            *quarterly
                .entry(format!("{:04}-Q{}", start.year(), (start.month() - 1) / 3 + 1))
                .or_insert(0) += 1;
            *yearly.entry(format!("{:04}", start.year())).or_insert(0) += 1;
        }

        let type_percentages: BTreeMap<SubmissionType, f64> = type_counts
            .iter()
            .map(|(&kind, &count)| {
                let share = if scheduled_count > 0 {
                    count as f64 / scheduled_count as f64 * PERCENTAGE_MULTIPLIER
                } else {
                    0.0
                };
                (kind, share)
            })
            .collect();

        let mut missing_submissions: Vec<String> = config
            .submissions
            .iter()
            .filter(|sub| !schedule.contains(&sub.id))
            .map(|sub| sub.id.clone())
            .collect();
        missing_submissions.sort();

        ScheduleMetrics {
            schedule: schedule.clone(),
            penalty_breakdown,
            quality_score: quality,
            efficiency_score: efficiency,
            total_submissions,
            scheduled_count,
            completion_rate,
            makespan_days: schedule.makespan_days(),
            avg_daily_load,
            peak_daily_load,
            type_counts,
            type_percentages,
            monthly_distribution: monthly,
            quarterly_distribution: quarterly,
            yearly_distribution: yearly,
            missing_submissions,
        }
    }
}

impl Default for AnalyzeSchedule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Interval, Submission};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> (Schedule, Config) {
        let mut config = Config::default_config();
        config.submissions = vec![
            Submission::new("a", "A", SubmissionType::Paper),
            Submission::new("b", "B", SubmissionType::Abstract),
            Submission::new("c", "C", SubmissionType::Paper),
        ];
        let mut schedule = Schedule::new();
        schedule.add_interval("a", Interval::with_duration(d(2026, 1, 5), 90));
        schedule.add_interval("b", Interval::with_duration(d(2026, 4, 10), 14));
        (schedule, config)
    }

    #[test]
    fn test_counts_and_completion() {
        let (schedule, config) = sample();
        let metrics = AnalyzeSchedule::new().execute(&schedule, &config);
        assert_eq!(metrics.total_submissions, 3);
        assert_eq!(metrics.scheduled_count, 2);
        assert!((metrics.completion_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(metrics.missing_submissions, vec!["c".to_string()]);
        assert_eq!(metrics.type_counts[&SubmissionType::Paper], 1);
        assert_eq!(metrics.type_counts[&SubmissionType::Abstract], 1);
    }

    #[test]
    fn test_distributions() {
        let (schedule, config) = sample();
        let metrics = AnalyzeSchedule::new().execute(&schedule, &config);
        assert_eq!(metrics.monthly_distribution["2026-01"], 1);
        assert_eq!(metrics.monthly_distribution["2026-04"], 1);
        assert_eq!(metrics.quarterly_distribution["2026-Q1"], 1);
        assert_eq!(metrics.quarterly_distribution["2026-Q2"], 1);
        assert_eq!(metrics.yearly_distribution["2026"], 2);
    }

    #[test]
    fn test_analytics_idempotent() {
        let (schedule, config) = sample();
        let analyzer = AnalyzeSchedule::new();
        let first = analyzer.execute(&schedule, &config);
        let second = analyzer.execute(&first.schedule, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_schedule() {
        let config = Config::default_config();
        let metrics = AnalyzeSchedule::new().execute(&Schedule::new(), &config);
        assert_eq!(metrics.scheduled_count, 0);
        assert_eq!(metrics.makespan_days, 0);
        assert_eq!(metrics.completion_rate, 100.0);
    }
}
