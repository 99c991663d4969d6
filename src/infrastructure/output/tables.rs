//! Table generators module
//!
//! Pure tabular projections over `Schedule x Config`: the schedule table,
//! the deadline-margin table, the violations table, the metrics summary
//! table, and the penalties table. These rows feed the CSV and JSON
//! serializers unchanged; dates are formatted `YYYY-MM-DD`.

use serde::Serialize;

use crate::application::scoring::{quality_balance, quality_robustness};
use crate::domain::calendar;
use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{
    DependencyIssue, PenaltyBreakdown, ScheduleMetrics, ValidationResult, ViolationKind,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const INTERNAL_LABEL: &str = "Internal";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleRow {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
    pub conference: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeadlineRow {
    pub submission: String,
    pub conference: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub deadline: String,
    pub end_date: String,
    pub status: String,
    pub margin: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViolationRow {
    #[serde(rename = "type")]
    pub violation_type: String,
    pub submission: String,
    pub description: String,
    pub severity: String,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricRow {
    pub metric: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PenaltyRow {
    pub penalty_type: String,
    pub amount: f64,
}

/// One row per scheduled submission, start date ascending.
pub fn schedule_table(schedule: &Schedule, config: &Config) -> Vec<ScheduleRow> {
    let mut rows: Vec<ScheduleRow> = schedule
        .iter()
        .map(|(sid, interval)| {
            let submission = config.submission(sid);
            let kind = submission
                .map(|sub| sub.kind.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let conference = submission
                .map(|sub| config.conference_name(sub.conference_id.as_deref(), INTERNAL_LABEL))
                .unwrap_or_else(|| INTERNAL_LABEL.to_string());
            let status = match submission.and_then(|sub| config.deadline_for(sub)) {
                Some(deadline) if interval.end_date > deadline => "Late".to_string(),
                Some(_) => "On Time".to_string(),
                None => "Scheduled".to_string(),
            };
            ScheduleRow {
                id: sid.clone(),
                title: submission
                    .map(|sub| sub.title.clone())
                    .unwrap_or_else(|| sid.clone()),
                kind,
                start_date: interval.start_date.format(DATE_FORMAT).to_string(),
                end_date: interval.end_date.format(DATE_FORMAT).to_string(),
                duration: interval.duration_days(),
                conference,
                status,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
    rows
}

/// One row per scheduled submission with a resolved deadline.
pub fn deadline_table(schedule: &Schedule, config: &Config) -> Vec<DeadlineRow> {
    let mut rows = Vec::new();
    for (sid, interval) in schedule.iter() {
        let Some(submission) = config.submission(sid) else {
            continue;
        };
        let Some(deadline) = config.deadline_for(submission) else {
            continue;
        };
        let margin = calendar::duration_between(interval.end_date, deadline);
        rows.push(DeadlineRow {
            submission: sid.clone(),
            conference: config.conference_name(submission.conference_id.as_deref(), INTERNAL_LABEL),
            kind: submission.kind.to_string(),
            deadline: deadline.format(DATE_FORMAT).to_string(),
            end_date: interval.end_date.format(DATE_FORMAT).to_string(),
            status: if margin >= 0 { "OnTime" } else { "Late" }.to_string(),
            margin,
        });
    }
    rows.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.submission.cmp(&b.submission)));
    rows
}

/// Flat enumeration of every violation record.
pub fn violations_table(validation: &ValidationResult) -> Vec<ViolationRow> {
    validation
        .violations
        .iter()
        .map(|violation| {
            let impact = match &violation.kind {
                ViolationKind::Deadline { days_late } => format!("{days_late} days late"),
                ViolationKind::Dependency { issue, .. } => match issue {
                    DependencyIssue::TimingViolation { days_violation } => {
                        format!("{days_violation} days overlap")
                    }
                    DependencyIssue::MissingDependency => "missing dependency".to_string(),
                    DependencyIssue::InvalidDependency => "unscheduled dependency".to_string(),
                },
                ViolationKind::Resource { excess, .. } => format!("{excess} over capacity"),
                ViolationKind::Venue { conference_id } => format!("venue {conference_id}"),
                ViolationKind::SingleConference { conference_id } => {
                    format!("venue {conference_id}")
                }
                ViolationKind::Blackout { date } => format!("blackout {date}"),
            };
            ViolationRow {
                violation_type: violation.kind.label().to_string(),
                submission: violation.submission_id.clone(),
                description: violation.description.clone(),
                severity: violation.severity.to_string(),
                impact,
            }
        })
        .collect()
}

/// One label/value/description row per scoring output.
pub fn metrics_table(metrics: &ScheduleMetrics, config: &Config) -> Vec<MetricRow> {
    let row = |metric: &str, value: String, description: &str| MetricRow {
        metric: metric.to_string(),
        value,
        description: description.to_string(),
    };
    vec![
        row(
            "total_penalty",
            format!("{:.2}", metrics.penalty_breakdown.total_penalty),
            "Total penalty across all components",
        ),
        row(
            "quality_score",
            format!("{:.1}", metrics.quality_score),
            "Constraint-compliance quality (0-100)",
        ),
        row(
            "efficiency_score",
            format!("{:.1}", metrics.efficiency_score),
            "Resource and timeline efficiency (0-100)",
        ),
        row(
            "robustness",
            format!("{:.1}", quality_robustness(&metrics.schedule, config)),
            "Average slack between consecutive submissions (0-100)",
        ),
        row(
            "balance",
            format!("{:.1}", quality_balance(&metrics.schedule, config)),
            "Evenness of the daily workload (0-100)",
        ),
        row(
            "completion_rate",
            format!("{:.1}", metrics.completion_rate),
            "Scheduled submissions as a share of all submissions",
        ),
        row(
            "scheduled_count",
            metrics.scheduled_count.to_string(),
            "Number of scheduled submissions",
        ),
        row(
            "makespan_days",
            metrics.makespan_days.to_string(),
            "Days between earliest start and latest end",
        ),
        row(
            "peak_daily_load",
            metrics.peak_daily_load.to_string(),
            "Highest number of simultaneously active submissions",
        ),
        row(
            "avg_daily_load",
            format!("{:.2}", metrics.avg_daily_load),
            "Average number of active submissions per occupied day",
        ),
    ]
}

/// One row per named penalty component plus the total.
pub fn penalties_table(breakdown: &PenaltyBreakdown) -> Vec<PenaltyRow> {
    let mut rows: Vec<PenaltyRow> = breakdown
        .components()
        .iter()
        .map(|(name, amount)| PenaltyRow {
            penalty_type: name.to_string(),
            amount: *amount,
        })
        .collect();
    rows.push(PenaltyRow {
        penalty_type: "total".to_string(),
        amount: breakdown.total_penalty,
    });
    rows
}
