use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Utc};

use crate::application::use_cases::GenerationResult;
use crate::domain::entities::{Config, Schedule};

/// One scheduled submission in the canonical JSON output shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScheduleEntry {
    /// Projects a schedule into entry rows, ID ascending.
    pub fn from_schedule(schedule: &Schedule, config: &Config) -> Vec<ScheduleEntry> {
        schedule
            .iter()
            .map(|(sid, interval)| ScheduleEntry {
                id: sid.clone(),
                title: config
                    .submission(sid)
                    .map(|sub| sub.title.clone())
                    .unwrap_or_else(|| sid.clone()),
                start_date: interval.start_date,
                end_date: interval.end_date,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub strategy: String,
    pub generated_at: String,
    pub total_submissions: usize,
    pub scheduled_count: usize,
    pub completion_rate: f64,
    pub makespan_days: i64,
    pub total_penalty: f64,
    pub quality_score: f64,
    pub efficiency_score: f64,
    pub is_valid: bool,
    pub violation_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub summary: SummaryOutput,
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleReport {
    pub fn from_generation_result(result: &GenerationResult, config: &Config) -> Self {
        let summary = SummaryOutput {
            strategy: result.strategy.clone(),
            generated_at: Utc::now().format("%Y-%m-%d").to_string(),
            total_submissions: result.metrics.total_submissions,
            scheduled_count: result.metrics.scheduled_count,
            completion_rate: result.metrics.completion_rate,
            makespan_days: result.metrics.makespan_days,
            total_penalty: result.metrics.penalty_breakdown.total_penalty,
            quality_score: result.metrics.quality_score,
            efficiency_score: result.metrics.efficiency_score,
            is_valid: result.validation.is_valid,
            violation_count: result.validation.violations.len(),
        };

        Self {
            summary,
            entries: ScheduleEntry::from_schedule(&result.schedule, config),
        }
    }
}
