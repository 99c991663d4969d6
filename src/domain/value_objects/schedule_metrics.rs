//! Schedule metrics value object
//!
//! The single record the analytics aggregator produces: scoring outputs plus
//! additive schedule statistics. Holds the analyzed schedule so re-analyzing
//! it yields an identical record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::entities::schedule::Schedule;
use crate::domain::entities::submission::SubmissionType;
use crate::domain::value_objects::penalty_breakdown::PenaltyBreakdown;

/// Aggregated metrics for one schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleMetrics {
    /// The schedule these metrics describe.
    pub schedule: Schedule,
    pub penalty_breakdown: PenaltyBreakdown,
    pub quality_score: f64,
    pub efficiency_score: f64,
    /// Submissions in the config, scheduled or not.
    pub total_submissions: usize,
    pub scheduled_count: usize,
    /// Scheduled / total, in percent.
    pub completion_rate: f64,
    pub makespan_days: i64,
    pub avg_daily_load: f64,
    pub peak_daily_load: u32,
    pub type_counts: BTreeMap<SubmissionType, usize>,
    pub type_percentages: BTreeMap<SubmissionType, f64>,
    /// Scheduled starts per `YYYY-MM` month.
    pub monthly_distribution: BTreeMap<String, usize>,
    /// Scheduled starts per `YYYY-Qn` quarter.
    pub quarterly_distribution: BTreeMap<String, usize>,
    /// Scheduled starts per year.
    pub yearly_distribution: BTreeMap<String, usize>,
    /// Config submissions absent from the schedule, ID ascending.
    pub missing_submissions: Vec<String>,
}
