//! Efficiency scoring
//!
//! Resource-utilization and timeline efficiency. Utilization is rewarded for
//! sitting near the optimal fraction of the concurrency cap; timelines are
//! compared against an ideal of 30 days per submission.

use serde::{Deserialize, Serialize};

use crate::application::validation::resources::daily_load;
use crate::domain::constants::{
    EFFICIENCY_RESOURCE_WEIGHT, EFFICIENCY_TIMELINE_WEIGHT, IDEAL_DAYS_PER_SUBMISSION, MAX_SCORE,
    MIN_SCORE, OPTIMAL_UTILIZATION_RATE, PERCENTAGE_MULTIPLIER,
    TIMELINE_EFFICIENCY_LONG_PENALTY, TIMELINE_EFFICIENCY_SHORT_PENALTY,
    UTILIZATION_DEVIATION_PENALTY,
};
use crate::domain::entities::{Config, Schedule};

/// Resource-utilization metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EfficiencyMetrics {
    /// Average load as a percentage of the concurrency cap.
    pub utilization_rate: f64,
    pub peak_utilization: u32,
    pub avg_utilization: f64,
    pub efficiency_score: f64,
}

/// Timeline span metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimelineMetrics {
    pub duration_days: i64,
    pub avg_daily_load: f64,
    pub timeline_efficiency: f64,
}

/// Combined efficiency score (0-100).
pub fn efficiency_score(schedule: &Schedule, config: &Config) -> f64 {
    if schedule.is_empty() {
        return MIN_SCORE;
    }

    let resource = resource_efficiency(schedule, config);
    let timeline = timeline_efficiency(schedule, config);

    let score = resource.efficiency_score * EFFICIENCY_RESOURCE_WEIGHT
        + timeline.timeline_efficiency * EFFICIENCY_TIMELINE_WEIGHT;
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Detailed resource efficiency: peaks and troughs both score below an
/// average daily load near the optimal fraction of the cap.
pub fn resource_efficiency(schedule: &Schedule, config: &Config) -> EfficiencyMetrics {
    let load = daily_load(schedule);
    if load.is_empty() {
        return EfficiencyMetrics::default();
    }

    let peak_utilization = load.values().copied().max().unwrap_or(0);
    let avg_utilization =
        load.values().map(|&v| v as f64).sum::<f64>() / load.len() as f64;
    let cap = config.max_concurrent_submissions;

    let (utilization_rate, efficiency_score) = if cap > 0 {
        let rate = avg_utilization / cap as f64 * PERCENTAGE_MULTIPLIER;
        let optimal = cap as f64 * OPTIMAL_UTILIZATION_RATE;
        let deviation = (avg_utilization - optimal).abs() / optimal;
        let score =
            (MAX_SCORE - deviation * UTILIZATION_DEVIATION_PENALTY).clamp(MIN_SCORE, MAX_SCORE);
        (rate, score)
    } else {
        (MIN_SCORE, MIN_SCORE)
    };

    EfficiencyMetrics {
        utilization_rate,
        peak_utilization,
        avg_utilization,
        efficiency_score,
    }
}

/// Timeline efficiency versus the ideal span of 30 days per submission;
/// running long is penalized harder than running short.
pub fn timeline_efficiency(schedule: &Schedule, config: &Config) -> TimelineMetrics {
    if schedule.is_empty() {
        return TimelineMetrics::default();
    }

    let duration_days = schedule.makespan_days().max(1);
    let avg_daily_load = schedule.len() as f64 / duration_days as f64;

    let total = config.submissions.len();
    let timeline_efficiency = if total > 0 {
        let ideal = (total as i64 * IDEAL_DAYS_PER_SUBMISSION) as f64;
        let ratio = duration_days as f64 / ideal;
        let raw = if ratio <= 1.0 {
            MAX_SCORE * (1.0 - (1.0 - ratio) * TIMELINE_EFFICIENCY_SHORT_PENALTY)
        } else {
            MAX_SCORE * (1.0 - (ratio - 1.0) * TIMELINE_EFFICIENCY_LONG_PENALTY)
        };
        raw.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MIN_SCORE
    };

    TimelineMetrics {
        duration_days,
        avg_daily_load,
        timeline_efficiency,
    }
}
