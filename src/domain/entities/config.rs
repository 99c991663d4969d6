//! Configuration entity module
//!
//! The immutable Config container: submissions, conferences, policy knobs,
//! penalty costs, priority weights, and scheduling options. The engine never
//! mutates a Config after load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::domain::constants::{
    ABSTRACT_ADVANCE_DAYS, AUDIENCE_MISMATCH_PENALTY, BACKTRACK_LIMIT_DAYS,
    BLACKOUT_VIOLATION_PENALTY, CONFERENCE_RESPONSE_TIME_DAYS, DEFAULT_DEPENDENCY_VIOLATION_PENALTY,
    DEFAULT_FULL_YEAR_DEFERRAL_PENALTY, DEFAULT_MOD_PENALTY_PER_DAY, DEFAULT_MONTHLY_SLIP_PENALTY,
    DEFAULT_PAPER_LEAD_TIME_MONTHS, DEFAULT_PAPER_PENALTY_PER_DAY,
    DEFAULT_RESOURCE_VIOLATION_PENALTY, LEAD_TIME_PENALTY_PER_DAY, LOOKAHEAD_BONUS_INCREMENT,
    MAX_ALGORITHM_ITERATIONS, MAX_CONCURRENT_SUBMISSIONS, MILP_TIMEOUT_SECONDS,
    MIN_ABSTRACT_LEAD_TIME_DAYS, MIN_PAPER_LEAD_TIME_DAYS, MISSED_ABSTRACT_PENALTY,
    PRIORITY_ABSTRACT, PRIORITY_ENGINEERING_PAPER, PRIORITY_PAPER, PRIORITY_POSTER,
    PRIORITY_WORK_ITEM, RANDOMNESS_FACTOR, SINGLE_CONFERENCE_VIOLATION_PENALTY,
    SOFT_BLOCK_PENALTY_PER_DAY, TECHNICAL_AUDIENCE_LOSS_PENALTY, WORK_ITEM_DURATION_DAYS,
};
use crate::domain::entities::conference::Conference;
use crate::domain::entities::submission::{Submission, SubmissionType};

/// Named penalty costs used by the penalty scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PenaltyCosts {
    pub default_paper_penalty_per_day: f64,
    pub default_mod_penalty_per_day: f64,
    pub dependency_violation_penalty_per_day: f64,
    pub resource_violation_penalty: f64,
    pub monthly_slip_penalty: f64,
    pub full_year_deferral_penalty: f64,
    pub missed_abstract_penalty: f64,
    pub technical_audience_loss_penalty: f64,
    pub audience_mismatch_penalty: f64,
    pub blackout_violation_penalty: f64,
    pub soft_block_penalty_per_day: f64,
    pub single_conference_violation_penalty: f64,
    pub lead_time_penalty_per_day: f64,
}

impl Default for PenaltyCosts {
    fn default() -> Self {
        Self {
            default_paper_penalty_per_day: DEFAULT_PAPER_PENALTY_PER_DAY,
            default_mod_penalty_per_day: DEFAULT_MOD_PENALTY_PER_DAY,
            dependency_violation_penalty_per_day: DEFAULT_DEPENDENCY_VIOLATION_PENALTY,
            resource_violation_penalty: DEFAULT_RESOURCE_VIOLATION_PENALTY,
            monthly_slip_penalty: DEFAULT_MONTHLY_SLIP_PENALTY,
            full_year_deferral_penalty: DEFAULT_FULL_YEAR_DEFERRAL_PENALTY,
            missed_abstract_penalty: MISSED_ABSTRACT_PENALTY,
            technical_audience_loss_penalty: TECHNICAL_AUDIENCE_LOSS_PENALTY,
            audience_mismatch_penalty: AUDIENCE_MISMATCH_PENALTY,
            blackout_violation_penalty: BLACKOUT_VIOLATION_PENALTY,
            soft_block_penalty_per_day: SOFT_BLOCK_PENALTY_PER_DAY,
            single_conference_violation_penalty: SINGLE_CONFERENCE_VIOLATION_PENALTY,
            lead_time_penalty_per_day: LEAD_TIME_PENALTY_PER_DAY,
        }
    }
}

/// Type weights used when ranking ready submissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PriorityWeights {
    pub engineering_paper: f64,
    #[serde(rename = "mod")]
    pub work_item: f64,
    pub paper: f64,
    pub poster: f64,
    #[serde(rename = "abstract")]
    pub abstract_weight: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            engineering_paper: PRIORITY_ENGINEERING_PAPER,
            work_item: PRIORITY_WORK_ITEM,
            paper: PRIORITY_PAPER,
            poster: PRIORITY_POSTER,
            abstract_weight: PRIORITY_ABSTRACT,
        }
    }
}

/// Policy toggles and strategy knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulingOptions {
    /// Enforce weekends and blackout dates as non-working days.
    pub enable_blackout_periods: bool,
    /// Pre-place abstracts ahead of their deadlines before the main loop.
    pub enable_early_abstract_scheduling: bool,
    pub enable_working_days_only: bool,
    pub enable_priority_weighting: bool,
    pub enable_dependency_tracking: bool,
    pub enable_concurrency_control: bool,
    /// How many days before its deadline an abstract is pre-placed.
    pub abstract_advance_days: i64,
    /// Fixed seed for the stochastic strategy; fresh OS seed when absent.
    pub random_seed: Option<u64>,
    /// Wall-clock budget for the optimal strategy.
    pub milp_timeout_seconds: u64,
    /// Hard ceiling on backtracking search iterations.
    pub max_algorithm_iterations: u64,
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            enable_blackout_periods: false,
            enable_early_abstract_scheduling: false,
            enable_working_days_only: false,
            enable_priority_weighting: true,
            enable_dependency_tracking: true,
            enable_concurrency_control: true,
            abstract_advance_days: ABSTRACT_ADVANCE_DAYS,
            random_seed: None,
            milp_timeout_seconds: MILP_TIMEOUT_SECONDS,
            max_algorithm_iterations: MAX_ALGORITHM_ITERATIONS,
        }
    }
}

/// The immutable engine configuration
///
/// Owns all submissions and conferences; schedulers reference them by
/// identifier only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub submissions: Vec<Submission>,
    pub conferences: Vec<Conference>,
    pub min_abstract_lead_time_days: i64,
    pub min_paper_lead_time_days: i64,
    pub max_concurrent_submissions: u32,
    #[serde(default = "default_paper_lead_months")]
    pub default_paper_lead_time_months: i64,
    #[serde(default = "default_work_item_days")]
    pub work_item_duration_days: i64,
    #[serde(default = "default_response_days")]
    pub conference_response_time_days: i64,
    #[serde(default = "default_backtrack_days")]
    pub max_backtrack_days: i64,
    #[serde(default = "default_randomness")]
    pub randomness_factor: f64,
    #[serde(default = "default_lookahead_bonus")]
    pub lookahead_bonus_increment: f64,
    #[serde(default)]
    pub penalty_costs: PenaltyCosts,
    #[serde(default)]
    pub priority_weights: PriorityWeights,
    #[serde(default)]
    pub scheduling_options: SchedulingOptions,
    #[serde(default)]
    pub blackout_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub data_files: Option<BTreeMap<String, String>>,
    /// When scheduling should begin; defaults to today.
    #[serde(default)]
    pub scheduling_start_date: Option<NaiveDate>,
}

fn default_paper_lead_months() -> i64 {
    DEFAULT_PAPER_LEAD_TIME_MONTHS
}

fn default_work_item_days() -> i64 {
    WORK_ITEM_DURATION_DAYS
}

fn default_response_days() -> i64 {
    CONFERENCE_RESPONSE_TIME_DAYS
}

fn default_backtrack_days() -> i64 {
    BACKTRACK_LIMIT_DAYS
}

fn default_randomness() -> f64 {
    RANDOMNESS_FACTOR
}

fn default_lookahead_bonus() -> f64 {
    LOOKAHEAD_BONUS_INCREMENT
}

impl Config {
    /// Creates a default configuration with no submissions or conferences.
    pub fn default_config() -> Self {
        Self {
            submissions: Vec::new(),
            conferences: Vec::new(),
            min_abstract_lead_time_days: MIN_ABSTRACT_LEAD_TIME_DAYS,
            min_paper_lead_time_days: MIN_PAPER_LEAD_TIME_DAYS,
            max_concurrent_submissions: MAX_CONCURRENT_SUBMISSIONS,
            default_paper_lead_time_months: DEFAULT_PAPER_LEAD_TIME_MONTHS,
            work_item_duration_days: WORK_ITEM_DURATION_DAYS,
            conference_response_time_days: CONFERENCE_RESPONSE_TIME_DAYS,
            max_backtrack_days: BACKTRACK_LIMIT_DAYS,
            randomness_factor: RANDOMNESS_FACTOR,
            lookahead_bonus_increment: LOOKAHEAD_BONUS_INCREMENT,
            penalty_costs: PenaltyCosts::default(),
            priority_weights: PriorityWeights::default(),
            scheduling_options: SchedulingOptions::default(),
            blackout_dates: Vec::new(),
            data_files: None,
            scheduling_start_date: None,
        }
    }

    /// Gets a submission by ID.
    pub fn submission(&self, submission_id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == submission_id)
    }

    /// Gets a conference by ID.
    pub fn conference(&self, conference_id: &str) -> Option<&Conference> {
        self.conferences.iter().find(|c| c.id == conference_id)
    }

    pub fn has_submission(&self, submission_id: &str) -> bool {
        self.submission(submission_id).is_some()
    }

    pub fn has_conference(&self, conference_id: &str) -> bool {
        self.conference(conference_id).is_some()
    }

    /// Safely gets a conference display name, with a fallback label for
    /// internal work items and dangling references.
    pub fn conference_name(&self, conference_id: Option<&str>, default: &str) -> String {
        conference_id
            .and_then(|id| self.conference(id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolved deadline for a submission's kind at its conference, when
    /// both exist.
    pub fn deadline_for(&self, submission: &Submission) -> Option<NaiveDate> {
        let conference_id = submission.conference_id.as_deref()?;
        self.conference(conference_id)?.deadline(submission.kind)
    }

    /// Resolved deadline for a given kind at a conference.
    pub fn deadline_for_kind(
        &self,
        conference_id: Option<&str>,
        kind: SubmissionType,
    ) -> Option<NaiveDate> {
        self.conference(conference_id?)?.deadline(kind)
    }

    /// The date scheduling begins: the explicit start date when set,
    /// otherwise the earliest submission start preference, otherwise today.
    pub fn effective_start_date(&self) -> NaiveDate {
        if let Some(start) = self.scheduling_start_date {
            return start;
        }
        let today = chrono::Local::now().date_naive();
        self.submissions
            .iter()
            .map(|s| s.earliest_start_date.unwrap_or(today))
            .min()
            .unwrap_or(today)
    }

    /// The horizon a day-stepping scheduler may search up to: the latest
    /// relevant date plus twice the conference response buffer.
    pub fn window_end_date(&self) -> NaiveDate {
        let start = self.effective_start_date();
        let latest = self
            .conferences
            .iter()
            .flat_map(|c| c.deadlines.values().copied())
            .chain(
                self.submissions
                    .iter()
                    .filter_map(|s| s.earliest_start_date),
            )
            .max()
            .unwrap_or(start + Duration::days(365));
        latest.max(start) + Duration::days(2 * self.conference_response_time_days)
    }

    /// Whether blackout/weekend enforcement is active.
    pub fn blackouts_enabled(&self) -> bool {
        self.scheduling_options.enable_blackout_periods
    }
}
