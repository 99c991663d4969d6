//! Named constants module
//!
//! Every tunable weight, rate, and default used by the scheduling engine
//! lives here so that swapping a value never requires touching the code
//! that consumes it.

// --- Scheduling defaults ---

/// Fixed month-to-day conversion factor used everywhere in the engine.
/// Deliberately not calendar-accurate.
pub const DAYS_PER_MONTH: i64 = 30;
/// Default duration of an abstract / internal work item.
pub const WORK_ITEM_DURATION_DAYS: i64 = 14;
/// Floor duration for posters without an explicit draft window.
pub const POSTER_DURATION_DAYS: i64 = 30;
pub const DEFAULT_PAPER_LEAD_TIME_MONTHS: i64 = 3;
pub const MIN_ABSTRACT_LEAD_TIME_DAYS: i64 = 30;
pub const MIN_PAPER_LEAD_TIME_DAYS: i64 = 90;
pub const MAX_CONCURRENT_SUBMISSIONS: u32 = 3;
/// Buffer past the latest deadline that the scheduling window extends to.
pub const CONFERENCE_RESPONSE_TIME_DAYS: i64 = 90;
pub const BACKTRACK_LIMIT_DAYS: i64 = 30;
pub const ABSTRACT_ADVANCE_DAYS: i64 = 30;
pub const LOOKAHEAD_WINDOW_DAYS: i64 = 30;
/// Number of top-ranked candidates the lookahead strategy simulates.
pub const LOOKAHEAD_CANDIDATES: usize = 3;
pub const RANDOMNESS_FACTOR: f64 = 0.1;
pub const LOOKAHEAD_BONUS_INCREMENT: f64 = 0.1;
pub const MAX_ALGORITHM_ITERATIONS: u64 = 10_000;
pub const MILP_TIMEOUT_SECONDS: u64 = 60;
/// Above this submission count the optimal strategy falls back to greedy.
pub const MILP_MAX_SUBMISSIONS: usize = 20;
/// Soft window around `earliest_start_date`; starts beyond it are penalized,
/// not rejected.
pub const EARLIEST_START_SOFT_WINDOW_DAYS: i64 = 60;

// --- Penalty defaults ---

pub const DEFAULT_PAPER_PENALTY_PER_DAY: f64 = 100.0;
pub const DEFAULT_MOD_PENALTY_PER_DAY: f64 = 50.0;
pub const DEFAULT_DEPENDENCY_VIOLATION_PENALTY: f64 = 200.0;
pub const DEFAULT_RESOURCE_VIOLATION_PENALTY: f64 = 150.0;
pub const DEFAULT_MONTHLY_SLIP_PENALTY: f64 = 500.0;
pub const DEFAULT_FULL_YEAR_DEFERRAL_PENALTY: f64 = 5000.0;
pub const MISSED_ABSTRACT_PENALTY: f64 = 1000.0;
pub const TECHNICAL_AUDIENCE_LOSS_PENALTY: f64 = 300.0;
pub const AUDIENCE_MISMATCH_PENALTY: f64 = 400.0;
pub const BLACKOUT_VIOLATION_PENALTY: f64 = 250.0;
pub const SOFT_BLOCK_PENALTY_PER_DAY: f64 = 10.0;
pub const SINGLE_CONFERENCE_VIOLATION_PENALTY: f64 = 350.0;
pub const LEAD_TIME_PENALTY_PER_DAY: f64 = 25.0;
/// Months of delay at which the one-shot full-year deferral penalty applies.
pub const FULL_YEAR_DEFERRAL_MONTHS: i64 = 12;

// --- Priority weight defaults ---

pub const PRIORITY_ENGINEERING_PAPER: f64 = 2.0;
pub const PRIORITY_WORK_ITEM: f64 = 1.5;
pub const PRIORITY_PAPER: f64 = 1.0;
pub const PRIORITY_POSTER: f64 = 0.8;
pub const PRIORITY_ABSTRACT: f64 = 0.5;

// --- Scoring ---

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;
pub const PERCENTAGE_MULTIPLIER: f64 = 100.0;
pub const QUALITY_DEADLINE_WEIGHT: f64 = 0.4;
pub const QUALITY_DEPENDENCY_WEIGHT: f64 = 0.3;
pub const QUALITY_RESOURCE_WEIGHT: f64 = 0.3;
/// Resource component score when the resource check fails.
pub const QUALITY_RESOURCE_FALLBACK_SCORE: f64 = 50.0;
pub const EFFICIENCY_RESOURCE_WEIGHT: f64 = 0.6;
pub const EFFICIENCY_TIMELINE_WEIGHT: f64 = 0.4;
/// Ideal average daily load as a fraction of the concurrency cap.
pub const OPTIMAL_UTILIZATION_RATE: f64 = 0.8;
pub const UTILIZATION_DEVIATION_PENALTY: f64 = 100.0;
pub const TIMELINE_EFFICIENCY_SHORT_PENALTY: f64 = 0.5;
pub const TIMELINE_EFFICIENCY_LONG_PENALTY: f64 = 1.0;
pub const IDEAL_DAYS_PER_SUBMISSION: i64 = 30;
pub const ROBUSTNESS_SCALE_FACTOR: f64 = 10.0;
pub const BALANCE_VARIANCE_FACTOR: f64 = 50.0;
pub const SINGLE_SUBMISSION_ROBUSTNESS: f64 = 100.0;
pub const SINGLE_SUBMISSION_BALANCE: f64 = 100.0;

// --- Deadline violation severity thresholds (days late) ---

pub const DEADLINE_SEVERITY_HIGH_DAYS: i64 = 7;
pub const DEADLINE_SEVERITY_MEDIUM_DAYS: i64 = 1;
