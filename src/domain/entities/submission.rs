//! Submission entity module
//!
//! This module defines the core Submission entity which represents one
//! publishable artifact (paper, abstract, or poster) or one internal
//! engineering work item, with its dependencies and scheduling constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::domain::constants::{DAYS_PER_MONTH, POSTER_DURATION_DAYS};
use crate::domain::entities::config::Config;

/// The base type of a submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Paper,
    Abstract,
    Poster,
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionType::Paper => write!(f, "paper"),
            SubmissionType::Abstract => write!(f, "abstract"),
            SubmissionType::Poster => write!(f, "poster"),
        }
    }
}

/// Workflow patterns describing which submission kinds a venue accepts and
/// in what order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionWorkflow {
    AbstractOnly,
    PaperOnly,
    PosterOnly,
    /// Abstract first, then the paper to the same venue.
    AbstractThenPaper,
    /// Either an abstract or a paper, not both.
    AbstractOrPaper,
    AllTypes,
}

/// Represents one unit of schedulable work
///
/// A Submission is either an external artifact bound (or bindable) to a
/// conference, or an internal work item with no venue and no external
/// deadline. Dependencies reference other submissions by ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    /// Unique submission identifier
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Base submission type
    pub kind: SubmissionType,
    /// Free-form author tag used for priority grouping
    #[serde(default)]
    pub author: Option<String>,
    /// Target conference; None for internal work items
    #[serde(default)]
    pub conference_id: Option<String>,
    /// Submissions that must complete before this one may start
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Drafting duration in months; 0 falls back to config defaults
    #[serde(default)]
    pub draft_window_months: i64,
    /// Minimum days between a dependency's completion and this start
    #[serde(default)]
    pub lead_time_from_parents: i64,
    /// Soft "no earlier than" date; starts far past it are penalized
    #[serde(default)]
    pub earliest_start_date: Option<NaiveDate>,
    /// Ordered venue preferences when `conference_id` is not pinned
    #[serde(default)]
    pub preferred_conferences: Vec<String>,
    /// Ordered kind preferences when `kind` is not pinned
    #[serde(default)]
    pub preferred_kinds: Vec<SubmissionType>,
    /// The author's preferred workflow (a suggestion, not a requirement)
    #[serde(default)]
    pub preferred_workflow: Option<SubmissionWorkflow>,
    /// System-determined workflow for this submission
    #[serde(default)]
    pub submission_workflow: Option<SubmissionWorkflow>,
    /// Whether this is an engineering submission (controls venue compatibility)
    #[serde(default)]
    pub engineering: bool,
    /// Hard floor on start date: when upstream engineering work completes
    #[serde(default)]
    pub engineering_ready_date: Option<NaiveDate>,
    /// Buffer time in months before delay penalties accrue
    #[serde(default)]
    pub free_slack_months: Option<i64>,
    /// Per-day lateness cost; falls back to the config default
    #[serde(default)]
    pub penalty_cost_per_day: Option<f64>,
    /// Per-month slip cost
    #[serde(default)]
    pub penalty_cost_per_month: Option<f64>,
}

impl Submission {
    /// Creates a new Submission with minimal required fields
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for the submission
    /// * `title` - Human-readable title
    /// * `kind` - Base submission type
    ///
    /// # Returns
    ///
    /// A new Submission with default values for optional fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: SubmissionType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            author: None,
            conference_id: None,
            depends_on: Vec::new(),
            draft_window_months: 0,
            lead_time_from_parents: 0,
            earliest_start_date: None,
            preferred_conferences: Vec::new(),
            preferred_kinds: Vec::new(),
            preferred_workflow: None,
            submission_workflow: None,
            engineering: false,
            engineering_ready_date: None,
            free_slack_months: None,
            penalty_cost_per_day: None,
            penalty_cost_per_month: None,
        }
    }

    /// Checks if this submission is an internal work item (no venue).
    pub fn is_work_item(&self) -> bool {
        self.conference_id.is_none()
    }

    /// The kinds this submission could be submitted as, highest preference
    /// first. Falls back to the pinned `kind` when no preferences are set.
    pub fn candidate_kinds(&self) -> Vec<SubmissionType> {
        if self.preferred_kinds.is_empty() {
            vec![self.kind]
        } else {
            self.preferred_kinds.clone()
        }
    }

    /// Calculates the drafting duration in days for this submission
    ///
    /// Abstracts take the configured work-item duration; anything with an
    /// explicit draft window takes `months * 30`; posters fall back to the
    /// poster floor and papers to the larger of the paper lead-time floors.
    pub fn duration_days(&self, config: &Config) -> i64 {
        if self.kind == SubmissionType::Abstract {
            return config.work_item_duration_days;
        }
        if self.draft_window_months > 0 {
            return self.draft_window_months * DAYS_PER_MONTH;
        }
        if self.kind == SubmissionType::Poster {
            return POSTER_DURATION_DAYS;
        }
        config
            .min_paper_lead_time_days
            .max(config.default_paper_lead_time_months * DAYS_PER_MONTH)
    }

    /// Calculates the end date when started on `start_date` (half-open:
    /// the submission occupies `[start_date, end_date)`).
    pub fn end_date(&self, start_date: NaiveDate, config: &Config) -> NaiveDate {
        start_date + Duration::days(self.duration_days(config))
    }

    /// Calculates the ranking priority for this submission
    ///
    /// Type weights come from the config's priority weights (engineering
    /// paper > work item > paper > poster > abstract). When priority
    /// weighting is disabled every submission ranks equally.
    pub fn priority_score(&self, config: &Config) -> f64 {
        if !config.scheduling_options.enable_priority_weighting {
            return 1.0;
        }
        let weights = &config.priority_weights;
        match self.kind {
            SubmissionType::Abstract => weights.abstract_weight,
            SubmissionType::Poster => weights.poster,
            SubmissionType::Paper => {
                if self.conference_id.is_none() {
                    weights.work_item
                } else if self.engineering {
                    weights.engineering_paper
                } else {
                    weights.paper
                }
            }
        }
    }
}
