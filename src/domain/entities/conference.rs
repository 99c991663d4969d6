//! Conference entity module
//!
//! A Conference is an external submission venue with per-kind deadlines and
//! a workflow describing which submission kinds it accepts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::entities::submission::{Submission, SubmissionType, SubmissionWorkflow};

/// Audience classification of a conference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConferenceType {
    Medical,
    Engineering,
}

impl fmt::Display for ConferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConferenceType::Medical => write!(f, "MEDICAL"),
            ConferenceType::Engineering => write!(f, "ENGINEERING"),
        }
    }
}

/// How often a conference recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConferenceRecurrence {
    Annual,
    Biennial,
    Quarterly,
}

/// Represents a conference with its deadlines and accepted submission kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conference {
    /// Unique conference identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Medical or engineering audience
    pub conf_type: ConferenceType,
    /// Recurrence pattern
    pub recurrence: ConferenceRecurrence,
    /// Deadline per submission kind
    pub deadlines: BTreeMap<SubmissionType, NaiveDate>,
    /// Accepted kinds and ordering; inferred from deadlines when absent
    #[serde(default)]
    pub submission_workflow: Option<SubmissionWorkflow>,
    /// Cap on submissions per author, when the venue imposes one
    #[serde(default)]
    pub max_submissions_per_author: Option<u32>,
}

impl Conference {
    /// Creates a new Conference
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `name` - Display name
    /// * `conf_type` - Medical or engineering
    /// * `recurrence` - Recurrence pattern
    /// * `deadlines` - Deadline per accepted submission kind
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        conf_type: ConferenceType,
        recurrence: ConferenceRecurrence,
        deadlines: BTreeMap<SubmissionType, NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            conf_type,
            recurrence,
            deadlines,
            submission_workflow: None,
            max_submissions_per_author: None,
        }
    }

    /// The workflow in effect: the explicit one when set, otherwise inferred
    /// from which deadline kinds are present.
    pub fn effective_workflow(&self) -> SubmissionWorkflow {
        self.submission_workflow
            .unwrap_or_else(|| self.infer_workflow())
    }

    /// Infers the workflow from the present deadline keys (the acceptance
    /// table read backwards).
    fn infer_workflow(&self) -> SubmissionWorkflow {
        let has_abstract = self.deadlines.contains_key(&SubmissionType::Abstract);
        let has_paper = self.deadlines.contains_key(&SubmissionType::Paper);
        let has_poster = self.deadlines.contains_key(&SubmissionType::Poster);

        match (has_abstract, has_paper, has_poster) {
            (true, true, true) => SubmissionWorkflow::AllTypes,
            (true, true, false) => SubmissionWorkflow::AbstractOrPaper,
            (true, false, _) => SubmissionWorkflow::AbstractOnly,
            (false, true, _) => SubmissionWorkflow::PaperOnly,
            (false, false, true) => SubmissionWorkflow::PosterOnly,
            (false, false, false) => SubmissionWorkflow::AbstractOrPaper,
        }
    }

    /// Checks whether this conference accepts the given submission kind.
    pub fn accepts(&self, kind: SubmissionType) -> bool {
        match self.effective_workflow() {
            SubmissionWorkflow::AllTypes => true,
            SubmissionWorkflow::AbstractOnly => kind == SubmissionType::Abstract,
            SubmissionWorkflow::PaperOnly => kind == SubmissionType::Paper,
            SubmissionWorkflow::PosterOnly => kind == SubmissionType::Poster,
            SubmissionWorkflow::AbstractThenPaper | SubmissionWorkflow::AbstractOrPaper => {
                matches!(kind, SubmissionType::Abstract | SubmissionType::Paper)
            }
        }
    }

    /// Checks whether a paper here must be preceded by an abstract.
    pub fn requires_abstract_before_paper(&self) -> bool {
        self.effective_workflow() == SubmissionWorkflow::AbstractThenPaper
    }

    /// Checks whether a submission could legitimately target this venue
    ///
    /// At least one of the submission's candidate kinds must be accepted,
    /// and medical submissions never target engineering venues.
    pub fn is_compatible_with(&self, submission: &Submission) -> bool {
        if !submission
            .candidate_kinds()
            .iter()
            .any(|kind| self.accepts(*kind))
        {
            return false;
        }
        submission.engineering || self.conf_type != ConferenceType::Engineering
    }

    /// Gets the deadline for a submission kind, when one exists.
    pub fn deadline(&self, kind: SubmissionType) -> Option<NaiveDate> {
        self.deadlines.get(&kind).copied()
    }

    /// Checks whether a deadline exists for the given kind.
    pub fn has_deadline(&self, kind: SubmissionType) -> bool {
        self.deadlines.contains_key(&kind)
    }
}
