//! Constraint violation value objects
//!
//! Violations are never raised as errors; validators return them as
//! structured records so callers can present or penalize them.

use serde::{Deserialize, Serialize};
use std::fmt;

use chrono::NaiveDate;

use crate::domain::constants::PERCENTAGE_MULTIPLIER;

/// How serious a violation is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Why a dependency check failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DependencyIssue {
    /// The dependency ID does not exist in the config.
    MissingDependency,
    /// The dependency exists in the config but is not scheduled.
    InvalidDependency,
    /// The dependency finishes after the dependent starts.
    TimingViolation { days_violation: i64 },
}

/// Typed payload of a violation, one variant per constraint category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ViolationKind {
    Deadline {
        days_late: i64,
    },
    Dependency {
        dependency_id: String,
        issue: DependencyIssue,
    },
    /// One record per over-capacity day; `excess` is that day's load minus
    /// the concurrency cap.
    Resource {
        date: NaiveDate,
        load: u32,
        limit: u32,
        excess: u32,
    },
    Venue {
        conference_id: String,
    },
    SingleConference {
        conference_id: String,
    },
    Blackout {
        date: NaiveDate,
    },
}

impl ViolationKind {
    /// Short label used in the violations table.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::Deadline { .. } => "deadline",
            ViolationKind::Dependency { .. } => "dependency",
            ViolationKind::Resource { .. } => "resource",
            ViolationKind::Venue { .. } => "venue",
            ViolationKind::SingleConference { .. } => "single_conference",
            ViolationKind::Blackout { .. } => "blackout",
        }
    }
}

/// A single constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    /// The offending submission; empty for schedule-level violations.
    pub submission_id: String,
    pub description: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// Compliance counts attached to a validation result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ValidationMetadata {
    pub total: usize,
    pub compliant: usize,
    /// Compliance rate in percent; 100 when there was nothing to check.
    pub rate: f64,
}

impl ValidationMetadata {
    pub fn from_counts(total: usize, compliant: usize) -> Self {
        let rate = if total > 0 {
            compliant as f64 / total as f64 * PERCENTAGE_MULTIPLIER
        } else {
            PERCENTAGE_MULTIPLIER
        };
        Self {
            total,
            compliant,
            rate,
        }
    }
}

/// Result of one constraint check (or the composite of all of them).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub summary: String,
    pub metadata: ValidationMetadata,
}

impl ValidationResult {
    /// Builds a result from violations and compliance counts, with the
    /// conventional `compliant/total (rate%)` summary.
    pub fn from_parts(violations: Vec<Violation>, total: usize, compliant: usize, label: &str) -> Self {
        let metadata = ValidationMetadata::from_counts(total, compliant);
        Self {
            is_valid: violations.is_empty(),
            summary: format!(
                "{}: {}/{} compliant ({:.1}%)",
                label, compliant, total, metadata.rate
            ),
            violations,
            metadata,
        }
    }

    /// A trivially valid result for checks with nothing to examine.
    pub fn empty(label: &str) -> Self {
        Self::from_parts(Vec::new(), 0, 0, label)
    }
}
