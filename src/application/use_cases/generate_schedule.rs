//! Generate Schedule use case module
//!
//! Runs a named strategy over a config, validates the result, and attaches
//! the analytics record. This is the single entry point the CLI calls.

use tracing::info;

use crate::application::schedulers::create_scheduler;
use crate::application::use_cases::AnalyzeSchedule;
use crate::application::validation::{validate_config, validate_schedule};
use crate::domain::entities::{Config, Schedule};
use crate::domain::errors::EngineError;
use crate::domain::value_objects::{ScheduleMetrics, ValidationResult};

/// One complete engine run: strategy, schedule, validation, metrics.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub strategy: String,
    pub schedule: Schedule,
    pub validation: ValidationResult,
    pub metrics: ScheduleMetrics,
}

/// Use case running a scheduling strategy end to end
pub struct GenerateSchedule {
    analyzer: AnalyzeSchedule,
}

impl GenerateSchedule {
    pub fn new() -> Self {
        Self {
            analyzer: AnalyzeSchedule::new(),
        }
    }

    /// Runs the strategy registered under `strategy_tag` against `config`.
    ///
    /// # Errors
    ///
    /// Configuration errors (including unknown tags and cycles) and
    /// feasibility failures propagate as `EngineError`.
    pub fn execute(
        &self,
        strategy_tag: &str,
        config: &Config,
    ) -> Result<GenerationResult, EngineError> {
        validate_config(config)?;
        let scheduler = create_scheduler(strategy_tag, config.clone())?;

        info!(strategy = strategy_tag, "running scheduler");
        let schedule = scheduler.schedule()?;
        info!(
            strategy = strategy_tag,
            scheduled = schedule.len(),
            makespan_days = schedule.makespan_days(),
            "schedule produced"
        );

        let validation = validate_schedule(&schedule, config);
        let metrics = self.analyzer.execute(&schedule, config);

        Ok(GenerationResult {
            strategy: strategy_tag.to_string(),
            schedule,
            validation,
            metrics,
        })
    }
}

impl Default for GenerateSchedule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, ConferenceType, Submission, SubmissionType,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn config() -> Config {
        let mut config = Config::default_config();
        config.scheduling_start_date = NaiveDate::from_ymd_opt(2026, 2, 2);
        let mut deadlines = BTreeMap::new();
        deadlines.insert(
            SubmissionType::Paper,
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        );
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        let mut sub = Submission::new("p1", "Paper", SubmissionType::Paper);
        sub.conference_id = Some("cts".into());
        sub.draft_window_months = 3;
        config.submissions = vec![sub];
        config
    }

    #[test]
    fn test_full_pipeline() {
        let result = GenerateSchedule::new().execute("greedy", &config()).unwrap();
        assert_eq!(result.strategy, "greedy");
        assert_eq!(result.schedule.len(), 1);
        assert!(result.validation.is_valid);
        assert_eq!(result.metrics.quality_score, 100.0);
        assert_eq!(result.metrics.penalty_breakdown.total_penalty, 0.0);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = GenerateSchedule::new()
            .execute("bogus", &config())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownStrategy(_)));
    }

    #[test]
    fn test_invalid_config_rejected_before_run() {
        let mut bad = config();
        bad.submissions[0].depends_on = vec!["ghost".into()];
        let err = GenerateSchedule::new().execute("greedy", &bad).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
