//! Load-time configuration validation
//!
//! Invariant checks that make a Config unusable when broken: unresolved
//! dependencies, dangling or incompatible venue references, and circular
//! dependencies. Surfaced immediately to the caller; no partial engine run.

use crate::application::services::DependencyAnalyzer;
use crate::domain::entities::Config;
use crate::domain::errors::EngineError;

/// Validates referential integrity and acyclicity of a loaded config.
pub fn validate_config(config: &Config) -> Result<(), EngineError> {
    for submission in &config.submissions {
        for dep_id in &submission.depends_on {
            if !config.has_submission(dep_id) {
                return Err(EngineError::Config(format!(
                    "submission '{}' depends on unknown submission '{}'",
                    submission.id, dep_id
                )));
            }
        }

        if let Some(conference_id) = submission.conference_id.as_deref() {
            let Some(conference) = config.conference(conference_id) else {
                return Err(EngineError::Config(format!(
                    "submission '{}' references unknown conference '{}'",
                    submission.id, conference_id
                )));
            };
            if !conference.is_compatible_with(submission) {
                return Err(EngineError::Config(format!(
                    "submission '{}' is not compatible with conference '{}'",
                    submission.id, conference_id
                )));
            }
        }
    }

    let mut analyzer = DependencyAnalyzer::new();
    analyzer.build_graph(&config.submissions);
    analyzer.topological_order()?;

    Ok(())
}
