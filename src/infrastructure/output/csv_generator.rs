use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use csv::Writer;
use serde::Serialize;

use crate::domain::entities::{Config, Schedule};
use crate::domain::value_objects::{ScheduleMetrics, ValidationResult};
use crate::infrastructure::output::tables::{
    deadline_table, metrics_table, penalties_table, schedule_table, violations_table,
};

pub struct CsvGenerator;

impl CsvGenerator {
    pub fn new() -> Self {
        Self
    }

    fn write_rows<T: Serialize, P: AsRef<Path>>(&self, rows: &[T], path: P) -> Result<()> {
        let mut wtr = Writer::from_path(&path)
            .with_context(|| format!("failed to create {}", path.as_ref().display()))?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the five engine CSVs into `output_dir` and returns the paths
    /// keyed by file stem.
    pub fn generate_all<P: AsRef<Path>>(
        &self,
        schedule: &Schedule,
        config: &Config,
        metrics: &ScheduleMetrics,
        validation: &ValidationResult,
        output_dir: P,
    ) -> Result<BTreeMap<String, PathBuf>> {
        let dir = output_dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        let mut written = BTreeMap::new();
        let mut emit = |name: &str, path: PathBuf| {
            written.insert(name.to_string(), path);
        };

        let schedule_path = dir.join("schedule.csv");
        self.write_rows(&schedule_table(schedule, config), &schedule_path)?;
        emit("schedule", schedule_path);

        let metrics_path = dir.join("metrics.csv");
        self.write_rows(&metrics_table(metrics, config), &metrics_path)?;
        emit("metrics", metrics_path);

        let deadlines_path = dir.join("deadlines.csv");
        self.write_rows(&deadline_table(schedule, config), &deadlines_path)?;
        emit("deadlines", deadlines_path);

        let violations_path = dir.join("violations.csv");
        self.write_rows(&violations_table(validation), &violations_path)?;
        emit("violations", violations_path);

        let penalties_path = dir.join("penalties.csv");
        self.write_rows(&penalties_table(&metrics.penalty_breakdown), &penalties_path)?;
        emit("penalties", penalties_path);

        Ok(written)
    }

    /// Writes the strategy-comparison table produced by the compare command.
    pub fn generate_comparison<T: Serialize, P: AsRef<Path>>(
        &self,
        rows: &[T],
        output_dir: P,
    ) -> Result<PathBuf> {
        let dir = output_dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join("strategy_comparison.csv");
        self.write_rows(rows, &path)?;
        Ok(path)
    }
}

impl Default for CsvGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::AnalyzeSchedule;
    use crate::application::validation::validate_schedule;
    use crate::domain::entities::{Interval, Submission, SubmissionType};
    use chrono::NaiveDate;

    #[test]
    fn test_generate_all_writes_five_files() {
        let mut config = Config::default_config();
        config.submissions = vec![Submission::new("p1", "Paper", SubmissionType::Paper)];
        let mut schedule = Schedule::new();
        schedule.add_interval(
            "p1",
            Interval::with_duration(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), 90),
        );
        let metrics = AnalyzeSchedule::new().execute(&schedule, &config);
        let validation = validate_schedule(&schedule, &config);

        let dir = tempfile::tempdir().unwrap();
        let written = CsvGenerator::new()
            .generate_all(&schedule, &config, &metrics, &validation, dir.path())
            .unwrap();

        assert_eq!(written.len(), 5);
        for name in ["schedule", "metrics", "deadlines", "violations", "penalties"] {
            let path = &written[name];
            assert!(path.exists(), "{name} missing");
        }

        let contents = fs::read_to_string(&written["schedule"]).unwrap();
        assert!(contents.starts_with("id,title,type,start_date,end_date,duration,conference,status"));
        assert!(contents.contains("2026-06-01"));
    }
}
