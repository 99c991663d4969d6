use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::entities::{Config, Interval, Schedule};
use crate::presentation::dto::{ScheduleEntry, ScheduleReport};

pub struct JsonGenerator;

impl JsonGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Saves a schedule as the canonical `{id, title, start_date, end_date}`
    /// row sequence.
    pub fn save_schedule<P: AsRef<Path>>(
        &self,
        schedule: &Schedule,
        config: &Config,
        path: P,
    ) -> Result<()> {
        let entries = ScheduleEntry::from_schedule(schedule, config);
        let json = serde_json::to_string_pretty(&entries)?;
        let mut file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.as_ref().display()))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Loads a schedule saved by `save_schedule`. Round-tripping reconstructs
    /// an equal Schedule when the referenced config is identical.
    pub fn load_schedule<P: AsRef<Path>>(&self, path: P) -> Result<Schedule> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.as_ref().display()))?;
        let entries: Vec<ScheduleEntry> = serde_json::from_str(&contents)
            .context("failed to parse schedule JSON")?;

        let mut schedule = Schedule::new();
        for entry in entries {
            schedule.add_interval(entry.id, Interval::new(entry.start_date, entry.end_date));
        }
        Ok(schedule)
    }

    pub fn save_report<P: AsRef<Path>>(&self, report: &ScheduleReport, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.as_ref().display()))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn report_string(&self, report: &ScheduleReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

impl Default for JsonGenerator {
    fn default() -> Self {
        Self::new()
    }
}
