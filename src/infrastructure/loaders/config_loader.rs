//! Configuration loader module
//!
//! Reads the master `config.json` and its child documents (conferences,
//! papers, mods) and maps them to the engine model: mods become chained
//! `modNN-wrk` engineering work items, papers become an optional abstract
//! plus a paper submission with an auto-linked dependency between them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Duration;

use crate::application::validation::validate_config;
use crate::domain::calendar::parse_iso_date;
use crate::domain::constants::DAYS_PER_MONTH;
use crate::domain::entities::{
    Conference, ConferenceRecurrence, ConferenceType, Config, PenaltyCosts, PriorityWeights,
    SchedulingOptions, Submission, SubmissionType,
};

#[derive(Debug, Deserialize)]
struct RawConfig {
    min_abstract_lead_time_days: i64,
    min_paper_lead_time_days: i64,
    max_concurrent_submissions: u32,
    data_files: BTreeMap<String, String>,
    #[serde(default)]
    default_paper_lead_time_months: Option<i64>,
    #[serde(default)]
    work_item_duration_days: Option<i64>,
    #[serde(default)]
    conference_response_time_days: Option<i64>,
    #[serde(default)]
    max_backtrack_days: Option<i64>,
    #[serde(default)]
    randomness_factor: Option<f64>,
    #[serde(default)]
    lookahead_bonus_increment: Option<f64>,
    #[serde(default)]
    default_mod_lead_time_days: Option<i64>,
    #[serde(default)]
    penalty_costs: Option<PenaltyCosts>,
    #[serde(default)]
    priority_weights: Option<PriorityWeights>,
    #[serde(default)]
    scheduling_options: Option<SchedulingOptions>,
    #[serde(default)]
    blackout_dates: Vec<String>,
    #[serde(default)]
    scheduling_start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConference {
    name: String,
    conference_type: ConferenceType,
    recurrence: ConferenceRecurrence,
    #[serde(default)]
    abstract_deadline: Option<String>,
    #[serde(default)]
    full_paper_deadline: Option<String>,
    #[serde(default)]
    poster_deadline: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMod {
    id: u32,
    title: String,
    est_data_ready: String,
    #[serde(default)]
    free_slack_months: Option<i64>,
    #[serde(default)]
    penalty_cost_per_month: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPaper {
    id: String,
    title: String,
    #[serde(default)]
    planned_conference: Option<String>,
    #[serde(default)]
    conference_families: Vec<String>,
    #[serde(default)]
    draft_window_months: Option<i64>,
    #[serde(default)]
    mod_dependencies: Vec<u32>,
    #[serde(default)]
    parent_papers: Vec<String>,
}

/// Loader for the JSON configuration documents
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads the master config and all child JSON files
    ///
    /// Data file paths are resolved relative to the config file's directory.
    /// The returned config has passed referential and cycle validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any file cannot be read or parsed
    /// - A required key is missing
    /// - A date is malformed
    /// - The loaded config fails validation (unresolved references, cycles)
    pub fn load<P: AsRef<Path>>(&self, config_path: P) -> Result<Config> {
        let config_path = config_path.as_ref();
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

        let raw: RawConfig = read_json(config_path)?;

        let conferences_file = raw
            .data_files
            .get("conferences")
            .context("config is missing data_files.conferences")?;
        let papers_file = raw
            .data_files
            .get("papers")
            .context("config is missing data_files.papers")?;
        let mods_file = raw
            .data_files
            .get("mods")
            .context("config is missing data_files.mods")?;

        let conferences = load_conferences(&base_dir.join(conferences_file))?;

        let mut submissions = load_mods(
            &base_dir.join(mods_file),
            raw.default_mod_lead_time_days.unwrap_or(0),
        )?;
        submissions.extend(load_papers(
            &base_dir.join(papers_file),
            &conferences,
            raw.default_paper_lead_time_months,
            raw.min_paper_lead_time_days,
            raw.default_mod_lead_time_days.unwrap_or(0),
        )?);

        let blackout_dates = raw
            .blackout_dates
            .iter()
            .map(|value| parse_iso_date(value).map_err(anyhow::Error::from))
            .collect::<Result<Vec<_>>>()?;

        let defaults = Config::default_config();
        let config = Config {
            submissions,
            conferences,
            min_abstract_lead_time_days: raw.min_abstract_lead_time_days,
            min_paper_lead_time_days: raw.min_paper_lead_time_days,
            max_concurrent_submissions: raw.max_concurrent_submissions,
            default_paper_lead_time_months: raw
                .default_paper_lead_time_months
                .unwrap_or(defaults.default_paper_lead_time_months),
            work_item_duration_days: raw
                .work_item_duration_days
                .unwrap_or(defaults.work_item_duration_days),
            conference_response_time_days: raw
                .conference_response_time_days
                .unwrap_or(defaults.conference_response_time_days),
            max_backtrack_days: raw.max_backtrack_days.unwrap_or(defaults.max_backtrack_days),
            randomness_factor: raw.randomness_factor.unwrap_or(defaults.randomness_factor),
            lookahead_bonus_increment: raw
                .lookahead_bonus_increment
                .unwrap_or(defaults.lookahead_bonus_increment),
            penalty_costs: raw.penalty_costs.unwrap_or_default(),
            priority_weights: raw.priority_weights.unwrap_or_default(),
            scheduling_options: raw.scheduling_options.unwrap_or_default(),
            blackout_dates,
            data_files: Some(raw.data_files),
            scheduling_start_date: raw
                .scheduling_start_date
                .as_deref()
                .map(parse_iso_date)
                .transpose()?,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_conferences(path: &Path) -> Result<Vec<Conference>> {
    let raw: Vec<RawConference> = read_json(path)?;

    let mut conferences = Vec::with_capacity(raw.len());
    for entry in raw {
        let mut deadlines = BTreeMap::new();
        if let Some(value) = &entry.abstract_deadline {
            deadlines.insert(SubmissionType::Abstract, parse_iso_date(value)?);
        }
        if let Some(value) = &entry.full_paper_deadline {
            deadlines.insert(SubmissionType::Paper, parse_iso_date(value)?);
        }
        if let Some(value) = &entry.poster_deadline {
            deadlines.insert(SubmissionType::Poster, parse_iso_date(value)?);
        }

        conferences.push(Conference::new(
            entry.name.clone(),
            entry.name,
            entry.conference_type,
            entry.recurrence,
            deadlines,
        ));
    }
    Ok(conferences)
}

/// Mods become chained engineering work items: `modNN-wrk` depends on the
/// previous mod.
fn load_mods(path: &Path, slack_days: i64) -> Result<Vec<Submission>> {
    let raw: Vec<RawMod> = read_json(path)?;

    let mut submissions = Vec::with_capacity(raw.len());
    for entry in raw {
        let ready = parse_iso_date(&entry.est_data_ready)?;
        let mut submission = Submission::new(
            format!("mod{:02}-wrk", entry.id),
            entry.title,
            SubmissionType::Paper,
        );
        submission.engineering = true;
        submission.earliest_start_date = Some(ready);
        submission.engineering_ready_date = Some(ready);
        submission.free_slack_months = entry.free_slack_months;
        submission.penalty_cost_per_month = entry.penalty_cost_per_month;
        submission.penalty_cost_per_day = entry
            .penalty_cost_per_month
            .map(|monthly| monthly / DAYS_PER_MONTH as f64);
        submission.lead_time_from_parents = slack_days;
        if entry.id > 1 {
            submission.depends_on = vec![format!("mod{:02}-wrk", entry.id - 1)];
        }
        submissions.push(submission);
    }
    Ok(submissions)
}

/// Papers become an optional `{id}-abs` abstract plus an `{id}-pap` paper;
/// the paper depends on its mods, parents, and its own abstract.
fn load_papers(
    path: &Path,
    conferences: &[Conference],
    default_paper_lead_time_months: Option<i64>,
    min_paper_lead_time_days: i64,
    slack_days: i64,
) -> Result<Vec<Submission>> {
    let raw: Vec<RawPaper> = read_json(path)?;

    let mut submissions = Vec::new();
    for entry in raw {
        let conference_name = entry
            .planned_conference
            .clone()
            .or_else(|| entry.conference_families.first().cloned());
        let conference =
            conference_name.and_then(|name| conferences.iter().find(|c| c.id == name));

        let abstract_deadline =
            conference.and_then(|conf| conf.deadline(SubmissionType::Abstract));
        let paper_deadline = conference.and_then(|conf| conf.deadline(SubmissionType::Paper));

        let engineering = conference
            .map(|conf| conf.conf_type == ConferenceType::Engineering)
            .unwrap_or(true);

        let mod_deps: Vec<String> = entry
            .mod_dependencies
            .iter()
            .map(|mid| format!("mod{mid:02}-wrk"))
            .collect();
        let parent_deps: Vec<String> = entry
            .parent_papers
            .iter()
            .map(|pid| format!("{pid}-pap"))
            .collect();

        let abstract_id = abstract_deadline.map(|_| format!("{}-abs", entry.id));
        if let Some(abs_id) = &abstract_id {
            let mut submission = Submission::new(
                abs_id.clone(),
                format!("{} (abstract)", entry.title),
                SubmissionType::Abstract,
            );
            submission.conference_id = conference.map(|conf| conf.id.clone());
            submission.engineering = engineering;
            submission.depends_on = mod_deps.iter().chain(&parent_deps).cloned().collect();
            submissions.push(submission);
        }

        if let Some(deadline) = paper_deadline.or(abstract_deadline) {
            let draft_window_months = entry
                .draft_window_months
                .or(default_paper_lead_time_months)
                .unwrap_or(0);
            let draft_days = if draft_window_months > 0 {
                draft_window_months * DAYS_PER_MONTH
            } else {
                min_paper_lead_time_days
            };

            let mut submission = Submission::new(
                format!("{}-pap", entry.id),
                entry.title,
                SubmissionType::Paper,
            );
            submission.conference_id = conference.map(|conf| conf.id.clone());
            submission.engineering = engineering;
            submission.draft_window_months = draft_window_months;
            submission.earliest_start_date =
                Some(deadline - Duration::days(draft_days + slack_days));
            submission.depends_on = mod_deps
                .iter()
                .chain(&parent_deps)
                .cloned()
                .chain(abstract_id.clone())
                .collect();
            submissions.push(submission);
        }
    }
    Ok(submissions)
}
