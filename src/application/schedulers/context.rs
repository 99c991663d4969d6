//! Scheduling context module
//!
//! The shared feasibility kernel built once per strategy run: submissions in
//! an index-addressable container with `depends_on` resolved to integer
//! index vectors, so the hot paths (topological order, feasibility checks)
//! touch no string hashing.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::application::services::DependencyAnalyzer;
use crate::domain::entities::{Config, Submission};
use crate::domain::errors::EngineError;

/// Precomputed, index-addressed view of a config for one scheduler run.
pub struct SchedulingContext<'a> {
    pub config: &'a Config,
    /// Submissions in config order; all index vectors refer to this.
    pub submissions: Vec<&'a Submission>,
    index_of: HashMap<String, usize>,
    /// In-config dependencies as indices.
    pub deps: Vec<Vec<usize>>,
    /// Direct dependents as indices.
    pub successors: Vec<Vec<usize>>,
    pub durations: Vec<i64>,
    /// Resolved conference deadline for each submission's kind.
    pub deadlines: Vec<Option<NaiveDate>>,
    /// Base ranking priority per submission.
    pub priorities: Vec<f64>,
    /// Whether the bound conference accepts the submission's kind
    /// (true when unbound).
    pub venue_ok: Vec<bool>,
    /// Longest dependency chain length above each submission.
    pub depths: Vec<usize>,
    /// Indices in dependency-respecting order.
    pub topo_order: Vec<usize>,
    pub blackouts: BTreeSet<NaiveDate>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl<'a> SchedulingContext<'a> {
    /// Builds the context, failing fast on circular dependencies.
    pub fn new(config: &'a Config) -> Result<Self, EngineError> {
        let submissions: Vec<&Submission> = config.submissions.iter().collect();
        let index_of: HashMap<String, usize> = submissions
            .iter()
            .enumerate()
            .map(|(idx, sub)| (sub.id.clone(), idx))
            .collect();

        let mut analyzer = DependencyAnalyzer::new();
        analyzer.build_graph(&config.submissions);
        let topo_ids = analyzer.topological_order()?;
        let topo_order: Vec<usize> = topo_ids.iter().map(|id| index_of[id]).collect();

        let deps: Vec<Vec<usize>> = submissions
            .iter()
            .map(|sub| {
                sub.depends_on
                    .iter()
                    .filter_map(|dep_id| index_of.get(dep_id).copied())
                    .collect()
            })
            .collect();

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); submissions.len()];
        for (idx, dep_list) in deps.iter().enumerate() {
            for &dep in dep_list {
                successors[dep].push(idx);
            }
        }

        let durations: Vec<i64> = submissions
            .iter()
            .map(|sub| sub.duration_days(config))
            .collect();
        let deadlines: Vec<Option<NaiveDate>> = submissions
            .iter()
            .map(|sub| config.deadline_for(sub))
            .collect();
        let priorities: Vec<f64> = submissions
            .iter()
            .map(|sub| sub.priority_score(config))
            .collect();
        let venue_ok: Vec<bool> = submissions
            .iter()
            .map(|sub| match sub.conference_id.as_deref() {
                Some(conf_id) => config
                    .conference(conf_id)
                    .map(|conf| conf.accepts(sub.kind))
                    .unwrap_or(false),
                None => true,
            })
            .collect();

        // Longest dependency chain, computable in one pass over the order.
        let mut depths = vec![1usize; submissions.len()];
        for &idx in &topo_order {
            for &dep in &deps[idx] {
                depths[idx] = depths[idx].max(depths[dep] + 1);
            }
        }

        Ok(Self {
            submissions,
            index_of,
            deps,
            successors,
            durations,
            deadlines,
            priorities,
            venue_ok,
            depths,
            topo_order,
            blackouts: config.blackout_dates.iter().copied().collect(),
            window_start: config.effective_start_date(),
            window_end: config.window_end_date(),
            config,
        })
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.submissions[idx].id
    }

    pub fn index_of(&self, submission_id: &str) -> Option<usize> {
        self.index_of.get(submission_id).copied()
    }

    /// Whether a day is schedulable under the blackout policy.
    pub fn is_working_day(&self, day: NaiveDate) -> bool {
        if !self.config.blackouts_enabled() {
            return true;
        }
        !crate::domain::calendar::is_weekend(day) && !self.blackouts.contains(&day)
    }
}
