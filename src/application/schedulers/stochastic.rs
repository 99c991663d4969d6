//! Stochastic scheduler module
//!
//! The greedy day loop with Gaussian noise added to each candidate's ranking
//! priority, producing a distribution of schedules across runs. The RNG is
//! seeded from the config when a seed is present and from the OS otherwise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::schedulers::context::SchedulingContext;
use crate::application::schedulers::greedy::run_daily_loop;
use crate::application::schedulers::Scheduler;
use crate::domain::entities::{Config, Schedule};
use crate::domain::errors::EngineError;

/// Greedy scheduler with randomized priority ranking.
#[derive(Debug)]
pub struct StochasticScheduler {
    config: Config,
    /// Overrides the config's randomness factor (the `random` tag forces 1.0).
    randomness_override: Option<f64>,
    name: &'static str,
}

impl StochasticScheduler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            randomness_override: None,
            name: "stochastic",
        }
    }

    /// Fully randomized variant used by the `random` strategy tag.
    pub fn fully_random(config: Config) -> Self {
        Self {
            config,
            randomness_override: Some(1.0),
            name: "random",
        }
    }

    fn randomness(&self) -> f64 {
        self.randomness_override
            .unwrap_or(self.config.randomness_factor)
    }

    fn rng(&self) -> StdRng {
        match self.config.scheduling_options.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Scheduler for StochasticScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schedule(&self) -> Result<Schedule, EngineError> {
        let ctx = SchedulingContext::new(&self.config)?;
        let randomness = self.randomness();
        let mut rng = self.rng();
        run_daily_loop(&ctx, |_| gaussian(&mut rng) * randomness)
    }
}

/// Standard-normal sample via the Box-Muller transform.
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Conference, ConferenceRecurrence, ConferenceType, Submission, SubmissionType,
    };
    use chrono::{Duration, NaiveDate};
    use std::collections::BTreeMap;

    fn seeded_config(seed: u64) -> Config {
        let mut config = Config::default_config();
        let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        config.scheduling_start_date = Some(start);
        config.scheduling_options.random_seed = Some(seed);
        let mut deadlines = BTreeMap::new();
        deadlines.insert(SubmissionType::Paper, start + Duration::days(365));
        config.conferences = vec![Conference::new(
            "cts",
            "CTS",
            ConferenceType::Medical,
            ConferenceRecurrence::Annual,
            deadlines,
        )];
        for id in ["p1", "p2", "p3", "p4"] {
            let mut sub = Submission::new(id, format!("Paper {id}"), SubmissionType::Paper);
            sub.conference_id = Some("cts".into());
            sub.draft_window_months = 1;
            config.submissions.push(sub);
        }
        config
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let config = seeded_config(42);
        let first = StochasticScheduler::new(config.clone()).schedule().unwrap();
        let second = StochasticScheduler::new(config).schedule().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schedules_everything() {
        let config = seeded_config(7);
        let schedule = StochasticScheduler::new(config).schedule().unwrap();
        assert_eq!(schedule.len(), 4);
    }

    #[test]
    fn test_gaussian_is_finite() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(gaussian(&mut rng).is_finite());
        }
    }
}
