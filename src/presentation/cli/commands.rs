//! CLI Commands module
//!
//! Command implementations for the CLI interface: running one strategy with
//! full outputs, comparing every registered strategy, and listing the
//! registry. Console summaries are printed here; the engine itself only
//! logs through `tracing`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::schedulers::available_strategies;
use crate::application::use_cases::{GenerateSchedule, GenerationResult};
use crate::domain::value_objects::Severity;
use crate::infrastructure::loaders::ConfigLoader;
use crate::infrastructure::output::{CsvGenerator, JsonGenerator};
use crate::presentation::cli::OutputFormat;
use crate::presentation::dto::ScheduleReport;

/// Command for running one scheduling strategy end to end
pub struct ScheduleCommand;

impl ScheduleCommand {
    pub fn execute(
        config_path: &Path,
        output_dir: &Path,
        strategy: &str,
        format: &OutputFormat,
    ) -> Result<()> {
        let config = ConfigLoader::new()
            .load(config_path)
            .context("failed to load configuration")?;

        let result = GenerateSchedule::new().execute(strategy, &config)?;

        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;

        if format.should_generate_json() {
            let json = JsonGenerator::new();
            json.save_schedule(&result.schedule, &config, output_dir.join("schedule.json"))?;
            let report = ScheduleReport::from_generation_result(&result, &config);
            json.save_report(&report, output_dir.join("report.json"))?;
            info!("JSON outputs written to {}", output_dir.display());
        }

        if format.should_generate_csv() {
            CsvGenerator::new().generate_all(
                &result.schedule,
                &config,
                &result.metrics,
                &result.validation,
                output_dir,
            )?;
            info!("CSV outputs written to {}", output_dir.display());
        }

        Self::print_summary(&result);
        Ok(())
    }

    fn print_summary(result: &GenerationResult) {
        println!("\n{}", "=".repeat(72));
        println!("📅 SCHEDULE SUMMARY ({})", result.strategy);
        println!("{}", "=".repeat(72));

        let metrics = &result.metrics;
        println!("\n📈 Overall:");
        println!("  • Scheduled:         {}/{}", metrics.scheduled_count, metrics.total_submissions);
        println!("  • Completion:        {:.1}%", metrics.completion_rate);
        println!("  • Makespan:          {} days", metrics.makespan_days);
        println!("  • Total Penalty:     {:.2}", metrics.penalty_breakdown.total_penalty);
        println!("  • Quality Score:     {:.1}", metrics.quality_score);
        println!("  • Efficiency Score:  {:.1}", metrics.efficiency_score);

        if result.validation.is_valid {
            println!("\n✅ All constraints satisfied");
        } else {
            println!("\n⚠️  {} constraint violations:", result.validation.violations.len());
            for violation in result.validation.violations.iter().take(10) {
                let marker = match violation.severity {
                    Severity::High => "‼️",
                    Severity::Medium => "⚠️",
                    Severity::Low => "ℹ️",
                };
                println!(
                    "  {} [{}] {}: {}",
                    marker,
                    violation.kind.label(),
                    violation.submission_id,
                    violation.description
                );
            }
            if result.validation.violations.len() > 10 {
                println!("  … and {} more", result.validation.violations.len() - 10);
            }
        }

        if !metrics.missing_submissions.is_empty() {
            println!("\n🚫 Unscheduled: {}", metrics.missing_submissions.join(", "));
        }

        println!("\n{}", "=".repeat(72));
    }
}

#[derive(Debug, Serialize)]
struct ComparisonRow {
    strategy: String,
    scheduled: usize,
    completion_rate: f64,
    total_penalty: f64,
    quality_score: f64,
    efficiency_score: f64,
    makespan_days: i64,
    violations: usize,
}

/// Command comparing every registered strategy on one config
pub struct CompareCommand;

impl CompareCommand {
    pub fn execute(config_path: &Path, output_dir: &Path) -> Result<()> {
        let config = ConfigLoader::new()
            .load(config_path)
            .context("failed to load configuration")?;

        let strategies = available_strategies();
        let pb = ProgressBar::new(strategies.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓▒░ "),
        );

        let use_case = GenerateSchedule::new();
        let mut rows = Vec::new();
        for tag in strategies {
            pb.set_message(tag.to_string());
            match use_case.execute(tag, &config) {
                Ok(result) => rows.push(Self::row_from(&result)),
                Err(error) => warn!(strategy = tag, %error, "strategy failed"),
            }
            pb.inc(1);
        }
        pb.finish_with_message("done");

        if rows.is_empty() {
            anyhow::bail!("no strategy produced a schedule");
        }

        let path = CsvGenerator::new().generate_comparison(&rows, output_dir)?;
        info!("comparison written to {}", path.display());

        Self::print_comparison(&rows);
        Ok(())
    }

    fn row_from(result: &GenerationResult) -> ComparisonRow {
        ComparisonRow {
            strategy: result.strategy.clone(),
            scheduled: result.metrics.scheduled_count,
            completion_rate: result.metrics.completion_rate,
            total_penalty: result.metrics.penalty_breakdown.total_penalty,
            quality_score: result.metrics.quality_score,
            efficiency_score: result.metrics.efficiency_score,
            makespan_days: result.metrics.makespan_days,
            violations: result.validation.violations.len(),
        }
    }

    fn print_comparison(rows: &[ComparisonRow]) {
        println!("\n{}", "=".repeat(72));
        println!("🔬 STRATEGY COMPARISON");
        println!("{}", "=".repeat(72));
        println!(
            "{:<14} {:>9} {:>10} {:>8} {:>10} {:>9} {:>6}",
            "Strategy", "Scheduled", "Penalty", "Quality", "Efficiency", "Makespan", "Viol."
        );
        for row in rows {
            println!(
                "{:<14} {:>9} {:>10.1} {:>8.1} {:>10.1} {:>9} {:>6}",
                row.strategy,
                row.scheduled,
                row.total_penalty,
                row.quality_score,
                row.efficiency_score,
                row.makespan_days,
                row.violations
            );
        }
        println!("{}", "=".repeat(72));
    }
}

/// Command listing the strategy registry
pub struct StrategiesCommand;

impl StrategiesCommand {
    pub fn execute() {
        println!("Registered strategies:");
        for tag in available_strategies() {
            println!("  • {tag}");
        }
    }
}
