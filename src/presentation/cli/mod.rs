pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pubplanner")]
#[command(author = "PubPlanner Team")]
#[command(version = "0.1.0")]
#[command(about = "Publication planning scheduler for conference submissions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run a scheduling strategy and write schedule outputs")]
    Schedule {
        #[arg(short, long, value_name = "FILE", help = "Master config JSON file")]
        config: PathBuf,

        #[arg(short, long, value_name = "DIR", default_value = "output", help = "Output directory")]
        output: PathBuf,

        #[arg(short, long, default_value = "greedy", help = "Strategy tag")]
        strategy: String,

        #[arg(short, long, value_enum, default_value = "all", help = "Output format")]
        format: OutputFormat,
    },

    #[command(about = "Run every registered strategy and compare the results")]
    Compare {
        #[arg(short, long, value_name = "FILE", help = "Master config JSON file")]
        config: PathBuf,

        #[arg(short, long, value_name = "DIR", default_value = "output", help = "Output directory")]
        output: PathBuf,
    },

    #[command(about = "List the registered strategy tags")]
    Strategies,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    All,
}

impl OutputFormat {
    pub fn should_generate_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }

    pub fn should_generate_csv(&self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::All)
    }
}
