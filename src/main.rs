use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pubplanner::domain::errors::EngineError;
use pubplanner::presentation::cli::{Cli, Commands};
use pubplanner::presentation::cli::commands::{CompareCommand, ScheduleCommand, StrategiesCommand};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pubplanner=debug,info")
    } else {
        EnvFilter::new("pubplanner=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Schedule {
            config,
            output,
            strategy,
            format,
        } => ScheduleCommand::execute(config, output, strategy, format),
        Commands::Compare { config, output } => CompareCommand::execute(config, output),
        Commands::Strategies => {
            StrategiesCommand::execute();
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        // 1 for user/config errors, 2 for engine failure to schedule
        let code = error
            .downcast_ref::<EngineError>()
            .map(EngineError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
