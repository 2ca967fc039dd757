mod cli;
mod cmds;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use log::{error, info};
use poolytics_utils::config::{Config, NotifierConfig, PoolApiConfig};
use poolytics_utils::window::WindowMode;
use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

async fn run(command: &Commands, config: &Config) -> Result<(), Box<dyn Error>> {
    // One timestamp for the whole run, so every file written agrees on the date
    let run_time = Utc::now();

    match command {
        Commands::Report { days } => {
            cmds::report::generate(config, WindowMode::DayCount(*days), run_time)?
        }
        Commands::DailyReport => {
            cmds::report::generate(config, WindowMode::LatestVsRest, run_time)?
        }
        Commands::SnapshotRevenue => {
            let api = PoolApiConfig::from_env()?;
            cmds::snapshot::snapshot_revenue(config, &api, run_time).await?
        }
        Commands::SnapshotWorkers => {
            let api = PoolApiConfig::from_env()?;
            cmds::snapshot::snapshot_workers(config, &api).await?
        }
        Commands::SnapshotHashrate => {
            let api = PoolApiConfig::from_env()?;
            cmds::snapshot::snapshot_hashrate(config, &api, run_time).await?
        }
        Commands::SendReport => {
            let notifier = NotifierConfig::from_env()?;
            cmds::notify::send_report(config, &notifier, run_time)?
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.global_args.log_level {
        config.log_level = level;
    }

    if let Err(e) = poolytics_utils::log::init_logger(&config) {
        eprintln!("Cannot initialize logging in {}: {}", config.dirs.log_dir.display(), e);
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    info!("{:?} command starting...", cli.command);

    if let Err(e) = run(&cli.command, &config).await {
        error!("{:?} command failed: {}", cli.command, e);
        return ExitCode::FAILURE;
    }

    info!(
        "{:?} command finished in {:.2}s",
        cli.command,
        start.elapsed().as_secs_f32()
    );

    ExitCode::SUCCESS
}
