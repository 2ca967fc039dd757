use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::num::NonZeroUsize;

#[derive(Parser)]
#[command(name = "poolytics", about = "Mining pool revenue sampling and reporting")]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare the last DAYS daily sample files against all files before them
    Report {
        /// Number of most recent daily files in the current window
        days: NonZeroUsize,
    },

    /// Compare the newest daily sample file against all files before it
    DailyReport,

    /// Append the pool's current revenue60m to today's sample file
    SnapshotRevenue,

    /// Append each worker's 24h hashrate to its per-worker file
    SnapshotWorkers,

    /// Append the raw workers payload to today's hashrate file
    SnapshotHashrate,

    /// E-mail the most recent report
    SendReport,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Log level, overrides LOG_LEVEL
    #[clap(long, global = true)]
    pub log_level: Option<LevelFilter>,
}
