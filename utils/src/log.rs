use crate::config::Config as PoolyticsConfig;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::rolling_file::{
        policy::compound::{
            roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
        },
        RollingFileAppender,
    },
    config::{Appender, Config, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::path::Path;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f %Z)} - {h({l})} - {m} (({f}:{L})){n}";
const ROLL_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const ROLL_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub enum LogTarget {
    Poller,
    Report,
    Notifier,
}

impl LogTarget {
    pub const ALL: [LogTarget; 3] = [LogTarget::Poller, LogTarget::Report, LogTarget::Notifier];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogTarget::Poller => "poller",
            LogTarget::Report => "report",
            LogTarget::Notifier => "notifier",
        }
    }
}

fn create_stderr_appender() -> ConsoleAppender {
    ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build()
}

fn create_rolling_file_appender(
    base_path: &Path,
) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let log_file_path = base_path.with_extension("log");
    let roll_pattern = format!("{}.{{}}.log", base_path.to_string_lossy());

    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(&roll_pattern, ROLL_COUNT)?;

    let trigger = SizeTrigger::new(ROLL_SIZE_BYTES);
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_file_path, Box::new(policy))
        .map_err(|e| e.into())
}

fn setup_target_logger(
    config: &PoolyticsConfig,
    target: LogTarget,
) -> Result<(Appender, Logger), Box<dyn std::error::Error>> {
    let base_path = config.dirs.log_dir.join(target.as_str());
    let rolling_file = create_rolling_file_appender(&base_path)?;

    let appender = Appender::builder()
        .filter(Box::new(ThresholdFilter::new(log::LevelFilter::Info)))
        .build(target.as_str(), Box::new(rolling_file));

    let logger = Logger::builder()
        .appender(target.as_str())
        .appender("stderr")
        .additive(false)
        .build(target.as_str(), config.log_level);

    Ok((appender, logger))
}

/// Console output for everything, plus one rolling file per [`LogTarget`].
pub fn init_logger(config: &PoolyticsConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(config.dirs.log_dir.as_path())?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(create_stderr_appender())));

    for target in LogTarget::ALL {
        let (appender, logger) = setup_target_logger(config, target)?;
        builder = builder.appender(appender).logger(logger);
    }

    // lettre and reqwest internals are noisy at debug
    let config = builder
        .logger(Logger::builder().build("lettre", log::LevelFilter::Warn))
        .logger(Logger::builder().build("reqwest", log::LevelFilter::Warn))
        .logger(Logger::builder().build("hyper_util", log::LevelFilter::Warn))
        .build(
            Root::builder()
                .appender("stderr")
                .build(config.log_level),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}
