use chrono::{DateTime, Utc};
use log::info;
use poolytics_utils::config::Config;
use poolytics_utils::log::LogTarget;
use poolytics_utils::pipeline::{self, PipelineError};
use poolytics_utils::window::WindowMode;

pub fn generate(
    config: &Config,
    mode: WindowMode,
    run_time: DateTime<Utc>,
) -> Result<(), PipelineError> {
    let path = pipeline::generate_report(
        &config.dirs.revenue_dir,
        &config.dirs.report_dir,
        mode,
        run_time,
    )?;

    info!(
        target: LogTarget::Report.as_str(),
        "Report for {} saved",
        run_time.date_naive()
    );
    println!("{}", path.display());

    Ok(())
}
