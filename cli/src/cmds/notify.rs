use chrono::{DateTime, Utc};
use log::info;
use poolytics_utils::config::{Config, NotifierConfig};
use poolytics_utils::log::LogTarget;
use poolytics_utils::{email, report, template};
use std::error::Error;

pub fn send_report(
    config: &Config,
    notifier: &NotifierConfig,
    run_time: DateTime<Utc>,
) -> Result<(), Box<dyn Error>> {
    let html_template = template::load_template(&notifier.template_path)?;
    let (report_date, report) = report::latest_report(&config.dirs.report_dir)?;

    if report_date != run_time.date_naive() {
        info!(
            target: LogTarget::Notifier.as_str(),
            "No report for {}, sending the one from {}",
            run_time.date_naive(),
            report_date
        );
    }

    let placeholders =
        template::report_placeholders(&report, &notifier.organization, &notifier.subject, run_time);
    let html = template::render(&html_template, &placeholders);

    let subject = email::subject_line(
        config.env,
        &format!("{} - {}", notifier.subject, notifier.organization),
    );
    let delivered = email::send_email(&notifier.smtp, &subject, html)?;

    info!(
        target: LogTarget::Notifier.as_str(),
        "Report from {} sent to {} of {} recipients",
        report_date,
        delivered,
        notifier.smtp.to.len()
    );

    Ok(())
}
