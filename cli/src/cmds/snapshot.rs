use chrono::{DateTime, Utc};
use log::{error, info};
use poolytics_utils::config::{Config, PoolApiConfig};
use poolytics_utils::dirs::{daily_file, worker_file};
use poolytics_utils::log::LogTarget;
use poolytics_utils::pool::{PoolClient, WorkerHashrateRecord};
use poolytics_utils::store::{self, SampleRecord, DATETIME_FORMAT};
use std::error::Error;

pub async fn snapshot_revenue(
    config: &Config,
    api: &PoolApiConfig,
    run_time: DateTime<Utc>,
) -> Result<(), Box<dyn Error>> {
    let client = PoolClient::new()?;
    let revenue60m = client.get_revenue60m(&api.revenue_url).await?;

    let record = SampleRecord::new(revenue60m, run_time.format(DATETIME_FORMAT).to_string());
    let path = daily_file(&config.dirs.revenue_dir, run_time.date_naive());
    let count = store::append_record(&path, &record)?;

    info!(
        target: LogTarget::Poller.as_str(),
        "revenue60m {} saved to {} ({} samples)",
        revenue60m,
        path.display(),
        count
    );

    Ok(())
}

pub async fn snapshot_workers(config: &Config, api: &PoolApiConfig) -> Result<(), Box<dyn Error>> {
    let client = PoolClient::new()?;
    let data = client.get_workers(&api.workers_url).await?;

    let mut failed = 0;
    for worker in &data.workers {
        let Some(path) = worker_file(&config.dirs.workers_dir, &worker.name) else {
            failed += 1;
            error!(
                target: LogTarget::Poller.as_str(),
                "Worker name {:?} is not a valid file name, skipped",
                worker.name
            );
            continue;
        };

        match store::append_record(&path, &WorkerHashrateRecord::from(worker)) {
            Ok(_) => info!(
                target: LogTarget::Poller.as_str(),
                "Hashrate of {} saved to {}",
                worker.name,
                path.display()
            ),
            Err(e) => {
                failed += 1;
                error!(target: LogTarget::Poller.as_str(), "Worker {}: {}", worker.name, e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} workers not saved", failed, data.workers.len()).into());
    }

    Ok(())
}

pub async fn snapshot_hashrate(
    config: &Config,
    api: &PoolApiConfig,
    run_time: DateTime<Utc>,
) -> Result<(), Box<dyn Error>> {
    let client = PoolClient::new()?;
    let payload = client.get_raw(&api.workers_url).await?;

    let path = daily_file(&config.dirs.hashrate_dir, run_time.date_naive());
    let count = store::append_record(&path, &payload)?;

    info!(
        target: LogTarget::Poller.as_str(),
        "Workers payload saved to {} ({} snapshots)",
        path.display(),
        count
    );

    Ok(())
}
