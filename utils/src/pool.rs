use chrono::DateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::store::DATETIME_FORMAT;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Deserialize)]
pub struct Revenue {
    pub revenue60m: f64,
}

#[derive(Deserialize)]
pub struct RevenueResponse {
    pub revenue: Revenue,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Hashrate {
    pub hashrate: f64,
    pub hashrate_unit: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Worker {
    pub name: String,
    pub hashrate24h: Hashrate,
    pub last_share_time: i64,
}

#[derive(Debug, Deserialize)]
pub struct WorkersResponse {
    pub workers: Vec<Worker>,
}

/// Per-worker hashrate snapshot as stored in `<workers dir>/<name>.json`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkerHashrate {
    pub worker: String,
    pub hashrate: f64,
    pub hashrate_unit: String,
    pub last_share_time: i64,
    pub last_share_time_utc: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkerHashrateRecord {
    pub hashrate24h: WorkerHashrate,
}

impl From<&Worker> for WorkerHashrateRecord {
    fn from(worker: &Worker) -> Self {
        // Out-of-range timestamps keep the raw value and an empty UTC string
        let last_share_time_utc = DateTime::from_timestamp(worker.last_share_time, 0)
            .map(|t| t.format(DATETIME_FORMAT).to_string())
            .unwrap_or_default();

        Self {
            hashrate24h: WorkerHashrate {
                worker: worker.name.clone(),
                hashrate: worker.hashrate24h.hashrate,
                hashrate_unit: worker.hashrate24h.hashrate_unit.clone(),
                last_share_time: worker.last_share_time,
                last_share_time_utc,
            },
        }
    }
}

pub struct PoolClient {
    client: Client,
}

impl PoolClient {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let data: T = response.json().await?;

        Ok(data)
    }

    /// `revenue.revenue60m` from the revenue endpoint.
    pub async fn get_revenue60m(&self, url: &str) -> Result<f64, Error> {
        let data: RevenueResponse = self.get(url).await?;
        Ok(data.revenue.revenue60m)
    }

    pub async fn get_workers(&self, url: &str) -> Result<WorkersResponse, Error> {
        self.get(url).await
    }

    /// The workers payload kept as-is, for the raw hashrate log.
    pub async fn get_raw(&self, url: &str) -> Result<serde_json::Value, Error> {
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revenue_response_reads_nested_value() {
        let data: RevenueResponse = serde_json::from_value(json!({
            "revenue": {"revenue24h": 0.01, "revenue60m": 0.000417},
            "currency": "BTC"
        }))
        .unwrap();
        assert_eq!(data.revenue.revenue60m, 0.000417);
    }

    #[test]
    fn revenue_response_without_revenue60m_is_rejected() {
        let res: Result<RevenueResponse, _> =
            serde_json::from_value(json!({"revenue": {"revenue24h": 0.01}}));
        assert!(res.is_err());
    }

    #[test]
    fn worker_converts_to_hashrate_record() {
        let data: WorkersResponse = serde_json::from_value(json!({
            "workers": [{
                "name": "rig-01",
                "hashrate24h": {"hashrate": 98.5, "hashrate_unit": "TH/s"},
                "last_share_time": 1704067200,
                "online": true
            }]
        }))
        .unwrap();

        let record = WorkerHashrateRecord::from(&data.workers[0]);
        assert_eq!(record.hashrate24h.worker, "rig-01");
        assert_eq!(record.hashrate24h.hashrate, 98.5);
        assert_eq!(record.hashrate24h.hashrate_unit, "TH/s");
        assert_eq!(record.hashrate24h.last_share_time_utc, "2024-01-01 00:00:00");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hashrate24h"]["last_share_time"], json!(1704067200));
    }
}
