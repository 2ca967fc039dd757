//! Shared fixtures for the store-backed integration tests.

use std::fs;
use std::path::PathBuf;

/// A temporary `DATA_DIR` with an existing sample directory and a not yet
/// created report directory.
///
/// Keep the value alive for the whole test; dropping it removes the files.
pub struct Store {
    _tmp: tempfile::TempDir,
    pub samples: PathBuf,
    pub reports: PathBuf,
}

impl Store {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let samples = tmp.path().join("revenue");
        let reports = tmp.path().join("report");
        fs::create_dir(&samples).unwrap();

        Self {
            _tmp: tmp,
            samples,
            reports,
        }
    }

    /// Writes `<date>.json` with one sample per value, an hour apart.
    pub fn day(&self, date: &str, revenues: &[f64]) {
        let records: Vec<serde_json::Value> = revenues
            .iter()
            .enumerate()
            .map(|(hour, revenue)| {
                serde_json::json!({
                    "revenue60m": revenue,
                    "datetime_utc": format!("{} {:02}:00:00", date, hour),
                })
            })
            .collect();

        self.raw(
            &format!("{}.json", date),
            &serde_json::to_string_pretty(&records).unwrap(),
        );
    }

    pub fn raw(&self, name: &str, content: &str) {
        fs::write(self.samples.join(name), content).unwrap();
    }
}
