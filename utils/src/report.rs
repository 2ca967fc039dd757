//! Report document: archival and current window summaries plus their
//! percentage change, persisted as `<report dir>/<run date>.json`.

use crate::dirs::daily_file;
use crate::math::round_dp;
use crate::stats::{PercentageChange, Statistics};
use crate::store::{self, StoreError};
use crate::window::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STATISTICS_DP: u32 = 6;
pub const PERCENT_DP: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("no report found in {0}")]
    NoReport(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub min_revenue60m: f64,
    pub max_revenue60m: f64,
    pub avg_revenue60m: f64,
}

impl WindowSummary {
    fn new(range: DateRange, stats: &Statistics) -> Self {
        Self {
            start_date: range.start,
            end_date: range.end,
            min_revenue60m: round_dp(stats.min, STATISTICS_DP),
            max_revenue60m: round_dp(stats.max, STATISTICS_DP),
            avg_revenue60m: round_dp(stats.avg, STATISTICS_DP),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentageSummary {
    pub min_percent: f64,
    pub max_percent: f64,
    pub avg_percent: f64,
}

impl From<&PercentageChange> for PercentageSummary {
    fn from(change: &PercentageChange) -> Self {
        Self {
            min_percent: round_dp(change.min_percent, PERCENT_DP),
            max_percent: round_dp(change.max_percent, PERCENT_DP),
            avg_percent: round_dp(change.avg_percent, PERCENT_DP),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub archival: WindowSummary,
    pub current: WindowSummary,
    pub percentage_change: PercentageSummary,
}

/// Assembles the document. Rounding happens here and nowhere earlier.
pub fn build_report(
    archival_range: DateRange,
    current_range: DateRange,
    archival_stats: &Statistics,
    current_stats: &Statistics,
    change: &PercentageChange,
) -> Report {
    Report {
        archival: WindowSummary::new(archival_range, archival_stats),
        current: WindowSummary::new(current_range, current_stats),
        percentage_change: change.into(),
    }
}

/// Writes `report` to `<dir>/<date>.json`, replacing any report already there
/// for that date.
pub fn persist_report(dir: &Path, date: NaiveDate, report: &Report) -> Result<PathBuf, ReportError> {
    let path = daily_file(dir, date);
    store::write_json(&path, report)?;
    Ok(path)
}

pub fn load_report(path: &Path) -> Result<Report, ReportError> {
    Ok(store::read_json(path)?)
}

/// Newest dated report in `dir`.
pub fn latest_report(dir: &Path) -> Result<(NaiveDate, Report), ReportError> {
    let files = store::list_dated_files(dir)?;
    let latest = files
        .last()
        .ok_or_else(|| ReportError::NoReport(dir.to_path_buf()))?;

    Ok((latest.date, load_report(&latest.path)?))
}
