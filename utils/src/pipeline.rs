use crate::log::LogTarget;
use crate::report::{self, ReportError};
use crate::stats::{compute_statistics, PercentageChange, Statistics};
use crate::store::{self, SampleRecord, StoreError};
use crate::window::{self, Window, WindowError, WindowKind, WindowMode};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("no dated sample files in {0}")]
    EmptyCorpus(PathBuf),

    #[error("{0}")]
    Window(#[from] WindowError),

    #[error("every file of the {0} window failed to load")]
    EmptyWindow(WindowKind),

    #[error("{0} window has no revenue60m values")]
    UndefinedStatistics(WindowKind),

    #[error("{0}")]
    Report(#[from] ReportError),
}

/// Merges the records of every file in `window`, oldest file first.
///
/// Files that are missing or corrupt are logged and dropped. It is an error
/// only if the window had files and none of them could be read.
pub fn load_window(window: &Window) -> Result<Vec<SampleRecord>, PipelineError> {
    let mut combined = Vec::new();
    let mut loaded = 0usize;

    for file in &window.files {
        match store::load_records(&file.path) {
            Ok(records) => {
                loaded += 1;
                combined.extend(records);
            }
            Err(e) => warn!(
                target: LogTarget::Report.as_str(),
                "Dropping {} from {} window: {}",
                file.file_name(),
                window.kind,
                e
            ),
        }
    }

    if !window.is_empty() && loaded == 0 {
        return Err(PipelineError::EmptyWindow(window.kind));
    }

    debug!(
        target: LogTarget::Report.as_str(),
        "{} window: {} of {} files loaded, {} records",
        window.kind,
        loaded,
        window.len(),
        combined.len()
    );

    Ok(combined)
}

fn window_statistics(window: &Window) -> Result<Statistics, PipelineError> {
    let records = load_window(window)?;
    let stats =
        compute_statistics(&records).ok_or(PipelineError::UndefinedStatistics(window.kind))?;

    info!(
        target: LogTarget::Report.as_str(),
        "{} window: {} of {} records carry revenue60m, avg {}",
        window.kind,
        stats.count,
        records.len(),
        stats.avg
    );

    Ok(stats)
}

/// Builds and persists the archival-vs-current report for `run_time`.
///
/// Nothing is written unless both windows produce statistics.
pub fn generate_report(
    sample_dir: &Path,
    report_dir: &Path,
    mode: WindowMode,
    run_time: DateTime<Utc>,
) -> Result<PathBuf, PipelineError> {
    let files = store::list_dated_files(sample_dir)?;
    if files.is_empty() {
        return Err(PipelineError::EmptyCorpus(sample_dir.to_path_buf()));
    }

    let (archival, current) = window::partition(&files, mode)?;
    info!(
        target: LogTarget::Report.as_str(),
        "Comparing {} archival files against {} current files ({:?})",
        archival.len(),
        current.len(),
        mode
    );

    let archival_stats = window_statistics(&archival)?;
    let current_stats = window_statistics(&current)?;

    // Statistics imply at least one file, so the ranges exist
    let archival_range = archival
        .date_range()
        .ok_or(PipelineError::UndefinedStatistics(WindowKind::Archival))?;
    let current_range = current
        .date_range()
        .ok_or(PipelineError::UndefinedStatistics(WindowKind::Current))?;

    let change = PercentageChange::between(&current_stats, &archival_stats);
    let document = report::build_report(
        archival_range,
        current_range,
        &archival_stats,
        &current_stats,
        &change,
    );

    let path = report::persist_report(report_dir, run_time.date_naive(), &document)?;
    info!(
        target: LogTarget::Report.as_str(),
        "Report written to {}",
        path.display()
    );

    Ok(path)
}
