//! File-backed JSON stores.
//!
//! Every store is a directory of `YYYY-MM-DD.json` files (or per-worker
//! `<name>.json` files), each holding one JSON array that grows by one
//! element per poll.

use crate::log::LogTarget;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("directory {0} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("file {0} does not exist")]
    FileNotFound(PathBuf),

    #[error("file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize data for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::FileNotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// One revenue observation as written by the revenue poller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue60m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_utc: Option<String>,
}

impl SampleRecord {
    pub fn new(revenue60m: f64, datetime_utc: String) -> Self {
        Self {
            revenue60m: Some(revenue60m),
            datetime_utc: Some(datetime_utc),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedFile {
    pub date: NaiveDate,
    pub path: PathBuf,
}

impl DatedFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// `2024-01-31.json` -> 2024-01-31. Anything else is `None`.
pub fn parse_date_from_filename(path: &Path) -> Option<NaiveDate> {
    if path.extension()? != "json" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// Lists the dated JSON files in `dir`, oldest first.
///
/// Entries whose name is not `YYYY-MM-DD.json` are skipped with a warning.
pub fn list_dated_files(dir: &Path) -> Result<Vec<DatedFile>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        match parse_date_from_filename(&path) {
            Some(date) => files.push(DatedFile { date, path }),
            None => warn!(
                target: LogTarget::Report.as_str(),
                "Skipping file without a YYYY-MM-DD.json name: {}",
                path.display()
            ),
        }
    }

    files.sort_by(|a, b| a.date.cmp(&b.date));
    debug!(
        target: LogTarget::Report.as_str(),
        "Found {} dated files in {}",
        files.len(),
        dir.display()
    );

    Ok(files)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the sample records of one daily file.
///
/// `Ok(vec![])` means the file holds an empty array; a corrupt or missing
/// file is an error.
pub fn load_records(path: &Path) -> Result<Vec<SampleRecord>, StoreError> {
    read_json(path)
}

/// Writes `value` as indented JSON. The data goes to a sibling temp file first
/// and is renamed over `path`, so readers never see a half-written file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let content = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let mut tmp = fs::File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
    tmp.write_all(&content)
        .and_then(|_| tmp.sync_all())
        .map_err(|e| StoreError::io(&tmp_path, e))?;
    drop(tmp);

    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
}

/// Appends one element to the JSON array in `path`, creating the file if
/// needed. Returns the new element count.
///
/// A corrupt existing file is left untouched and reported, rather than being
/// replaced by a one-element array.
pub fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<usize, StoreError> {
    let mut existing: Vec<serde_json::Value> = match read_json(path) {
        Ok(v) => v,
        Err(StoreError::FileNotFound(_)) => Vec::new(),
        Err(e) => return Err(e),
    };

    let value = serde_json::to_value(record).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    existing.push(value);

    write_json(path, &existing)?;
    Ok(existing.len())
}
