use crate::store::DatedFile;
use chrono::NaiveDate;
use std::fmt;
use std::num::NonZeroUsize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("no dated files to partition")]
    EmptyCorpus,

    #[error("day count {requested} leaves no archival data, only {available} dated files available")]
    OutOfRange { requested: usize, available: usize },
}

/// How the sorted dated-file list is split into archival and current windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMode {
    /// The last `n` files are current, everything before them is archival.
    DayCount(NonZeroUsize),

    /// The newest file is current, every other file is archival.
    LatestVsRest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowKind {
    Archival,
    Current,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::Archival => write!(f, "archival"),
            WindowKind::Current => write!(f, "current"),
        }
    }
}

/// Contiguous run of dated files, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub kind: WindowKind,
    pub files: Vec<DatedFile>,
}

impl Window {
    fn new(kind: WindowKind, files: &[DatedFile]) -> Self {
        Self {
            kind,
            files: files.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.files.first().map(|f| f.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.files.last().map(|f| f.date)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        Some(DateRange {
            start: self.start_date()?,
            end: self.end_date()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub fn partition_by_day_count(
    files: &[DatedFile],
    n: NonZeroUsize,
) -> Result<(Window, Window), WindowError> {
    if files.is_empty() {
        return Err(WindowError::EmptyCorpus);
    }

    let n = n.get();
    if n >= files.len() {
        return Err(WindowError::OutOfRange {
            requested: n,
            available: files.len(),
        });
    }

    let (archival, current) = files.split_at(files.len() - n);
    Ok((
        Window::new(WindowKind::Archival, archival),
        Window::new(WindowKind::Current, current),
    ))
}

/// The archival window is empty when `files` holds a single entry.
pub fn partition_latest_vs_rest(files: &[DatedFile]) -> Result<(Window, Window), WindowError> {
    match files.split_last() {
        Some((latest, rest)) => Ok((
            Window::new(WindowKind::Archival, rest),
            Window::new(WindowKind::Current, std::slice::from_ref(latest)),
        )),
        None => Err(WindowError::EmptyCorpus),
    }
}

pub fn partition(files: &[DatedFile], mode: WindowMode) -> Result<(Window, Window), WindowError> {
    match mode {
        WindowMode::DayCount(n) => partition_by_day_count(files, n),
        WindowMode::LatestVsRest => partition_latest_vs_rest(files),
    }
}
