use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};

const LOG_DIR: &str = "logs";
const WORKERS_DIR: &str = "workers";

/// Store layout under `DATA_DIR`.
#[derive(Clone, Debug)]
pub struct PoolyticsDirs {
    pub revenue_dir: PathBuf,
    pub report_dir: PathBuf,
    pub hashrate_dir: PathBuf,
    pub workers_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PoolyticsDirs {
    pub fn new(
        data_dir: PathBuf,
        revenue_dir: &str,
        report_dir: &str,
        hashrate_dir: &str,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let revenue_dir = data_dir.join(revenue_dir);
        let report_dir = data_dir.join(report_dir);
        let hashrate_dir = data_dir.join(hashrate_dir);
        let workers_dir = hashrate_dir.join(WORKERS_DIR);
        let log_dir = log_dir.unwrap_or_else(|| data_dir.join(LOG_DIR));

        Self {
            revenue_dir,
            report_dir,
            hashrate_dir,
            workers_dir,
            log_dir,
        }
    }
}

/// `<dir>/YYYY-MM-DD.json`
pub fn daily_file(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.json", date.format("%Y-%m-%d")))
}

/// `<dir>/<name>.json` for a worker name reported by the pool.
///
/// `None` if the name is empty or would resolve outside `dir`.
pub fn worker_file(dir: &Path, name: &str) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(dir.join(format!("{}.json", name))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_file_joins_plain_names() {
        let dir = Path::new("/data/hashrate/workers");
        assert_eq!(
            worker_file(dir, "rig-01.eu"),
            Some(dir.join("rig-01.eu.json"))
        );
    }

    #[test]
    fn worker_file_rejects_names_leaving_the_directory() {
        let dir = Path::new("/data/hashrate/workers");
        for name in ["", ".", "..", "../escape", "a/b", "/etc/passwd", "a\\b", "rig/"] {
            assert_eq!(worker_file(dir, name), None, "{:?}", name);
        }
    }

    #[test]
    fn daily_file_is_named_after_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            daily_file(Path::new("/data/revenue"), date),
            PathBuf::from("/data/revenue/2024-01-05.json")
        );
    }
}
