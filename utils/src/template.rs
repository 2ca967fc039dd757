//! HTML e-mail body built from a template with `[[[KEY]]]` placeholders.

use crate::report::Report;
use crate::store::DATE_FORMAT;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const COLOR_UP: &str = "#d4edda";
const COLOR_DOWN: &str = "#f8d7da";
const COLOR_FLAT: &str = "#ffffff";

const ENTITY_UP: &str = "&#9650;";
const ENTITY_DOWN: &str = "&#9660;";
const ENTITY_FLAT: &str = "&#9679;";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {0} is empty")]
    Empty(PathBuf),
}

pub fn load_template(path: &Path) -> Result<String, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(Error::Empty(path.to_path_buf()));
    }

    Ok(content)
}

/// Replaces every `[[[KEY]]]` with its value. Unknown placeholders are left
/// in place.
pub fn render(template: &str, placeholders: &BTreeMap<String, String>) -> String {
    placeholders
        .iter()
        .fold(template.to_string(), |html, (key, value)| {
            html.replace(&format!("[[[{}]]]", key), value)
        })
}

/// Row background for a percentage change.
pub fn bg_color(percent: f64) -> &'static str {
    if percent > 0.0 {
        COLOR_UP
    } else if percent < 0.0 {
        COLOR_DOWN
    } else {
        COLOR_FLAT
    }
}

/// Arrow shown next to a percentage change.
pub fn html_entity(percent: f64) -> &'static str {
    if percent > 0.0 {
        ENTITY_UP
    } else if percent < 0.0 {
        ENTITY_DOWN
    } else {
        ENTITY_FLAT
    }
}

pub fn report_placeholders(
    report: &Report,
    organization: &str,
    subject: &str,
    run_time: DateTime<Utc>,
) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut put = |key: &str, value: String| {
        map.insert(key.to_string(), value);
    };

    put("DATE-TIME-NOW", run_time.format(DATE_FORMAT).to_string());
    put("ORGANIZATION", organization.to_string());
    put("SUBJECT", subject.to_string());

    put("START_DATE_ARCHIVAL", report.archival.start_date.format(DATE_FORMAT).to_string());
    put("END_DATE_ARCHIVAL", report.archival.end_date.format(DATE_FORMAT).to_string());
    put("START_DATE_CURRENT", report.current.start_date.format(DATE_FORMAT).to_string());
    put("END_DATE_CURRENT", report.current.end_date.format(DATE_FORMAT).to_string());

    let change = &report.percentage_change;
    let metrics = [
        ("MIN", report.archival.min_revenue60m, report.current.min_revenue60m, change.min_percent),
        ("MAX", report.archival.max_revenue60m, report.current.max_revenue60m, change.max_percent),
        ("AVG", report.archival.avg_revenue60m, report.current.avg_revenue60m, change.avg_percent),
    ];

    for (name, archival, current, percent) in metrics {
        put(&format!("{}-REVENUE-ARCHIVAL", name), archival.to_string());
        put(&format!("{}-REVENUE-CURRENT", name), current.to_string());
        put(&format!("{}-REVENUE-PERCENT", name), percent.to_string());
        put(&format!("{}-BG-COLOR", name), bg_color(percent).to_string());
        put(&format!("{}-HTML-ENTITY", name), html_entity(percent).to_string());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{PercentageSummary, WindowSummary};
    use chrono::{NaiveDate, TimeZone};

    fn report() -> Report {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        Report {
            archival: WindowSummary {
                start_date: day(1),
                end_date: day(1),
                min_revenue60m: 10.0,
                max_revenue60m: 20.0,
                avg_revenue60m: 15.0,
            },
            current: WindowSummary {
                start_date: day(2),
                end_date: day(2),
                min_revenue60m: 30.0,
                max_revenue60m: 20.0,
                avg_revenue60m: 0.000123,
            },
            percentage_change: PercentageSummary {
                min_percent: 200.0,
                max_percent: 0.0,
                avg_percent: -12.5,
            },
        }
    }

    #[test]
    fn render_replaces_known_placeholders_only() {
        let mut map = BTreeMap::new();
        map.insert("NAME".to_string(), "pool".to_string());

        let html = render("<b>[[[NAME]]]</b> [[[NAME]]] [[[OTHER]]]", &map);
        assert_eq!(html, "<b>pool</b> pool [[[OTHER]]]");
    }

    #[test]
    fn colors_and_entities_follow_sign() {
        assert_eq!(bg_color(1.5), COLOR_UP);
        assert_eq!(bg_color(-0.01), COLOR_DOWN);
        assert_eq!(bg_color(0.0), COLOR_FLAT);
        assert_eq!(html_entity(3.0), ENTITY_UP);
        assert_eq!(html_entity(-3.0), ENTITY_DOWN);
        assert_eq!(html_entity(0.0), ENTITY_FLAT);
    }

    #[test]
    fn placeholders_cover_dates_and_metrics() {
        let run_time = Utc.with_ymd_and_hms(2024, 1, 3, 6, 0, 0).unwrap();
        let map = report_placeholders(&report(), "Acme Mining", "Daily revenue", run_time);

        assert_eq!(map["DATE-TIME-NOW"], "2024-01-03");
        assert_eq!(map["ORGANIZATION"], "Acme Mining");
        assert_eq!(map["START_DATE_ARCHIVAL"], "2024-01-01");
        assert_eq!(map["END_DATE_CURRENT"], "2024-01-02");
        assert_eq!(map["MIN-REVENUE-CURRENT"], "30");
        assert_eq!(map["AVG-REVENUE-CURRENT"], "0.000123");
        assert_eq!(map["AVG-REVENUE-PERCENT"], "-12.5");
        assert_eq!(map["MIN-BG-COLOR"], COLOR_UP);
        assert_eq!(map["MAX-HTML-ENTITY"], ENTITY_FLAT);
        assert_eq!(map["AVG-HTML-ENTITY"], ENTITY_DOWN);
    }

    #[test]
    fn empty_template_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        fs::write(&path, "  \n").unwrap();

        assert!(matches!(load_template(&path), Err(Error::Empty(_))));
        assert!(matches!(
            load_template(&dir.path().join("missing.html")),
            Err(Error::Read { .. })
        ));
    }
}
