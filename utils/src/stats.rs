use crate::math::percent_change;
use crate::store::SampleRecord;

/// Summary of the `revenue60m` values of a record set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,

    // Number of records that carried a revenue value
    pub count: usize,
}

/// Min, max and unweighted mean over every record that has a revenue value.
///
/// Returns `None` when no record has one. Each sample counts once, so days
/// with more samples weigh more in the mean.
pub fn compute_statistics(records: &[SampleRecord]) -> Option<Statistics> {
    let mut revenues = records.iter().filter_map(|r| r.revenue60m);

    let first = revenues.next()?;
    let (mut min, mut max, mut sum, mut count) = (first, first, first, 1usize);

    for v in revenues {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    Some(Statistics {
        min,
        max,
        avg: sum / count as f64,
        count,
    })
}

/// Per-metric relative change of a current window against an archival one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentageChange {
    pub min_percent: f64,
    pub max_percent: f64,
    pub avg_percent: f64,
}

impl PercentageChange {
    pub fn between(current: &Statistics, archival: &Statistics) -> Self {
        Self {
            min_percent: percent_change(current.min, archival.min),
            max_percent: percent_change(current.max, archival.max),
            avg_percent: percent_change(current.avg, archival.avg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[f64]) -> Vec<SampleRecord> {
        values
            .iter()
            .map(|v| SampleRecord::new(*v, "2024-01-01 00:00:00".to_string()))
            .collect()
    }

    #[test]
    fn computes_min_max_avg() {
        let stats = compute_statistics(&records(&[10.0, 20.0, 30.0, 40.0])).unwrap();
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.avg, 25.0);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let a = compute_statistics(&records(&[3.0, 1.0, 3.0, 2.0])).unwrap();
        let b = compute_statistics(&records(&[1.0, 2.0, 3.0, 3.0])).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.avg, 2.25);
    }

    #[test]
    fn avg_lies_between_min_and_max() {
        let sets: [&[f64]; 4] = [
            &[0.000123, 0.000456, 0.000789],
            &[-5.0, 5.0],
            &[7.7],
            &[1e-9, 1e9, 42.0, 42.0, 0.0],
        ];
        for set in sets {
            let stats = compute_statistics(&records(set)).unwrap();
            assert!(stats.min <= stats.avg && stats.avg <= stats.max, "{:?}", stats);
        }
    }

    #[test]
    fn empty_and_revenue_less_sets_are_undefined() {
        assert_eq!(compute_statistics(&[]), None);

        let no_revenue = vec![
            SampleRecord {
                revenue60m: None,
                datetime_utc: Some("2024-01-01 00:00:00".to_string()),
            },
            SampleRecord::default(),
        ];
        assert_eq!(compute_statistics(&no_revenue), None);
    }

    #[test]
    fn records_without_revenue_are_ignored() {
        let mut set = records(&[4.0, 8.0]);
        set.insert(1, SampleRecord::default());

        let stats = compute_statistics(&set).unwrap();
        assert_eq!(stats.avg, 6.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn percentage_change_per_metric() {
        let archival = compute_statistics(&records(&[10.0, 20.0])).unwrap();
        let current = compute_statistics(&records(&[30.0])).unwrap();

        let change = PercentageChange::between(&current, &archival);
        assert_eq!(change.min_percent, 200.0);
        assert_eq!(change.max_percent, 50.0);
        assert_eq!(change.avg_percent, 100.0);
    }

    #[test]
    fn zero_archival_metric_yields_zero_change() {
        let archival = compute_statistics(&records(&[0.0, 10.0])).unwrap();
        let current = compute_statistics(&records(&[5.0, 20.0])).unwrap();

        let change = PercentageChange::between(&current, &archival);
        assert_eq!(change.min_percent, 0.0);
        assert_eq!(change.max_percent, 100.0);
    }
}
