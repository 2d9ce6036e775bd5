use crate::models::point::XValue;
use crate::models::series::Series;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One merged record of a time-series chart.
///
/// `name` holds the shared x value. Every series that had a point at `name`
/// contributes a field under its key: `Some(y)` for a value, `None` for a point
/// whose y was undefined. Series without a point at `name` have no field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub name: XValue,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

impl Row {
    pub fn new(name: impl Into<XValue>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Option<f64>) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Merge key of the row
    pub fn key(&self) -> String {
        self.name.key()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.name.timestamp()
    }

    /// Whether `series` has a field in this row, defined or not
    pub fn has(&self, series: &str) -> bool {
        self.values.contains_key(series)
    }

    /// The defined value of `series`
    pub fn value(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied().flatten()
    }

    /// The value of `series` as drawn, with undefined and absent fields at 0
    pub fn value_or_zero(&self, series: &str) -> f64 {
        self.value(series).unwrap_or(0.0)
    }
}

/// Merges series into one row per distinct x value, in chronological order.
///
/// Rows whose key does not parse as a date keep their first-seen position;
/// see [`sort_chronologically`].
pub fn series_rows(series: &[Series]) -> Vec<Row> {
    let mut rows = merge(
        series
            .iter()
            .flat_map(|s| s.points.iter().map(move |p| (s.key(), &p.x, p.y))),
    );
    sort_chronologically(&mut rows);
    rows
}

/// Inserts `(field, x, y)` triples into rows keyed by x, in first-seen order
pub(crate) fn merge<'a>(entries: impl Iterator<Item = (&'a str, &'a XValue, Option<f64>)>) -> Vec<Row> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Row> = Vec::new();

    for (field, x, y) in entries {
        let slot = *slots.entry(x.key()).or_insert_with(|| {
            rows.push(Row::new(x.clone()));
            rows.len() - 1
        });
        rows[slot].values.insert(field.to_string(), y);
    }

    rows
}

/// Sorts dated rows ascending within the positions dated rows occupy.
///
/// Undated rows never move. Equal timestamps keep their relative order.
pub fn sort_chronologically(rows: &mut [Row]) {
    let dated: Vec<(usize, DateTime<Utc>)> = rows
        .iter()
        .enumerate()
        .filter_map(|(slot, row)| row.timestamp().map(|ts| (slot, ts)))
        .collect();
    if dated.len() < 2 {
        return;
    }

    let mut ordered = dated.clone();
    ordered.sort_by_key(|(_, ts)| *ts);
    let ordered_rows: Vec<Row> = ordered.iter().map(|(slot, _)| rows[*slot].clone()).collect();

    for ((slot, _), row) in dated.iter().zip(ordered_rows) {
        rows[*slot] = row;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::Point;
    use crate::models::series::DEFAULT_SERIES_KEY;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use test_log::test;

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter().map(Row::key).collect()
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(series_rows(&[]).is_empty());
        assert!(series_rows(&[Series::new("a", vec![])]).is_empty());
    }

    #[test]
    fn test_merges_series_per_x_value() {
        let visitors = Series::new(
            "Visitors",
            vec![Point::new("2024-01-02", 5.0), Point::new("2024-01-01", 3.0)],
        );
        let views = Series::new("Views", vec![Point::new("2024-01-01", 9.0)]);

        let rows = series_rows(&[visitors, views]);
        assert_eq!(names(&rows), vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(rows[0].value("Visitors"), Some(3.0));
        assert_eq!(rows[0].value("Views"), Some(9.0));
        assert_eq!(rows[1].value("Visitors"), Some(5.0));
    }

    #[test]
    fn test_absent_and_undefined_are_distinct_from_zero() {
        let a = Series::new("a", vec![Point::new("t1", 1.0), Point::missing("t2")]);
        let b = Series::new("b", vec![Point::new("t1", 0.0)]);

        let rows = series_rows(&[a, b]);
        assert!(rows[0].has("b"));
        assert_eq!(rows[0].value("b"), Some(0.0));

        assert!(!rows[1].has("b"));
        assert!(rows[1].has("a"));
        assert_eq!(rows[1].value("a"), None);
        assert_eq!(rows[1].value_or_zero("a"), 0.0);
    }

    #[test]
    fn test_unlabeled_series_uses_default_key() {
        let series = Series {
            points: vec![Point::new("x", 2.0)],
            ..Default::default()
        };
        let rows = series_rows(&[series]);
        assert_eq!(rows[0].value(DEFAULT_SERIES_KEY), Some(2.0));
    }

    #[test]
    fn test_undated_rows_keep_input_order() {
        let series = Series::new(
            "a",
            vec![
                Point::new("Chrome", 1.0),
                Point::new("2024-03-01", 2.0),
                Point::new("Firefox", 3.0),
                Point::new("2024-01-01", 4.0),
                Point::new("Safari", 5.0),
            ],
        );
        let rows = series_rows(&[series]);
        assert_eq!(
            names(&rows),
            vec!["Chrome", "2024-01-01", "Firefox", "2024-03-01", "Safari"]
        );
    }

    #[test]
    fn test_later_point_overwrites_same_series_field() {
        let series = Series::new("a", vec![Point::new("x", 1.0), Point::new("x", 4.0)]);
        let rows = series_rows(&[series]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("a"), Some(4.0));
    }

    #[test]
    fn test_numeric_and_text_keys_merge() {
        let a = Series::new("a", vec![Point::new(3.0, 1.0)]);
        let b = Series::new("b", vec![Point::new("3", 2.0)]);
        let rows = series_rows(&[a, b]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("b"), Some(2.0));
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = Row::new("2024-01-01")
            .with_value("Visitors", Some(3.0))
            .with_value("Views", None);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "2024-01-01", "Visitors": 3.0, "Views": null})
        );
    }

    const KEYS: [&str; 8] = [
        "2024-01-03", "2024-01-01", "Chrome", "2023-12-31", "Firefox", "2024-02-10T08:00:00Z",
        "/pricing", "2024-01-02",
    ];

    fn arb_series() -> impl Strategy<Value = Vec<Series>> {
        let point = (0..KEYS.len(), proptest::option::of(-1e6f64..1e6)).prop_map(|(k, y)| Point {
            x: XValue::from(KEYS[k]),
            y,
            z: None,
            display_date: None,
        });
        prop::collection::vec(prop::collection::vec(point, 0..12), 0..4).prop_map(|all| {
            all.into_iter()
                .enumerate()
                .map(|(i, points)| Series::new(format!("s{}", i), points))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_one_row_per_distinct_x(series in arb_series()) {
            let distinct: HashSet<String> = series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.x.key()))
                .collect();
            prop_assert_eq!(series_rows(&series).len(), distinct.len());
        }

        #[test]
        fn prop_dated_rows_are_ascending(series in arb_series()) {
            let stamps: Vec<_> = series_rows(&series).iter().filter_map(Row::timestamp).collect();
            prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_undated_rows_keep_first_seen_order(series in arb_series()) {
            let mut first_seen: Vec<String> = Vec::new();
            for point in series.iter().flat_map(|s| s.points.iter()) {
                let key = point.x.key();
                if point.x.timestamp().is_none() && !first_seen.contains(&key) {
                    first_seen.push(key);
                }
            }
            let undated: Vec<String> = series_rows(&series)
                .iter()
                .filter(|r| r.timestamp().is_none())
                .map(Row::key)
                .collect();
            prop_assert_eq!(undated, first_seen);
        }

        #[test]
        fn prop_series_rows_is_idempotent(series in arb_series()) {
            prop_assert_eq!(series_rows(&series), series_rows(&series));
        }
    }
}
