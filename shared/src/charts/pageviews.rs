use crate::charts::rows::{merge, sort_chronologically, Row};
use crate::error::Result;
use crate::models::point::{ChartJsPoints, Point, PointNormalizer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Previous-period series aligned to the current buckets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparePeriod {
    pub pageviews: Vec<Point>,
    pub sessions: Vec<Point>,
}

/// Pageview and session series of one website
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageviewData {
    pub pageviews: Vec<Point>,
    pub sessions: Vec<Point>,
    pub compare: Option<ComparePeriod>,
}

#[derive(Debug, Deserialize)]
struct PageviewPayload {
    #[serde(default)]
    pageviews: Vec<Value>,
    #[serde(default)]
    sessions: Vec<Value>,
    #[serde(default)]
    compare: Option<Box<PageviewPayload>>,
}

impl PageviewData {
    pub fn new(pageviews: Vec<Point>, sessions: Vec<Point>) -> Self {
        Self {
            pageviews,
            sessions,
            compare: None,
        }
    }

    /// Parses the pageviews endpoint response, aligning any `compare` block
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: PageviewPayload = serde_json::from_str(json)?;
        let data = Self::new(
            ChartJsPoints.normalize_all(&payload.pageviews),
            ChartJsPoints.normalize_all(&payload.sessions),
        );

        Ok(match payload.compare {
            Some(previous) => {
                let previous = Self::new(
                    ChartJsPoints.normalize_all(&previous.pageviews),
                    ChartJsPoints.normalize_all(&previous.sessions),
                );
                data.with_compare(&previous)
            }
            None => data,
        })
    }

    /// Attaches `previous` as the comparison overlay of this period
    pub fn with_compare(mut self, previous: &PageviewData) -> Self {
        self.compare = Some(ComparePeriod {
            pageviews: compare_series(&self.pageviews, &previous.pageviews),
            sessions: compare_series(&self.sessions, &previous.sessions),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pageviews.is_empty()
    }
}

/// Aligns the previous period onto the current buckets by index.
///
/// Each point keeps the current x, takes the previous y at the same index
/// (0 when missing) and remembers the previous x as its display date.
pub fn compare_series(current: &[Point], previous: &[Point]) -> Vec<Point> {
    current
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let prior = previous.get(i);
            Point {
                x: point.x.clone(),
                y: Some(prior.and_then(|p| p.y).unwrap_or(0.0)),
                z: None,
                display_date: prior.map(|p| p.x.key()),
            }
        })
        .collect()
}

/// Rows for the visitors/views area chart.
///
/// Sessions land under `visitors_label` and pageviews under `views_label`;
/// undefined values become 0. No pageviews means no rows.
pub fn pageview_rows(data: &PageviewData, visitors_label: &str, views_label: &str) -> Vec<Row> {
    if data.is_empty() {
        return Vec::new();
    }

    let sessions = data.sessions.iter().map(|p| (visitors_label, &p.x, Some(p.y.unwrap_or(0.0))));
    let pageviews = data.pageviews.iter().map(|p| (views_label, &p.x, Some(p.y.unwrap_or(0.0))));

    let mut rows = merge(sessions.chain(pageviews));
    sort_chronologically(&mut rows);
    rows
}
