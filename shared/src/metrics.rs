use crate::format::number::{format_long_number, format_number_locale};
use crate::format::rate::{bounce_rate, format_bounce_rate, format_change, format_percent, percent_change};
use crate::format::time::format_visit_duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Add;

/// A metric over the selected period and the period before it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricValue {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub prev: f64,
}

impl MetricValue {
    pub fn new(value: f64, prev: f64) -> Self {
        Self { value, prev }
    }

    pub fn change(&self) -> f64 {
        percent_change(self.value, self.prev)
    }
}

impl Add for MetricValue {
    type Output = MetricValue;

    fn add(self, other: MetricValue) -> MetricValue {
        let finite = |n: f64| if n.is_finite() { n } else { 0.0 };
        MetricValue {
            value: finite(self.value) + finite(other.value),
            prev: finite(self.prev) + finite(other.prev),
        }
    }
}

/// Stats endpoint response for one website
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebsiteStats {
    #[serde(default)]
    pub pageviews: MetricValue,
    #[serde(default)]
    pub visitors: MetricValue,
    #[serde(default)]
    pub visits: MetricValue,
    #[serde(default)]
    pub bounces: MetricValue,
    #[serde(default)]
    pub totaltime: MetricValue,
}

/// Totals across every website of a team or user
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryTotals {
    pub pageviews: MetricValue,
    pub visitors: MetricValue,
    pub visits: MetricValue,
    pub bounces: MetricValue,
}

/// A headline number with its change against the previous period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub change: f64,
    /// A decrease is the good direction
    pub reverse_colors: bool,
}

impl SummaryCard {
    fn new(title: &str, value: String, change: f64) -> Self {
        Self {
            title: title.to_string(),
            value,
            change,
            reverse_colors: false,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Whether the change goes in the good direction for this metric
    pub fn is_improvement(&self) -> bool {
        self.is_positive() != self.reverse_colors
    }

    pub fn change_label(&self) -> String {
        format_change(self.change)
    }
}

impl SummaryTotals {
    pub fn from_stats(stats: &[WebsiteStats]) -> Self {
        stats.iter().fold(Self::default(), |acc, stat| Self {
            pageviews: acc.pageviews + stat.pageviews,
            visitors: acc.visitors + stat.visitors,
            visits: acc.visits + stat.visits,
            bounces: acc.bounces + stat.bounces,
        })
    }

    pub fn bounce_rate(&self) -> MetricValue {
        MetricValue::new(
            bounce_rate(self.visits.value, self.bounces.value),
            bounce_rate(self.visits.prev, self.bounces.prev),
        )
    }

    /// Pageviews, Visitors, Sessions and Bounce Rate cards
    pub fn cards(&self) -> Vec<SummaryCard> {
        let rate = self.bounce_rate();
        vec![
            SummaryCard::new("Pageviews", format_long_number(self.pageviews.value), self.pageviews.change()),
            SummaryCard::new("Visitors", format_long_number(self.visitors.value), self.visitors.change()),
            SummaryCard::new("Sessions", format_long_number(self.visits.value), self.visits.change()),
            SummaryCard {
                reverse_colors: true,
                ..SummaryCard::new("Bounce Rate", format_percent(rate.value), rate.value - rate.prev)
            },
        ]
    }
}

/// Percent change shown on a metric card whose `change` is an absolute difference
pub fn metric_change_percent(value: f64, change: f64) -> f64 {
    let previous = value - change;
    if previous == 0.0 || !previous.is_finite() {
        return 0.0;
    }
    change / previous * 100.0
}

/// Change percentage as drawn on a metric card: whole, unsigned, e.g. `12%`
pub fn format_metric_change(value: f64, change: f64) -> String {
    format!("{}%", metric_change_percent(value, change).trunc().abs() as i64)
}

/// SVG path of a sparkline fitted into `width` x `height` with `padding` on every side.
///
/// The vertical scale always spans at least 0 to 1. A single point sits at the
/// left padding.
pub fn sparkline_path(data: &[f64], width: f64, height: f64, padding: f64) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max = data.iter().copied().fold(1.0_f64, f64::max);
    let min = data.iter().copied().fold(0.0_f64, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let inner_width = width - padding * 2.0;
    let inner_height = height - padding * 2.0;
    let steps = (data.len() - 1).max(1) as f64;

    let points: Vec<String> = data
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = padding + (i as f64 / steps) * inner_width;
            let y = padding + inner_height - ((value - min) / range) * inner_height;
            format!("{},{}", x, y)
        })
        .collect();

    format!("M {}", points.join(" L "))
}

/// One row of a breakdown report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BreakdownRow {
    #[serde(default)]
    pub visitors: f64,
    #[serde(default)]
    pub visits: f64,
    #[serde(default)]
    pub views: f64,
    #[serde(default)]
    pub bounces: f64,
    #[serde(default)]
    pub totaltime: f64,
    /// Grouping fields such as `path` or `browser`
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Display strings of the metric columns of a [`BreakdownRow`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownCells {
    pub visitors: String,
    pub visits: String,
    pub views: String,
    pub bounce_rate: String,
    pub visit_duration: String,
}

impl BreakdownRow {
    pub fn cells(&self, locale: &str) -> BreakdownCells {
        BreakdownCells {
            visitors: format_number_locale(self.visitors, locale),
            visits: format_number_locale(self.visits, locale),
            views: format_number_locale(self.views, locale),
            bounce_rate: format_bounce_rate(self.visits, self.bounces),
            visit_duration: format_visit_duration(self.totaltime, self.visits),
        }
    }

    /// Display value of a grouping field
    pub fn field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}
