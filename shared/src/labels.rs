use crate::charts::bubble::BubblePoint;
use crate::charts::categories::CategorySlice;
use crate::charts::rows::Row;
use crate::format::date::{format_date, parse_date, quarter, DateUnit};
use crate::format::number::{format_long_currency, format_long_number};
use crate::models::point::XValue;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref YEAR_PATTERN: Regex = Regex::new(r"\W*20\d{2}\W*").unwrap();
}

/// Y-axis tick: values above 1000 are abbreviated, anything else passes through
pub fn render_number_label(label: &str) -> String {
    match label.trim().parse::<f64>() {
        Ok(value) if value > 1000.0 => format_long_number(value),
        _ => label.to_string(),
    }
}

/// [`render_number_label`] for a numeric tick
pub fn render_number_tick(value: f64) -> String {
    render_number_label(&XValue::Number(value).key())
}

fn is_english(locale: &str) -> bool {
    locale.trim().to_lowercase().starts_with("en")
}

/// strftime patterns that differ between English and other locales
struct Patterns {
    time: &'static str,
    time_seconds: &'static str,
    medium_date: &'static str,
    full_date: &'static str,
}

impl Patterns {
    fn for_locale(locale: &str) -> Self {
        if is_english(locale) {
            Self {
                time: "%-I:%M %p",
                time_seconds: "%-I:%M:%S %p",
                medium_date: "%b %-d, %Y",
                full_date: "%A, %B %-d, %Y",
            }
        } else {
            Self {
                time: "%H:%M",
                time_seconds: "%H:%M:%S",
                medium_date: "%-d %b %Y",
                full_date: "%A %-d %B %Y",
            }
        }
    }
}

/// Formats date-axis ticks and tooltip titles for one unit, locale and timezone
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateLabeler {
    pub unit: DateUnit,
    pub locale: String,
    pub timezone: Option<String>,
}

impl DateLabeler {
    pub fn new(unit: DateUnit, locale: impl Into<String>) -> Self {
        Self {
            unit,
            locale: locale.into(),
            timezone: None,
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    fn format(&self, date: DateTime<Utc>, pattern: &str) -> String {
        format_date(date, pattern, &self.locale, self.timezone.as_deref())
    }

    /// X-axis tick for position `index`, read from `rows[index]` when there is one
    pub fn axis_label(&self, label: &str, index: usize, rows: &[Row]) -> String {
        let date = match rows.get(index) {
            Some(row) => row.timestamp(),
            None => parse_date(label),
        };
        let Some(date) = date else {
            return label.to_string();
        };

        let patterns = Patterns::for_locale(&self.locale);
        match self.unit {
            DateUnit::Minute if is_english(&self.locale) => self.format(date, "%-I:%M"),
            DateUnit::Minute => self.format(date, "%H:%M"),
            DateUnit::Hour => self.format(date, patterns.time),
            DateUnit::Day => YEAR_PATTERN
                .replace(&self.format(date, patterns.medium_date), "")
                .into_owned(),
            DateUnit::Month => self.format(date, "%b"),
            DateUnit::Year => self.format(date, "%Y"),
            _ => label.to_string(),
        }
    }

    /// Tooltip heading for a hovered date, the raw text when it does not parse
    pub fn tooltip_title(&self, date_text: &str) -> String {
        let Some(date) = parse_date(date_text) else {
            return date_text.to_string();
        };
        self.tooltip_title_at(date)
    }

    fn tooltip_title_at(&self, date: DateTime<Utc>) -> String {
        let patterns = Patterns::for_locale(&self.locale);
        match self.unit {
            DateUnit::Millisecond => date.timestamp_millis().to_string(),
            DateUnit::Second => self.format(date, patterns.time_seconds),
            DateUnit::Minute => self.format(date, patterns.time),
            DateUnit::Hour => format!(
                "{} - {}",
                self.format(date, patterns.time),
                self.format(date, patterns.medium_date)
            ),
            DateUnit::Day | DateUnit::Week => self.format(date, patterns.full_date),
            DateUnit::Month => self.format(date, "%B %Y"),
            DateUnit::Quarter => format!("Q{}", quarter(date, self.timezone.as_deref())),
            DateUnit::Year => self.format(date, "%Y"),
        }
    }
}

/// X-axis tick label; see [`DateLabeler::axis_label`]
pub fn render_date_label(unit: DateUnit, locale: &str, label: &str, index: usize, rows: &[Row]) -> String {
    DateLabeler::new(unit, locale).axis_label(label, index, rows)
}

/// Tooltip value: long currency when a code is given, else a long number
pub fn tooltip_value(value: Option<f64>, currency: Option<&str>, locale: &str) -> String {
    let value = value.unwrap_or(0.0);
    match currency {
        Some(code) if !code.trim().is_empty() => format_long_currency(value, code, locale),
        _ => format_long_number(value),
    }
}

/// The point under the cursor of a bar, line or area chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoveredPoint {
    pub series: String,
    pub value: Option<f64>,
    pub x: XValue,
    pub display_date: Option<String>,
    pub color: Option<String>,
}

impl HoveredPoint {
    /// The field `series` of `row`
    pub fn from_row(row: &Row, series: &str, color: Option<String>) -> Self {
        Self {
            series: series.to_string(),
            value: row.value(series),
            x: row.name.clone(),
            display_date: None,
            color,
        }
    }
}

/// Rich tooltip content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub title: Option<String>,
    pub value: String,
    pub label: String,
    pub color: String,
}

impl Tooltip {
    /// Plain text form, title on its own line
    pub fn text(&self) -> String {
        let body = if self.label.is_empty() {
            self.value.clone()
        } else {
            format!("{} {}", self.value, self.label)
        };
        match &self.title {
            Some(title) => format!("{}\n{}", title, body),
            None => body,
        }
    }
}

/// Builds the tooltip of a hovered point; the title appears only when a unit is known
pub fn build_tooltip(
    point: &HoveredPoint,
    labeler: Option<&DateLabeler>,
    currency: Option<&str>,
    fallback_color: &str,
) -> Tooltip {
    let title = labeler.map(|labeler| {
        let date = match &point.display_date {
            Some(display_date) => parse_date(display_date),
            None => point.x.timestamp(),
        };
        match date {
            Some(date) => labeler.tooltip_title_at(date),
            None => point.display_date.clone().unwrap_or_else(|| point.x.key()),
        }
    });
    let locale = labeler.map(|l| l.locale.as_str()).unwrap_or("en-US");

    Tooltip {
        title,
        value: tooltip_value(point.value, currency, locale),
        label: point.series.clone(),
        color: point.color.clone().unwrap_or_else(|| fallback_color.to_string()),
    }
}

/// `"{value} {name}"` for a pie or doughnut slice
pub fn slice_tooltip(slice: &CategorySlice) -> String {
    format!("{} {}", format_long_number(slice.value), slice.name)
}

/// `"{y} {name}"` for a bubble
pub fn bubble_tooltip(point: &BubblePoint) -> String {
    format!("{} {}", format_long_number(point.y), point.name)
}
