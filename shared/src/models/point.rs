use crate::format::date::{parse_date, timestamp_from_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// X coordinate of a chart point: a timestamp or category label, or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl XValue {
    /// Key used to merge points from different series into one row
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Parses the value as a date. Numbers are epoch milliseconds.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            XValue::Number(millis) => timestamp_from_millis(*millis),
            XValue::Text(text) => parse_date(text),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            XValue::Number(n) => Some(*n),
            XValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            XValue::Number(n) => write!(f, "{}", n),
            XValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for XValue {
    fn from(text: &str) -> Self {
        XValue::Text(text.to_string())
    }
}

impl From<String> for XValue {
    fn from(text: String) -> Self {
        XValue::Text(text)
    }
}

impl From<f64> for XValue {
    fn from(n: f64) -> Self {
        XValue::Number(n)
    }
}

/// A normalized chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: XValue,
    /// `None` when the source point carried no y value
    pub y: Option<f64>,
    /// Magnitude for bubble charts
    pub z: Option<f64>,
    /// Original timestamp to display when `x` is a shared bucket key
    pub display_date: Option<String>,
}

impl Point {
    pub fn new(x: impl Into<XValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y: Some(y),
            z: None,
            display_date: None,
        }
    }

    /// A point whose y value is undefined
    pub fn missing(x: impl Into<XValue>) -> Self {
        Self {
            x: x.into(),
            y: None,
            z: None,
            display_date: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_display_date(mut self, date: impl Into<String>) -> Self {
        self.display_date = Some(date.into());
        self
    }
}

/// Turns a raw point from the data-fetching layer into a [`Point`]
pub trait PointNormalizer {
    fn normalize(&self, raw: &Value) -> Option<Point>;

    fn normalize_all(&self, raw: &[Value]) -> Vec<Point> {
        raw.iter().filter_map(|value| self.normalize(value)).collect()
    }
}

/// Normalizer for Chart.js style points: `{x, y}`, `{d, y}`, `{t, y}`, `{x, y, z|r}` or a bare scalar
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartJsPoints;

const X_FIELDS: [&str; 3] = ["x", "d", "t"];

impl PointNormalizer for ChartJsPoints {
    fn normalize(&self, raw: &Value) -> Option<Point> {
        match raw {
            Value::Null => None,
            Value::Object(fields) => Some(normalize_object(raw, fields)),
            Value::Number(n) => {
                let value = n.as_f64()?;
                Some(Point::new(value, value))
            }
            Value::String(text) => Some(Point {
                x: XValue::Text(text.clone()),
                y: text.trim().parse::<f64>().ok().filter(|y| y.is_finite()),
                z: None,
                display_date: None,
            }),
            other => Some(Point::missing(other.to_string())),
        }
    }
}

fn normalize_object(raw: &Value, fields: &Map<String, Value>) -> Point {
    let resolved = X_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(x_value).map(|x| (*name, x)));

    let (x, display_date) = match resolved {
        Some(("x", x)) => (x, fields.get("d").and_then(x_value).map(|d| d.key())),
        Some((_, x)) => (x, None),
        None => (XValue::Text(raw.to_string()), None),
    };

    Point {
        x,
        y: fields.get("y").and_then(number),
        z: fields.get("z").and_then(number).or_else(|| fields.get("r").and_then(number)),
        display_date,
    }
}

fn x_value(value: &Value) -> Option<XValue> {
    match value {
        Value::String(text) if !text.is_empty() => Some(XValue::Text(text.clone())),
        Value::Number(n) => n.as_f64().map(XValue::Number),
        Value::Bool(b) => Some(XValue::Text(b.to_string())),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}
