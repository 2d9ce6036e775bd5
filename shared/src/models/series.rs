use crate::error::Result;
use crate::models::point::{ChartJsPoints, Point, PointNormalizer};
use crate::theme::palette_color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used for a series that carries none
pub const DEFAULT_SERIES_KEY: &str = "value";

/// How a series is drawn inside a bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    #[default]
    Bar,
    Line,
}

impl SeriesKind {
    fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some(kind) if kind.eq_ignore_ascii_case("line") => SeriesKind::Line,
            _ => SeriesKind::Bar,
        }
    }
}

/// A named sequence of normalized points
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub label: Option<String>,
    pub kind: SeriesKind,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: Some(label.into()),
            points,
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Field name this series writes into merged rows
    pub fn key(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_SERIES_KEY,
        }
    }

    /// Fill color for bars, bubbles and legend swatches
    pub fn fill_color(&self, index: usize, palette: &[String]) -> String {
        self.background_color
            .clone()
            .or_else(|| self.border_color.clone())
            .unwrap_or_else(|| palette_color(palette, index))
    }

    /// Stroke color for lines and areas
    pub fn stroke_color(&self, index: usize, palette: &[String]) -> String {
        self.border_color
            .clone()
            .or_else(|| self.background_color.clone())
            .unwrap_or_else(|| palette_color(palette, index))
    }
}

/// A dataset color: one color for everything, or one per data entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    Many(Vec<String>),
}

impl ColorSpec {
    /// Color for entry `index`, cycling a list by its own length
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            ColorSpec::Single(color) => Some(color.as_str()),
            ColorSpec::Many(colors) if colors.is_empty() => None,
            ColorSpec::Many(colors) => Some(colors[index % colors.len()].as_str()),
        }
    }

    /// Single color used for a whole series
    pub fn first(&self) -> Option<&str> {
        self.at(0)
    }
}

/// One dataset in the Chart.js shaped payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub background_color: Option<ColorSpec>,
    #[serde(default)]
    pub border_color: Option<ColorSpec>,
}

impl Dataset {
    pub fn to_series(&self, normalizer: &impl PointNormalizer) -> Series {
        Series {
            label: self.label.clone(),
            kind: SeriesKind::from_type(self.kind.as_deref()),
            background_color: self
                .background_color
                .as_ref()
                .and_then(|c| c.first())
                .map(str::to_string),
            border_color: self
                .border_color
                .as_ref()
                .and_then(|c| c.first())
                .map(str::to_string),
            points: normalizer.normalize_all(&self.data),
        }
    }

    /// Raw data read as one numeric value per entry (pie and doughnut charts)
    pub fn values(&self) -> Vec<Option<f64>> {
        self.data
            .iter()
            .map(|value| match value {
                Value::Number(n) => n.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                Value::Object(fields) => fields.get("y").and_then(Value::as_f64),
                _ => None,
            })
            .collect()
    }
}

/// Chart data as delivered by the data-fetching layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalizes every dataset with the Chart.js point rules
    pub fn series(&self) -> Vec<Series> {
        self.series_with(&ChartJsPoints)
    }

    pub fn series_with(&self, normalizer: &impl PointNormalizer) -> Vec<Series> {
        self.datasets
            .iter()
            .map(|dataset| dataset.to_series(normalizer))
            .collect()
    }

    pub fn has_line_series(&self) -> bool {
        self.datasets
            .iter()
            .any(|d| SeriesKind::from_type(d.kind.as_deref()) == SeriesKind::Line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::point::XValue;
    use crate::SharedError;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const PAYLOAD: &str = r##"{
        "datasets": [
            {"label": "Visitors", "data": [{"x": "2024-01-01", "y": 3}, {"x": "2024-01-02", "y": 5}], "backgroundColor": "#2680eb"},
            {"type": "line", "data": [{"x": "2024-01-01", "y": 7}], "borderColor": ["#9256d9", "#44b556"]}
        ]
    }"##;

    #[test]
    fn test_payload_to_series() {
        let payload = ChartPayload::from_json(PAYLOAD).unwrap();
        let series = payload.series();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key(), "Visitors");
        assert_eq!(series[0].kind, SeriesKind::Bar);
        assert_eq!(series[0].points[1].x, XValue::from("2024-01-02"));
        assert_eq!(series[1].key(), DEFAULT_SERIES_KEY);
        assert_eq!(series[1].kind, SeriesKind::Line);
        assert_eq!(series[1].border_color.as_deref(), Some("#9256d9"));
        assert!(payload.has_line_series());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let payload = ChartPayload::from_json("{}").unwrap();
        assert!(payload.labels.is_empty());
        assert!(payload.series().is_empty());
    }

    #[test]
    fn test_malformed_json_is_conversion_error() {
        let err = ChartPayload::from_json("{\"datasets\": 3}").unwrap_err();
        assert!(matches!(err, SharedError::Conversion(_)));
    }

    #[test]
    fn test_series_colors_fall_back_to_palette() {
        let palette = vec!["#111111".to_string(), "#222222".to_string()];
        let plain = Series::new("a", vec![]);
        assert_eq!(plain.fill_color(3, &palette), "#222222");

        let mut bordered = Series::new("b", vec![]);
        bordered.border_color = Some("#abcdef".to_string());
        assert_eq!(bordered.fill_color(0, &palette), "#abcdef");
        assert_eq!(bordered.with_color("#fedcba").stroke_color(0, &palette), "#abcdef");
    }

    #[test]
    fn test_color_spec_cycles() {
        let many = ColorSpec::Many(vec!["#a".to_string(), "#b".to_string()]);
        assert_eq!(many.at(3), Some("#b"));
        assert_eq!(ColorSpec::Many(vec![]).at(0), None);
        assert_eq!(ColorSpec::Single("#c".to_string()).at(9), Some("#c"));
    }

    #[test]
    fn test_dataset_values() {
        let dataset = Dataset {
            data: vec![serde_json::json!(5), serde_json::json!("2.5"), serde_json::json!(null)],
            ..Default::default()
        };
        assert_eq!(dataset.values(), vec![Some(5.0), Some(2.5), None]);
    }
}
