use crate::error::Result;
use crate::format::date::{resolve_timezone, DateUnit};
use crate::labels::DateLabeler;
use crate::theme::{chart_palette, Rgb};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Chart drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000"))]
    pub width: u32,
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000"))]
    pub height: u32,
    #[validate(custom(function = "validate_colors"))]
    pub colors: Vec<String>,
    pub show_legend: bool,
    pub show_grid: bool,
    pub stacked: bool,
    #[validate(range(min = 1, max = 200, message = "Bar size must be between 1 and 200"))]
    pub bar_size: u32,
    pub animation: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Beacon Chart".to_string(),
            width: 800,
            height: 500,
            colors: chart_palette(),
            show_legend: true,
            show_grid: true,
            stacked: false,
            bar_size: 32,
            animation: true,
        }
    }
}

/// Dashboard-wide display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    #[validate(length(min = 2, max = 35, message = "Locale must be 2-35 characters"))]
    pub locale: String,
    #[validate(custom(function = "validate_timezone"))]
    pub timezone: Option<String>,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    pub default_unit: DateUnit,
    #[validate(range(max = 10000, message = "Animation duration must be at most 10000ms"))]
    pub animation_duration: u32,
    #[validate]
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            timezone: None,
            currency: None,
            default_unit: DateUnit::Day,
            animation_duration: 1000,
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a JSON config; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Date labeler for `unit`, or the default unit, in this config's locale and timezone
    pub fn labeler(&self, unit: Option<DateUnit>) -> DateLabeler {
        let labeler = DateLabeler::new(unit.unwrap_or(self.default_unit), self.locale.clone());
        match &self.timezone {
            Some(timezone) => labeler.with_timezone(timezone.clone()),
            None => labeler,
        }
    }
}

fn validate_timezone(timezone: &String) -> std::result::Result<(), ValidationError> {
    if resolve_timezone(timezone).is_none() {
        let mut err = ValidationError::new("timezone");
        err.message = Some(format!("Unknown timezone: {}", timezone).into());
        return Err(err);
    }
    Ok(())
}

fn validate_currency(code: &String) -> std::result::Result<(), ValidationError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        let mut err = ValidationError::new("currency");
        err.message = Some("Currency must be a three letter ISO code".into());
        return Err(err);
    }
    Ok(())
}

fn validate_colors(colors: &Vec<String>) -> std::result::Result<(), ValidationError> {
    if let Some(bad) = colors.iter().find(|c| Rgb::from_hex(c).is_err()) {
        let mut err = ValidationError::new("color");
        err.message = Some(format!("Invalid color: {}", bad).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SharedError;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chart.colors.len(), 12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"locale": "de-DE", "timezone": "Europe/Berlin", "chart": {"stacked": true}}"#,
        )
        .unwrap();
        assert_eq!(config.locale, "de-DE");
        assert_eq!(config.animation_duration, 1000);
        assert!(config.chart.stacked);
        assert_eq!(config.chart.width, 800);

        let labeler = config.labeler(Some(DateUnit::Hour));
        assert_eq!(labeler.unit, DateUnit::Hour);
        assert_eq!(labeler.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        for json in [
            r#"{"timezone": "Mars/Olympus"}"#,
            r#"{"currency": "dollars"}"#,
            r#"{"chart": {"width": 10}}"#,
            r##"{"chart": {"colors": ["#12"]}}"##,
            r##"{"chart": {"colors": ["#ab€d"]}}"##,
            r#"{"locale": ""}"#,
        ] {
            let err = DashboardConfig::from_json(json).unwrap_err();
            assert!(matches!(err, SharedError::Validation(_)), "{}", json);
        }
    }

    #[test]
    fn test_malformed_json_is_conversion_error() {
        let err = DashboardConfig::from_json("{\"locale\": 5}").unwrap_err();
        assert!(matches!(err, SharedError::Conversion(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = DashboardConfig {
            currency: Some("EUR".to_string()),
            default_unit: DateUnit::Month,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(DashboardConfig::from_json(&json).unwrap(), config);
    }
}
