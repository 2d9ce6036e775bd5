use crate::error::{Result, SharedError};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

const NAIVE_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Leniently parses a chart x value as a UTC date.
///
/// Accepts RFC 3339 / RFC 2822 timestamps, naive `YYYY-MM-DD[ HH:MM[:SS[.fff]]]`
/// values (read as UTC), `YYYY-MM` and bare four digit years. Anything else is `None`.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return midnight(date);
        }
    }

    // "2024-05"
    if text.len() == 7 && text.as_bytes()[4] == b'-' {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") {
            return midnight(date);
        }
    }

    // "2024"
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight);
    }

    None
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// Epoch milliseconds to a UTC date, `None` when out of range or not finite
pub fn timestamp_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Time bucket granularity of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateUnit::Millisecond => "millisecond",
            DateUnit::Second => "second",
            DateUnit::Minute => "minute",
            DateUnit::Hour => "hour",
            DateUnit::Day => "day",
            DateUnit::Week => "week",
            DateUnit::Month => "month",
            DateUnit::Quarter => "quarter",
            DateUnit::Year => "year",
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateUnit {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "millisecond" => Ok(DateUnit::Millisecond),
            "second" => Ok(DateUnit::Second),
            "minute" => Ok(DateUnit::Minute),
            "hour" => Ok(DateUnit::Hour),
            "day" => Ok(DateUnit::Day),
            "week" => Ok(DateUnit::Week),
            "month" => Ok(DateUnit::Month),
            "quarter" => Ok(DateUnit::Quarter),
            "year" => Ok(DateUnit::Year),
            _ => Err(SharedError::InvalidUnit(s.to_string())),
        }
    }
}

/// Region used when a locale names only a language
fn default_region(language: &str) -> Option<&'static str> {
    Some(match language {
        "en" => "en_US",
        "de" => "de_DE",
        "fr" => "fr_FR",
        "es" => "es_ES",
        "it" => "it_IT",
        "nl" => "nl_NL",
        "pt" => "pt_PT",
        "ru" => "ru_RU",
        "pl" => "pl_PL",
        "sv" => "sv_SE",
        "ja" => "ja_JP",
        "zh" => "zh_CN",
        "ko" => "ko_KR",
        "tr" => "tr_TR",
        _ => return None,
    })
}

/// Resolves a web locale such as `en-US` or `fr` to a chrono locale, falling back to `en_US`
pub fn resolve_locale(locale: &str) -> Locale {
    let normalized = locale.trim().replace('-', "_");
    if let Ok(resolved) = Locale::try_from(normalized.as_str()) {
        return resolved;
    }

    let language = normalized.split('_').next().unwrap_or_default().to_lowercase();
    if let Some(resolved) = default_region(&language).and_then(|l| Locale::try_from(l).ok()) {
        return resolved;
    }

    debug!("Unknown locale '{}', using en_US", locale);
    Locale::en_US
}

static TIMEZONE_CACHE: Lazy<Mutex<HashMap<String, Option<Tz>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Looks up an IANA timezone, remembering both hits and misses
pub fn resolve_timezone(name: &str) -> Option<Tz> {
    if let Ok(cache) = TIMEZONE_CACHE.lock() {
        if let Some(cached) = cache.get(name) {
            return *cached;
        }
    }

    let parsed = name.parse::<Tz>().ok();
    if parsed.is_none() {
        debug!("Unknown timezone '{}', formatting in UTC", name);
    }
    if let Ok(mut cache) = TIMEZONE_CACHE.lock() {
        cache.insert(name.to_string(), parsed);
    }
    parsed
}

/// Formats `date` with a strftime pattern, localized names and an optional timezone
pub fn format_date(date: DateTime<Utc>, pattern: &str, locale: &str, timezone: Option<&str>) -> String {
    let locale = resolve_locale(locale);
    match timezone.and_then(resolve_timezone) {
        Some(tz) => date.with_timezone(&tz).format_localized(pattern, locale).to_string(),
        None => date.format_localized(pattern, locale).to_string(),
    }
}

/// Calendar quarter (1-4) of `date` in the given timezone
pub fn quarter(date: DateTime<Utc>, timezone: Option<&str>) -> u32 {
    use chrono::Datelike;
    let month = match timezone.and_then(resolve_timezone) {
        Some(tz) => date.with_timezone(&tz).month(),
        None => date.month(),
    };
    (month - 1) / 3 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("2024-01-15T10:30:00Z" ; "rfc3339")]
    #[test_case("2024-01-15T10:30:00.000Z" ; "rfc3339 with millis")]
    #[test_case("2024-01-15 10:30:00" ; "naive with space")]
    #[test_case("2024-01-15T10:30:00" ; "naive with t")]
    #[test_case("2024-01-15T10:30" ; "naive without seconds")]
    fn test_parse_datetime_formats(input: &str) {
        let dt = parse_date(input).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test_log::test]
    fn test_parse_date_only_formats() {
        assert_eq!(parse_date("2024-03-05").unwrap().day(), 5);
        assert_eq!(parse_date("2024-03").unwrap().month(), 3);
        assert_eq!(parse_date("2024").unwrap().year(), 2024);
    }

    #[test_case("" ; "empty")]
    #[test_case("Chrome" ; "category label")]
    #[test_case("2024-13-45" ; "out of range")]
    #[test_case("/pricing" ; "path")]
    fn test_unparseable_dates(input: &str) {
        assert_eq!(parse_date(input), None);
    }

    #[test_log::test]
    fn test_timestamp_from_millis() {
        let dt = timestamp_from_millis(86_400_000.0).unwrap();
        assert_eq!(dt.day(), 2);
        assert_eq!(timestamp_from_millis(f64::NAN), None);
    }

    #[test_log::test]
    fn test_date_unit_round_trip() {
        assert_eq!("Hour".parse::<DateUnit>().unwrap(), DateUnit::Hour);
        assert_eq!(DateUnit::Quarter.to_string(), "quarter");
        assert!(matches!(
            "fortnight".parse::<DateUnit>(),
            Err(SharedError::InvalidUnit(_))
        ));
    }

    #[test_log::test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale("en-US"), Locale::en_US);
        assert_eq!(resolve_locale("fr_FR"), Locale::fr_FR);
        assert_eq!(resolve_locale("de"), Locale::de_DE);
        assert_eq!(resolve_locale("xx-YY"), Locale::en_US);
    }

    #[test_log::test]
    fn test_format_date_with_timezone() {
        let dt = parse_date("2024-01-15T12:00:00Z").unwrap();
        assert_eq!(format_date(dt, "%H:%M", "en-US", None), "12:00");
        assert_eq!(format_date(dt, "%H:%M", "en-US", Some("America/Chicago")), "06:00");
        assert_eq!(format_date(dt, "%H:%M", "en-US", Some("Not/AZone")), "12:00");
    }

    #[test_log::test]
    fn test_localized_month_names() {
        let dt = parse_date("2024-03-01").unwrap();
        assert_eq!(format_date(dt, "%B", "en-US", None), "March");
        assert_eq!(format_date(dt, "%B", "fr-FR", None), "mars");
    }

    #[test_log::test]
    fn test_quarter() {
        let dt = parse_date("2024-11-02").unwrap();
        assert_eq!(quarter(dt, None), 4);
        assert_eq!(quarter(parse_date("2024-01-01T02:00:00Z").unwrap(), Some("America/New_York")), 4);
    }
}
