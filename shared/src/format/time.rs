/// A unit that can appear in a short duration string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Day => "d",
            TimeUnit::Hour => "h",
            TimeUnit::Minute => "m",
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
        }
    }

    fn millis(&self) -> u64 {
        match self {
            TimeUnit::Day => 86_400_000,
            TimeUnit::Hour => 3_600_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Second => 1_000,
            TimeUnit::Millisecond => 1,
        }
    }
}

/// Units shown in visit durations
pub const MINUTES_SECONDS: [TimeUnit; 2] = [TimeUnit::Minute, TimeUnit::Second];

/// A duration split into calendar-free parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub ms: u64,
}

/// Splits a non-negative number of seconds into parts
pub fn parse_time(seconds: f64) -> TimeParts {
    if !seconds.is_finite() || seconds <= 0.0 {
        return TimeParts::default();
    }

    let total_ms = (seconds * 1000.0).round() as u64;
    TimeParts {
        days: total_ms / 86_400_000,
        hours: total_ms / 3_600_000 % 24,
        minutes: total_ms / 60_000 % 60,
        seconds: total_ms / 1000 % 60,
        ms: total_ms % 1000,
    }
}

/// Formats a duration using only the requested units.
///
/// Time in larger units that were not requested rolls into the next requested
/// unit, so `3700` seconds with minutes and seconds reads `61m 40s`. Zero-valued
/// parts are skipped; when nothing is left the result is `0` plus the last unit.
pub fn format_short_time(seconds: f64, units: &[TimeUnit], separator: &str) -> String {
    let mut units = units.to_vec();
    units.sort();
    units.dedup();

    let Some(last) = units.last().copied() else {
        return String::new();
    };

    let mut remaining = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let mut parts = Vec::new();
    for unit in &units {
        let count = remaining / unit.millis();
        remaining %= unit.millis();
        if count > 0 {
            parts.push(format!("{}{}", count, unit.suffix()));
        }
    }

    if parts.is_empty() {
        format!("0{}", last.suffix())
    } else {
        parts.join(separator)
    }
}

/// Average seconds per visit, `None` when there are no visits to divide by
pub fn visit_duration(totaltime: f64, visits: f64) -> Option<f64> {
    if !totaltime.is_finite() || !visits.is_finite() || visits == 0.0 {
        return None;
    }
    Some(totaltime / visits)
}

/// Average visit duration as `1m 30s`, signed, `0s` when undefined
pub fn format_visit_duration(totaltime: f64, visits: f64) -> String {
    let Some(duration) = visit_duration(totaltime, visits) else {
        return format_short_time(0.0, &MINUTES_SECONDS, " ");
    };

    let floored = duration.floor();
    let sign = if floored < 0.0 { "-" } else { "" };
    format!("{}{}", sign, format_short_time(floored.abs(), &MINUTES_SECONDS, " "))
}
