/// Share of visits that bounced, in percent.
///
/// Bounces are capped at visits, so the rate never exceeds 100 even when the
/// raw counters disagree. No visits means a rate of 0.
pub fn bounce_rate(visits: f64, bounces: f64) -> f64 {
    if !visits.is_finite() || visits <= 0.0 || !bounces.is_finite() {
        return 0.0;
    }
    visits.min(bounces.max(0.0)) / visits * 100.0
}

/// Bounce rate rounded to a whole percent, e.g. `42%`
pub fn format_bounce_rate(visits: f64, bounces: f64) -> String {
    format_percent(bounce_rate(visits, bounces))
}

/// Whole percent string
pub fn format_percent(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    format!("{}%", rounded as i64)
}

/// Relative change from `previous` to `current`, in percent.
///
/// Growth from zero counts as 100%, no change from zero as 0%.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if !current.is_finite() || !previous.is_finite() {
        return 0.0;
    }
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

/// Magnitude of a change with one decimal, e.g. `12.5%`
pub fn format_change(change: f64) -> String {
    let change = if change.is_finite() { change.abs() } else { 0.0 };
    format!("{:.1}%", change)
}
