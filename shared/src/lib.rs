pub mod models {
    pub mod point;
    pub mod series;
}

pub mod charts {
    pub mod bubble;
    pub mod categories;
    pub mod legend;
    pub mod pageviews;
    pub mod rows;
}

pub mod format {
    pub mod date;
    pub mod number;
    pub mod rate;
    pub mod time;
}

pub mod config;
pub mod error;
pub mod labels;
pub mod metrics;
pub mod theme;

// Re-export commonly used items
pub use error::{Result, SharedError};

// Re-export models
pub use models::{
    point::{ChartJsPoints, Point, PointNormalizer, XValue},
    series::{ChartPayload, ColorSpec, Dataset, Series, SeriesKind, DEFAULT_SERIES_KEY},
};

// Re-export adapters
pub use charts::{
    bubble::{bubble_points, BubblePoint},
    categories::{category_slices, CategorySlice},
    legend::{legend_items, LegendItem},
    pageviews::{compare_series, pageview_rows, PageviewData},
    rows::{series_rows, Row},
};

// Re-export formatters and labels
pub use format::{
    date::DateUnit,
    number::{format_currency, format_long_currency, format_long_number, format_number},
    rate::{format_bounce_rate, percent_change},
    time::{format_short_time, format_visit_duration, TimeUnit},
};
pub use labels::{
    build_tooltip, render_date_label, render_number_label, DateLabeler, HoveredPoint, Tooltip,
};

pub use config::{ChartConfig, DashboardConfig};
pub use theme::{ResolvedTheme, ThemeConfig, ThemeMode, ThemeSettings, ThemeStore};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const TRAFFIC: &str = r##"{
        "labels": [],
        "datasets": [
            {"label": "Visitors", "data": [{"x": "2024-01-02", "y": 1200}, {"x": "2024-01-01", "y": 800}]},
            {"label": "Views", "type": "line", "data": [{"x": "2024-01-01", "y": 2500}, {"x": "2024-01-03"}]}
        ]
    }"##;

    #[test]
    fn test_payload_to_labeled_rows() {
        let payload = ChartPayload::from_json(TRAFFIC).unwrap();
        let rows = series_rows(&payload.series());

        let ticks: Vec<String> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| render_date_label(DateUnit::Day, "en-US", &row.key(), i, &rows))
            .collect();
        assert_eq!(ticks, vec!["Jan 1", "Jan 2", "Jan 3"]);

        assert_eq!(render_number_label(&rows[0].value_or_zero("Views").to_string()), "2.5K");
        assert!(!rows[1].has("Views"));
        assert!(rows[2].has("Views"));
        assert_eq!(rows[2].value("Views"), None);
    }

    #[test]
    fn test_hovered_row_tooltip() {
        let payload = ChartPayload::from_json(TRAFFIC).unwrap();
        let rows = series_rows(&payload.series());
        let labeler = DateLabeler::new(DateUnit::Day, "en-US");

        let hovered = HoveredPoint::from_row(&rows[2], "Views", None);
        let tooltip = build_tooltip(&hovered, Some(&labeler), None, theme::CHART_COLORS[0]);
        assert_eq!(tooltip.text(), "Wednesday, January 3, 2024\n0 Views");
    }
}
