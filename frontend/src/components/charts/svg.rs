//! SVG markup for the chart components.
//!
//! Every generator is a pure function of adapted chart data, so the components
//! only memoize the markup and hand it to [`super::canvas::ChartCanvas`].

use beacon_shared::charts::bubble::{magnitude_range, BubblePoint};
use beacon_shared::charts::categories::{slices_total, CategorySlice};
use beacon_shared::charts::rows::Row;
use beacon_shared::labels::{
    build_tooltip, bubble_tooltip, render_number_tick, slice_tooltip, DateLabeler, HoveredPoint,
};
use beacon_shared::metrics::sparkline_path;
use beacon_shared::models::series::{Series, SeriesKind};
use beacon_shared::theme::chart_palette;
use beacon_shared::{ChartConfig, ResolvedTheme};
use std::f64::consts::PI;

const MARGIN_TOP: f64 = 10.0;
const MARGIN_RIGHT: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 40.0;
const Y_TICKS: usize = 5;
const MIN_TICK_SPACING: f64 = 40.0;

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Identifier safe to use in `id` and `url(#...)`
fn dom_id(prefix: &str, index: usize) -> String {
    format!("{}-{}", prefix, index)
}

fn title(text: &str) -> String {
    format!("<title>{}</title>", escape_html(text))
}

/// Size, colors and palette shared by every chart type
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub width: f64,
    pub height: f64,
    pub show_grid: bool,
    pub text_color: String,
    pub grid_color: String,
    pub background: String,
    pub palette: Vec<String>,
}

impl PlotStyle {
    /// A custom color list in `config` overrides the theme palette
    pub fn new(config: &ChartConfig, theme: &ResolvedTheme) -> Self {
        let palette = if config.colors.is_empty() || config.colors == chart_palette() {
            theme.palette.clone()
        } else {
            config.colors.clone()
        };

        Self {
            width: f64::from(config.width),
            height: f64::from(config.height),
            show_grid: config.show_grid,
            text_color: theme.chart.text.clone(),
            grid_color: theme.chart.line.clone(),
            background: theme.colors.gray50.clone(),
            palette,
        }
    }

    fn plot_width(&self) -> f64 {
        (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + self.plot_height()
    }

    fn open(&self, class: &str) -> String {
        format!(
            r#"<svg class="chart-svg {}" width="{}" height="{}" viewBox="0 0 {} {}" role="img">"#,
            class, self.width, self.height, self.width, self.height
        )
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::new(&ChartConfig::default(), &ResolvedTheme::default())
    }
}

/// A zero-based linear y axis with round tick steps
#[derive(Debug, Clone, PartialEq)]
pub struct YScale {
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl YScale {
    pub fn new(max_value: f64) -> Self {
        let max_value = if max_value.is_finite() && max_value > 0.0 { max_value } else { 1.0 };
        let raw_step = max_value / Y_TICKS as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let nice = if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
        let step = nice * magnitude;
        let steps = (max_value / step).ceil() as usize;

        Self {
            max: steps as f64 * step,
            ticks: (0..=steps)
                .map(|i| (i as f64 * step * 1e6).round() / 1e6)
                .collect(),
        }
    }

    /// Negative and non-finite values sit on the baseline
    fn y(&self, value: f64, style: &PlotStyle) -> f64 {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        style.baseline() - value / self.max * style.plot_height()
    }
}

fn y_axis(scale: &YScale, style: &PlotStyle) -> String {
    let mut out = String::from(r#"<g class="y-axis">"#);
    for tick in &scale.ticks {
        let y = scale.y(*tick, style);
        if style.show_grid {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" stroke="{}" stroke-dasharray="3 3" opacity="0.3"/>"#,
                MARGIN_LEFT,
                y,
                style.width - MARGIN_RIGHT,
                y,
                escape_html(&style.grid_color)
            ));
        }
        out.push_str(&format!(
            r#"<text x="{}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="11" fill="{}">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y,
            escape_html(&style.text_color),
            escape_html(&render_number_tick(*tick))
        ));
    }
    out.push_str("</g>");
    out
}

/// X-axis tick labels at `xs`, thinned so labels keep their distance
fn x_axis(rows: &[Row], xs: &[f64], labeler: Option<&DateLabeler>, style: &PlotStyle) -> String {
    let max_ticks = (style.plot_width() / MIN_TICK_SPACING).floor().max(1.0) as usize;
    let every = rows.len().div_ceil(max_ticks).max(1);
    let y = style.baseline() + 14.0;

    let mut out = String::from(r#"<g class="x-axis">"#);
    for (i, (row, x)) in rows.iter().zip(xs).enumerate() {
        if i % every != 0 {
            continue;
        }
        let label = match labeler {
            Some(labeler) => labeler.axis_label(&row.key(), i, rows),
            None => row.key(),
        };
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="{}" transform="rotate(-45 {:.1} {:.1})">{}</text>"#,
            x,
            y,
            escape_html(&style.text_color),
            x,
            y,
            escape_html(&label)
        ));
    }
    out.push_str("</g>");
    out
}

fn row_tooltip(
    row: &Row,
    key: &str,
    color: &str,
    labeler: Option<&DateLabeler>,
    currency: Option<&str>,
) -> String {
    let hovered = HoveredPoint::from_row(row, key, Some(color.to_string()));
    title(&build_tooltip(&hovered, labeler, currency, color).text())
}

fn line_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{:.1},{:.1}", if i == 0 { "M " } else { " L " }, x, y))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn dots(
    rows: &[Row],
    xs: &[f64],
    key: &str,
    color: &str,
    scale: &YScale,
    style: &PlotStyle,
    labeler: Option<&DateLabeler>,
    currency: Option<&str>,
) -> (Vec<(f64, f64)>, String) {
    let stroke = escape_html(color);
    let mut points = Vec::new();
    let mut markup = String::new();
    for (row, x) in rows.iter().zip(xs) {
        if !row.has(key) {
            continue;
        }
        let y = scale.y(row.value_or_zero(key), style);
        points.push((*x, y));
        markup.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="#fff" stroke="{}" stroke-width="2">{}</circle>"##,
            x,
            y,
            stroke,
            row_tooltip(row, key, color, labeler, currency)
        ));
    }
    (points, markup)
}

/// Options of [`bar_chart_svg`]
#[derive(Debug, Clone, Copy)]
pub struct BarChartOptions<'a> {
    pub style: &'a PlotStyle,
    pub stacked: bool,
    pub bar_size: f64,
    pub labeler: Option<&'a DateLabeler>,
    pub currency: Option<&'a str>,
}

/// Bars for `bar` series and polylines for `line` series over merged rows
pub fn bar_chart_svg(rows: &[Row], series: &[Series], options: &BarChartOptions) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let style = options.style;

    let bars: Vec<(usize, &Series)> = series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SeriesKind::Bar)
        .collect();
    let lines: Vec<(usize, &Series)> = series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SeriesKind::Line)
        .collect();

    let max_value = rows
        .iter()
        .map(|row| {
            let bar_max = if options.stacked {
                bars.iter().map(|(_, s)| row.value_or_zero(s.key()).max(0.0)).sum()
            } else {
                bars.iter().map(|(_, s)| row.value_or_zero(s.key())).fold(0.0, f64::max)
            };
            lines
                .iter()
                .map(|(_, s)| row.value_or_zero(s.key()))
                .fold(bar_max, f64::max)
        })
        .fold(0.0, f64::max);
    let scale = YScale::new(max_value);

    let band = style.plot_width() / rows.len() as f64;
    let xs: Vec<f64> = (0..rows.len())
        .map(|i| MARGIN_LEFT + band * (i as f64 + 0.5))
        .collect();

    let mut out = style.open("bar-chart");
    out.push_str("<defs>");
    for (index, s) in &bars {
        let color = escape_html(&s.fill_color(*index, &style.palette));
        out.push_str(&format!(
            r#"<linearGradient id="{}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{}" stop-opacity="0.95"/><stop offset="100%" stop-color="{}" stop-opacity="0.75"/></linearGradient>"#,
            dom_id("bar-gradient", *index),
            color,
            color
        ));
    }
    out.push_str("</defs>");
    out.push_str(&y_axis(&scale, style));

    let group_width = if options.stacked || bars.is_empty() {
        (band * 0.8).min(options.bar_size)
    } else {
        (band * 0.8 / bars.len() as f64).min(options.bar_size)
    };

    out.push_str(r#"<g class="bars">"#);
    for (row, center) in rows.iter().zip(&xs) {
        let mut stack_top = 0.0;
        let group_left = if options.stacked {
            center - group_width / 2.0
        } else {
            center - group_width * bars.len() as f64 / 2.0
        };

        for (slot, (index, s)) in bars.iter().enumerate() {
            let key = s.key();
            if !row.has(key) {
                continue;
            }
            let value = row.value_or_zero(key).max(0.0);
            let color = s.fill_color(*index, &style.palette);
            let (x, top, bottom) = if options.stacked {
                let bottom = stack_top;
                stack_top += value;
                (group_left, scale.y(stack_top, style), scale.y(bottom, style))
            } else {
                (
                    group_left + group_width * slot as f64,
                    scale.y(value, style),
                    style.baseline(),
                )
            };

            out.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="url(#{})">{}</rect>"#,
                x,
                top,
                group_width,
                (bottom - top).max(0.0),
                dom_id("bar-gradient", *index),
                row_tooltip(row, key, &color, options.labeler, options.currency)
            ));
        }
    }
    out.push_str("</g>");

    for (index, s) in &lines {
        let color = s.stroke_color(*index, &style.palette);
        let (points, markup) = dots(
            rows,
            &xs,
            s.key(),
            &color,
            &scale,
            style,
            options.labeler,
            options.currency,
        );
        out.push_str(&format!(
            r#"<g class="line"><path d="{}" fill="none" stroke="{}" stroke-width="2.5"/>{}</g>"#,
            line_path(&points),
            escape_html(&color),
            markup
        ));
    }

    out.push_str(&x_axis(rows, &xs, options.labeler, style));
    out.push_str("</svg>");
    out
}

/// One filled series of [`area_chart_svg`]
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSeries {
    pub key: String,
    pub color: String,
}

/// Overlapping gradient-filled areas, one per `areas` entry
pub fn area_chart_svg(
    rows: &[Row],
    areas: &[AreaSeries],
    style: &PlotStyle,
    labeler: Option<&DateLabeler>,
) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let max_value = rows
        .iter()
        .flat_map(|row| areas.iter().map(move |a| row.value_or_zero(&a.key)))
        .fold(0.0, f64::max);
    let scale = YScale::new(max_value);

    let xs: Vec<f64> = if rows.len() == 1 {
        vec![MARGIN_LEFT + style.plot_width() / 2.0]
    } else {
        let step = style.plot_width() / (rows.len() - 1) as f64;
        (0..rows.len()).map(|i| MARGIN_LEFT + step * i as f64).collect()
    };

    let mut out = style.open("area-chart");
    out.push_str("<defs>");
    for (index, area) in areas.iter().enumerate() {
        let color = escape_html(&area.color);
        out.push_str(&format!(
            r#"<linearGradient id="{}" x1="0" y1="0" x2="0" y2="1"><stop offset="5%" stop-color="{}" stop-opacity="0.4"/><stop offset="95%" stop-color="{}" stop-opacity="0.05"/></linearGradient>"#,
            dom_id("area-gradient", index),
            color,
            color
        ));
    }
    out.push_str("</defs>");
    out.push_str(&y_axis(&scale, style));

    for (index, area) in areas.iter().enumerate() {
        let (points, markup) = dots(rows, &xs, &area.key, &area.color, &scale, style, labeler, None);
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            continue;
        };
        let line = line_path(&points);
        let fill = format!(
            "{} L {:.1},{:.1} L {:.1},{:.1} Z",
            line,
            last.0,
            style.baseline(),
            first.0,
            style.baseline()
        );

        out.push_str(&format!(
            r#"<g class="area"><path d="{}" fill="url(#{})" stroke="none"/><path d="{}" fill="none" stroke="{}" stroke-width="2.5"/>{}</g>"#,
            fill,
            dom_id("area-gradient", index),
            line,
            escape_html(&area.color),
            markup
        ));
    }

    out.push_str(&x_axis(rows, &xs, labeler, style));
    out.push_str("</svg>");
    out
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

fn wedge_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let large_arc = if end - start > PI { 1 } else { 0 };
    let (ox0, oy0) = polar(cx, cy, outer, start);
    let (ox1, oy1) = polar(cx, cy, outer, end);

    if inner <= 0.0 {
        return format!(
            "M {:.2},{:.2} L {:.2},{:.2} A {:.2},{:.2} 0 {},1 {:.2},{:.2} Z",
            cx, cy, ox0, oy0, outer, outer, large_arc, ox1, oy1
        );
    }

    let (ix0, iy0) = polar(cx, cy, inner, start);
    let (ix1, iy1) = polar(cx, cy, inner, end);
    format!(
        "M {:.2},{:.2} A {:.2},{:.2} 0 {},1 {:.2},{:.2} L {:.2},{:.2} A {:.2},{:.2} 0 {},0 {:.2},{:.2} Z",
        ox0, oy0, outer, outer, large_arc, ox1, oy1, ix1, iy1, inner, inner, large_arc, ix0, iy0
    )
}

fn ring_path(cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    let circle = |r: f64| {
        format!(
            "M {:.2},{:.2} A {:.2},{:.2} 0 1,1 {:.2},{:.2} A {:.2},{:.2} 0 1,1 {:.2},{:.2} Z",
            cx - r, cy, r, r, cx + r, cy, r, r, cx - r, cy
        )
    };
    if inner > 0.0 {
        format!("{} {}", circle(outer), circle(inner))
    } else {
        circle(outer)
    }
}

/// Pie or doughnut wedges in slice order, clockwise from twelve o'clock
pub fn pie_chart_svg(slices: &[CategorySlice], style: &PlotStyle, doughnut: bool) -> String {
    if slices.is_empty() {
        return String::new();
    }

    let cx = style.width / 2.0;
    let cy = style.height / 2.0;
    let half = style.width.min(style.height) / 2.0;
    let outer = half * if doughnut { 0.75 } else { 0.85 };
    let inner = if doughnut { half * 0.45 } else { 0.0 };
    let total = slices_total(slices);

    let mut out = style.open(if doughnut { "doughnut-chart" } else { "pie-chart" });
    if total <= 0.0 {
        out.push_str(&format!(
            r#"<path d="{}" fill="{}" fill-rule="evenodd"/>"#,
            ring_path(cx, cy, outer, inner),
            escape_html(&style.grid_color)
        ));
        out.push_str("</svg>");
        return out;
    }

    let mut angle = -PI / 2.0;
    for slice in slices {
        if slice.value <= 0.0 {
            continue;
        }
        let sweep = slice.value / total * 2.0 * PI;
        let path = if sweep >= 2.0 * PI - 1e-9 {
            ring_path(cx, cy, outer, inner)
        } else {
            wedge_path(cx, cy, outer, inner, angle, angle + sweep)
        };
        angle += sweep;

        out.push_str(&format!(
            r#"<path class="slice" d="{}" fill="{}" fill-rule="evenodd" stroke="{}" stroke-width="2">{}</path>"#,
            path,
            escape_html(&slice.color),
            escape_html(&style.background),
            title(&slice_tooltip(slice))
        ));
    }
    out.push_str("</svg>");
    out
}

/// Scatter of bubbles sized by magnitude
pub fn bubble_chart_svg(points: &[BubblePoint], style: &PlotStyle) -> String {
    if points.is_empty() {
        return String::new();
    }

    let (x_min, x_max) = points
        .iter()
        .map(|p| p.x)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));
    let (x_min, x_max) = if x_max > x_min { (x_min, x_max) } else { (x_min - 1.0, x_max + 1.0) };
    let scale = YScale::new(points.iter().map(|p| p.y).fold(0.0, f64::max));
    let (z_min, z_max) = magnitude_range(points).unwrap_or((0.0, 0.0));

    let x_at = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * style.plot_width();
    let radius = |z: f64| {
        if z_max > z_min {
            4.0 + (z - z_min) / (z_max - z_min) * 20.0
        } else {
            12.0
        }
    };

    let mut out = style.open("bubble-chart");
    out.push_str("<defs>");
    for (index, point) in points.iter().enumerate() {
        let color = escape_html(&point.color);
        out.push_str(&format!(
            r#"<radialGradient id="{}"><stop offset="0%" stop-color="{}" stop-opacity="0.9"/><stop offset="100%" stop-color="{}" stop-opacity="0.6"/></radialGradient>"#,
            dom_id("bubble-gradient", index),
            color,
            color
        ));
    }
    out.push_str("</defs>");
    out.push_str(&y_axis(&scale, style));

    for (index, point) in points.iter().enumerate() {
        out.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="url(#{})" stroke="{}" stroke-width="2" stroke-opacity="0.7">{}</circle>"#,
            x_at(point.x),
            scale.y(point.y, style),
            radius(point.z),
            dom_id("bubble-gradient", index),
            escape_html(&point.color),
            title(&bubble_tooltip(point))
        ));
    }

    out.push_str(r#"<g class="x-axis">"#);
    for i in 0..=Y_TICKS {
        let value = x_min + (x_max - x_min) * i as f64 / Y_TICKS as f64;
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="{}">{}</text>"#,
            x_at(value),
            style.baseline() + 16.0,
            escape_html(&style.text_color),
            escape_html(&render_number_tick((value * 100.0).round() / 100.0))
        ));
    }
    out.push_str("</g></svg>");
    out
}

/// 90x35 trend line for metric cards
pub fn sparkline_svg(data: &[f64]) -> String {
    let path = sparkline_path(data, 90.0, 35.0, 4.0);
    if path.is_empty() {
        return String::new();
    }
    format!(
        r#"<svg width="90" height="35" viewBox="0 0 90 35" preserveAspectRatio="none"><path d="{}" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        path
    )
}
