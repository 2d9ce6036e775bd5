use beacon_frontend::components::charts::svg::{
    area_chart_svg, bar_chart_svg, bubble_chart_svg, escape_html, pie_chart_svg, sparkline_svg,
    AreaSeries, BarChartOptions, PlotStyle,
};
use beacon_frontend::theme::css_variables_style;
use beacon_shared::{
    bubble_points, series_rows, CategorySlice, ChartPayload, DateLabeler, DateUnit, Row,
    ThemeConfig, ThemeMode,
};
use pretty_assertions::assert_eq;

const TRAFFIC: &str = r#"{
    "datasets": [
        {"label": "Visitors", "data": [{"x": "2024-01-02", "y": 1200}, {"x": "2024-01-01", "y": 800}]},
        {"label": "Views", "type": "line", "data": [{"x": "2024-01-01", "y": 2500}, {"x": "2024-01-03"}]}
    ]
}"#;

fn options<'a>(style: &'a PlotStyle, labeler: Option<&'a DateLabeler>) -> BarChartOptions<'a> {
    BarChartOptions {
        style,
        stacked: false,
        bar_size: 32.0,
        labeler,
        currency: None,
    }
}

fn count(markup: &str, needle: &str) -> usize {
    markup.matches(needle).count()
}

#[test]
fn test_bar_chart_draws_bars_and_lines() {
    let payload = ChartPayload::from_json(TRAFFIC).unwrap();
    let series = payload.series();
    let rows = series_rows(&series);
    let style = PlotStyle::default();
    let labeler = DateLabeler::new(DateUnit::Day, "en-US");

    let markup = bar_chart_svg(&rows, &series, &options(&style, Some(&labeler)));

    assert!(markup.starts_with("<svg"));
    assert!(markup.ends_with("</svg>"));
    assert_eq!(count(&markup, "<rect"), 2);
    assert_eq!(count(&markup, "<circle"), 2);
    assert!(markup.contains(">Jan 1</text>"));
    assert!(markup.contains(">Jan 3</text>"));
    assert!(markup.contains("<title>Tuesday, January 2, 2024\n1.2K Visitors</title>"));
    assert!(markup.contains("<title>Wednesday, January 3, 2024\n0 Views</title>"));
}

#[test]
fn test_bar_chart_without_rows_is_empty() {
    let style = PlotStyle::default();
    assert_eq!(bar_chart_svg(&[], &[], &options(&style, None)), "");
}

#[test]
fn test_stacked_bars_share_a_column() {
    let payload = ChartPayload::from_json(
        r#"{"datasets": [
            {"label": "A", "data": [{"x": "2024-01-01", "y": 10}]},
            {"label": "B", "data": [{"x": "2024-01-01", "y": 30}]}
        ]}"#,
    )
    .unwrap();
    let series = payload.series();
    let rows = series_rows(&series);
    let style = PlotStyle::default();

    let markup = bar_chart_svg(
        &rows,
        &series,
        &BarChartOptions {
            stacked: true,
            ..options(&style, None)
        },
    );

    let xs: Vec<&str> = markup
        .split("<rect x=\"")
        .skip(1)
        .map(|rest| rest.split('"').next().unwrap_or_default())
        .collect();
    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0], xs[1]);
    assert!(markup.contains(">40</text>"));
}

#[test]
fn test_labels_are_escaped() {
    let payload = ChartPayload::from_json(
        r#"{"datasets": [{"label": "<script>alert(1)</script>", "data": [{"x": "a&b", "y": 3}]}]}"#,
    )
    .unwrap();
    let series = payload.series();
    let rows = series_rows(&series);
    let style = PlotStyle::default();

    let markup = bar_chart_svg(&rows, &series, &options(&style, None));
    assert!(!markup.contains("<script>"));
    assert!(markup.contains("&lt;script&gt;"));
    assert!(markup.contains(">a&amp;b</text>"));
}

#[test]
fn test_dataset_colors_are_escaped() {
    let payload = ChartPayload::from_json(
        r##"{"datasets": [
            {"label": "Visits", "backgroundColor": "#fff\" onmouseover=\"alert(1)", "data": [{"x": "a", "y": 3}]},
            {"label": "Views", "type": "line", "borderColor": "red'/><script>x</script>", "data": [{"x": "a", "y": 5}]}
        ]}"##,
    )
    .unwrap();
    let series = payload.series();
    let rows = series_rows(&series);
    let style = PlotStyle::default();

    let markup = bar_chart_svg(&rows, &series, &options(&style, None));
    assert!(!markup.contains(r#"onmouseover="alert(1)"#));
    assert!(!markup.contains("<script>"));
    assert!(markup.contains(r##"stop-color="#fff&quot; onmouseover=&quot;alert(1)""##));
    assert!(markup.contains(r#"stroke="red&#39;/&gt;&lt;script&gt;x&lt;/script&gt;""#));
}

#[test]
fn test_area_chart_has_gradient_per_series() {
    let rows = vec![
        Row::new("2024-01-01").with_value("Views", Some(8.0)).with_value("Visitors", Some(3.0)),
        Row::new("2024-01-02").with_value("Views", Some(12.0)).with_value("Visitors", Some(4.0)),
    ];
    let areas = vec![
        AreaSeries {
            key: "Views".to_string(),
            color: "#2680eb".to_string(),
        },
        AreaSeries {
            key: "Visitors".to_string(),
            color: "#9256d9".to_string(),
        },
    ];

    let markup = area_chart_svg(&rows, &areas, &PlotStyle::default(), None);
    assert_eq!(count(&markup, "<linearGradient"), 2);
    assert!(markup.contains(r#"stop-opacity="0.4""#));
    assert!(markup.contains(r#"stop-opacity="0.05""#));
    assert_eq!(count(&markup, "<circle"), 4);
    assert!(markup.contains("<title>12 Views</title>"));
    assert_eq!(area_chart_svg(&[], &areas, &PlotStyle::default(), None), "");
}

#[test]
fn test_pie_chart_slices() {
    let slices = vec![
        CategorySlice {
            name: "Chrome".to_string(),
            value: 1200.0,
            color: "#2680eb".to_string(),
        },
        CategorySlice {
            name: "Firefox".to_string(),
            value: 0.0,
            color: "#9256d9".to_string(),
        },
        CategorySlice {
            name: "Safari".to_string(),
            value: 400.0,
            color: "#44b556".to_string(),
        },
    ];

    let pie = pie_chart_svg(&slices, &PlotStyle::default(), false);
    assert_eq!(count(&pie, r#"class="slice""#), 2);
    assert!(pie.contains("<title>1.2K Chrome</title>"));
    assert!(!pie.contains("Firefox"));

    let doughnut = pie_chart_svg(&slices, &PlotStyle::default(), true);
    assert!(doughnut.contains("doughnut-chart"));
    assert_eq!(pie_chart_svg(&[], &PlotStyle::default(), false), "");
}

#[test]
fn test_single_slice_is_a_full_ring() {
    let slices = vec![CategorySlice {
        name: "Direct".to_string(),
        value: 5.0,
        color: "#fff".to_string(),
    }];

    let markup = pie_chart_svg(&slices, &PlotStyle::default(), false);
    assert_eq!(count(&markup, r#"class="slice""#), 1);
    assert!(markup.contains("0 1,1"));
}

#[test]
fn test_bubble_chart() {
    let payload = ChartPayload::from_json(
        r#"{"datasets": [
            {"label": "Pages", "data": [{"x": 1, "y": 5, "z": 3}, {"x": 4, "y": 2}]}
        ]}"#,
    )
    .unwrap();
    let style = PlotStyle::default();
    let points = bubble_points(&payload.series(), &style.palette);

    let markup = bubble_chart_svg(&points, &style);
    assert_eq!(count(&markup, "<radialGradient"), 2);
    assert!(markup.contains("<title>5 Pages</title>"));
    assert_eq!(bubble_chart_svg(&[], &style), "");
}

#[test]
fn test_sparkline() {
    assert_eq!(sparkline_svg(&[]), "");
    assert!(sparkline_svg(&[3.0, 1.0, 2.0]).starts_with(r#"<svg width="90" height="35""#));
}

#[test]
fn test_escape_html_quotes() {
    assert_eq!(escape_html(r#"say "hi" & 'bye'"#), "say &quot;hi&quot; &amp; &#39;bye&#39;");
}

#[test]
fn test_theme_style_declares_variables() {
    let default = css_variables_style(&ThemeConfig::default().resolve());
    assert_eq!(default, "--custom-primary: #2680eb;");

    let ocean = css_variables_style(
        &ThemeConfig {
            mode: ThemeMode::Dark,
            palette: "ocean".to_string(),
        }
        .resolve(),
    );
    assert!(ocean.contains("--primary400: "));
    assert!(ocean.contains("--custom-accent: "));
}
