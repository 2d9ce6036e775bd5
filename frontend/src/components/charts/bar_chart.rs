use super::canvas::{ChartCanvas, ChartLoading};
use super::legend::Legend;
use super::svg::{bar_chart_svg, BarChartOptions, PlotStyle};
use crate::config::use_dashboard_config;
use crate::theme::use_theme;
use beacon_shared::{legend_items, series_rows, ChartPayload, DateUnit};
use log::debug;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub data: ChartPayload,
    /// Bucket unit of the x axis; the dashboard default when absent
    #[prop_or_default]
    pub unit: Option<DateUnit>,
    /// Overrides the configured stacking
    #[prop_or_default]
    pub stacked: Option<bool>,
    #[prop_or_default]
    pub currency: Option<AttrValue>,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub class: Classes,
}

/// Time-series bars, with `line` datasets drawn over them
#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    let config = use_dashboard_config();
    let theme = use_theme();

    let series = use_memo(props.data.clone(), |data| data.series());
    let rows = use_memo(series.clone(), |series| series_rows(series));

    let stacked = props.stacked.unwrap_or(config.chart.stacked);
    let currency = props
        .currency
        .as_ref()
        .map(|c| c.to_string())
        .or_else(|| config.currency.clone());

    let markup = use_memo(
        (rows.clone(), series.clone(), config.clone(), theme.clone(), props.unit, stacked, currency),
        |(rows, series, config, theme, unit, stacked, currency)| {
            let style = PlotStyle::new(&config.chart, theme);
            let labeler = config.labeler(*unit);
            debug!("Rendering bar chart with {} rows", rows.len());
            bar_chart_svg(
                rows,
                series,
                &BarChartOptions {
                    style: &style,
                    stacked: *stacked,
                    bar_size: f64::from(config.chart.bar_size),
                    labeler: Some(&labeler),
                    currency: currency.as_deref(),
                },
            )
        },
    );

    let legend = use_memo((series.clone(), config.clone(), theme.clone()), |(series, config, theme)| {
        legend_items(series, &PlotStyle::new(&config.chart, theme).palette)
    });

    if props.is_loading {
        return html! { <ChartLoading class={props.class.clone()} /> };
    }
    if rows.is_empty() {
        return html! {};
    }

    html! {
        <div class={classes!("bar-chart", props.class.clone())}>
            <ChartCanvas markup={markup} />
            if config.chart.show_legend {
                <Legend items={(*legend).clone()} />
            }
        </div>
    }
}
