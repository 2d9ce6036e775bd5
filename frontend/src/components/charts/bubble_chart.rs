use super::canvas::{ChartCanvas, ChartLoading};
use super::legend::Legend;
use super::svg::{bubble_chart_svg, PlotStyle};
use crate::config::use_dashboard_config;
use crate::theme::use_theme;
use beacon_shared::{bubble_points, legend_items, ChartPayload};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BubbleChartProps {
    pub data: ChartPayload,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(BubbleChart)]
pub fn bubble_chart(props: &BubbleChartProps) -> Html {
    let config = use_dashboard_config();
    let theme = use_theme();

    let series = use_memo(props.data.clone(), |data| data.series());
    let palette = use_memo((config.clone(), theme.clone()), |(config, theme)| {
        PlotStyle::new(&config.chart, theme).palette
    });
    let points = use_memo((series.clone(), palette.clone()), |(series, palette)| {
        bubble_points(series, palette)
    });

    let markup = use_memo(
        (points.clone(), config.clone(), theme.clone()),
        |(points, config, theme)| bubble_chart_svg(points, &PlotStyle::new(&config.chart, theme)),
    );

    if props.is_loading {
        return html! { <ChartLoading class={props.class.clone()} /> };
    }
    if points.is_empty() {
        return html! {};
    }

    html! {
        <div class={classes!("bubble-chart", props.class.clone())}>
            <ChartCanvas markup={markup} />
            if config.chart.show_legend {
                <Legend items={legend_items(&series, &palette)} />
            }
        </div>
    }
}
