use super::canvas::{ChartCanvas, ChartLoading};
use super::legend::Legend;
use super::svg::{pie_chart_svg, PlotStyle};
use crate::config::use_dashboard_config;
use crate::theme::use_theme;
use beacon_shared::{ChartPayload, LegendItem};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PieChartProps {
    pub data: ChartPayload,
    #[prop_or_default]
    pub doughnut: bool,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub class: Classes,
}

/// Category shares of the first dataset as a pie or doughnut
#[function_component(PieChart)]
pub fn pie_chart(props: &PieChartProps) -> Html {
    let config = use_dashboard_config();
    let theme = use_theme();

    let slices = use_memo(
        (props.data.clone(), config.clone(), theme.clone()),
        |(data, config, theme)| data.category_slices(&PlotStyle::new(&config.chart, theme).palette),
    );

    let markup = use_memo(
        (slices.clone(), config.clone(), theme.clone(), props.doughnut),
        |(slices, config, theme, doughnut)| {
            pie_chart_svg(slices, &PlotStyle::new(&config.chart, theme), *doughnut)
        },
    );

    if props.is_loading {
        return html! { <ChartLoading class={props.class.clone()} /> };
    }
    if slices.is_empty() {
        return html! {};
    }

    let legend: Vec<LegendItem> = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| LegendItem {
            label: slice.name.clone(),
            color: slice.color.clone(),
            dataset_index: i,
        })
        .collect();

    html! {
        <div class={classes!(if props.doughnut { "doughnut-chart" } else { "pie-chart" }, props.class.clone())}>
            <ChartCanvas markup={markup} />
            if config.chart.show_legend {
                <Legend items={legend} />
            }
        </div>
    }
}
