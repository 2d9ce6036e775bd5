use super::canvas::{ChartCanvas, ChartLoading};
use super::legend::Legend;
use super::svg::{area_chart_svg, AreaSeries, PlotStyle};
use crate::config::use_dashboard_config;
use crate::theme::use_theme;
use beacon_shared::{pageview_rows, DateUnit, LegendItem, PageviewData};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageviewsChartProps {
    pub data: PageviewData,
    #[prop_or_default]
    pub unit: Option<DateUnit>,
    #[prop_or(AttrValue::from("Visitors"))]
    pub visitors_label: AttrValue,
    #[prop_or(AttrValue::from("Views"))]
    pub views_label: AttrValue,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub class: Classes,
}

/// Visitors and views of a website as two overlapping areas
#[function_component(PageviewsChart)]
pub fn pageviews_chart(props: &PageviewsChartProps) -> Html {
    let config = use_dashboard_config();
    let theme = use_theme();

    let rows = use_memo(
        (props.data.clone(), props.visitors_label.clone(), props.views_label.clone()),
        |(data, visitors, views)| pageview_rows(data, visitors, views),
    );

    let areas = use_memo(
        (theme.clone(), props.visitors_label.clone(), props.views_label.clone()),
        |(theme, visitors, views)| {
            vec![
                AreaSeries {
                    key: views.to_string(),
                    color: theme.chart.views.border_color.clone(),
                },
                AreaSeries {
                    key: visitors.to_string(),
                    color: theme.chart.visitors.border_color.clone(),
                },
            ]
        },
    );

    let markup = use_memo(
        (rows.clone(), areas.clone(), config.clone(), theme.clone(), props.unit),
        |(rows, areas, config, theme, unit)| {
            let style = PlotStyle::new(&config.chart, theme);
            area_chart_svg(rows, areas, &style, Some(&config.labeler(*unit)))
        },
    );

    if props.is_loading {
        return html! { <ChartLoading class={props.class.clone()} /> };
    }
    if rows.is_empty() {
        return html! {};
    }

    let legend: Vec<LegendItem> = areas
        .iter()
        .enumerate()
        .map(|(i, area)| LegendItem {
            label: area.key.clone(),
            color: area.color.clone(),
            dataset_index: i,
        })
        .collect();

    html! {
        <div class={classes!("pageviews-chart", props.class.clone())}>
            <ChartCanvas markup={markup} />
            if config.chart.show_legend {
                <Legend items={legend} />
            }
        </div>
    }
}
