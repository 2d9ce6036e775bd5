use super::bar_chart::BarChart;
use super::bubble_chart::BubbleChart;
use super::pie_chart::PieChart;
use beacon_shared::{ChartPayload, DateUnit};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Bubble,
}

/// Payload with every dataset drawn as a line
pub fn as_line_payload(data: &ChartPayload) -> ChartPayload {
    let mut data = data.clone();
    for dataset in &mut data.datasets {
        dataset.kind = Some("line".to_string());
    }
    data
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub data: ChartPayload,
    #[prop_or_default]
    pub chart_type: ChartType,
    #[prop_or_default]
    pub unit: Option<DateUnit>,
    #[prop_or_default]
    pub stacked: Option<bool>,
    #[prop_or_default]
    pub currency: Option<AttrValue>,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    let line_data = use_memo(props.data.clone(), as_line_payload);
    let class = props.class.clone();

    match props.chart_type {
        ChartType::Bar => html! {
            <BarChart
                data={props.data.clone()}
                unit={props.unit}
                stacked={props.stacked}
                currency={props.currency.clone()}
                is_loading={props.is_loading}
                {class}
            />
        },
        ChartType::Line => html! {
            <BarChart
                data={(*line_data).clone()}
                unit={props.unit}
                currency={props.currency.clone()}
                is_loading={props.is_loading}
                {class}
            />
        },
        ChartType::Pie | ChartType::Doughnut => html! {
            <PieChart
                data={props.data.clone()}
                doughnut={props.chart_type == ChartType::Doughnut}
                is_loading={props.is_loading}
                {class}
            />
        },
        ChartType::Bubble => html! {
            <BubbleChart data={props.data.clone()} is_loading={props.is_loading} {class} />
        },
    }
}
