use crate::components::charts::canvas::ChartCanvas;
use crate::components::charts::svg::sparkline_svg;
use crate::config::use_dashboard_config;
use beacon_shared::format::number::format_number_locale;
use beacon_shared::format_currency;
use beacon_shared::metrics::format_metric_change;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MetricCardProps {
    pub label: AttrValue,
    pub value: f64,
    /// Absolute difference from the previous period
    #[prop_or_default]
    pub change: f64,
    /// A decrease is shown as the good direction
    #[prop_or_default]
    pub reverse_colors: bool,
    #[prop_or(true)]
    pub show_change: bool,
    #[prop_or_default]
    pub show_previous: bool,
    #[prop_or_default]
    pub currency: Option<AttrValue>,
    #[prop_or_default]
    pub trend_data: Vec<f64>,
}

#[function_component(MetricCard)]
pub fn metric_card(props: &MetricCardProps) -> Html {
    let config = use_dashboard_config();
    let sparkline = use_memo(props.trend_data.clone(), |data| sparkline_svg(data));

    let format = |value: f64| match &props.currency {
        Some(currency) => format_currency(value, currency, &config.locale),
        None => format_number_locale(value, &config.locale),
    };

    let improved = (props.change >= 0.0) != props.reverse_colors;
    let change_class = match (props.change == 0.0, improved) {
        (true, _) => "metric-change neutral",
        (false, true) => "metric-change positive",
        (false, false) => "metric-change negative",
    };
    let arrow = if props.change < 0.0 { "↓" } else { "↑" };

    html! {
        <div class="metric-card">
            <div class="metric-label">{&props.label}</div>
            <div class="metric-value">{format(props.value)}</div>
            if props.show_change {
                <div class={change_class}>
                    {format!("{} {}", arrow, format_metric_change(props.value, props.change))}
                </div>
            }
            if props.show_previous {
                <div class="metric-previous">{format(props.value - props.change)}</div>
            }
            if !sparkline.is_empty() {
                <ChartCanvas markup={sparkline} class="metric-sparkline" />
            }
        </div>
    }
}
