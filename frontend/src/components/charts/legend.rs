use beacon_shared::LegendItem;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LegendProps {
    pub items: Vec<LegendItem>,
}

/// One swatch and label per dataset
#[function_component(Legend)]
pub fn legend(props: &LegendProps) -> Html {
    if props.items.is_empty() {
        return html! {};
    }

    html! {
        <div class="chart-legend">
            { for props.items.iter().map(|item| html! {
                <span
                    key={item.dataset_index}
                    class="legend-item"
                    data-dataset-index={item.dataset_index.to_string()}
                >
                    <span class="legend-swatch" style={format!("background-color: {}", item.color)}></span>
                    {&item.label}
                </span>
            }) }
        </div>
    }
}
