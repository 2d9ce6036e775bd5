use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChartCanvasProps {
    /// Pre-rendered, escaped SVG markup
    pub markup: Rc<String>,
    #[prop_or_default]
    pub class: Classes,
}

/// Container that paints generated markup into its node
#[function_component(ChartCanvas)]
pub fn chart_canvas(props: &ChartCanvasProps) -> Html {
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.markup.clone(), move |markup| {
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                container.set_inner_html(markup);
            }
            || ()
        });
    }

    html! {
        <div class={classes!("chart-container", props.class.clone())} ref={container_ref}></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartLoadingProps {
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ChartLoading)]
pub fn chart_loading(props: &ChartLoadingProps) -> Html {
    html! {
        <div class={classes!("chart-container", props.class.clone())}>
            <div class="chart-loading">
                {"Loading chart..."}
            </div>
        </div>
    }
}
