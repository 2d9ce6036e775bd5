use log::info;
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod theme;

pub use components::charts::{
    bar_chart::BarChart, bubble_chart::BubbleChart, chart::{Chart, ChartType}, legend::Legend,
    pageviews_chart::PageviewsChart, pie_chart::PieChart,
};
pub use components::metric_card::MetricCard;
pub use config::{use_dashboard_config, Config};
pub use theme::{use_theme, LocalStorageThemeStore, ThemeContext, ThemeProvider};

// Unit test modules only
#[cfg(test)]
mod tests;

/// Browser console logging and readable panics for the chart bundle
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    console_error_panic_hook::set_once();
    info!("Beacon charts initialized");
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
}
