pub mod bar_chart;
pub mod bubble_chart;
pub mod canvas;
pub mod chart;
pub mod legend;
pub mod pageviews_chart;
pub mod pie_chart;
pub mod svg;
