pub mod charts;
pub mod metric_card;
