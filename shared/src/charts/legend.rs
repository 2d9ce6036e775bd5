use crate::models::series::Series;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
    pub dataset_index: usize,
}

/// One legend entry per series, in series order
pub fn legend_items(series: &[Series], palette: &[String]) -> Vec<LegendItem> {
    series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendItem {
            label: match s.label.as_deref() {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => format!("Series {}", i + 1),
            },
            color: s.fill_color(i, palette),
            dataset_index: i,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_legend_items() {
        let palette = vec!["#aaa".to_string()];
        let series = vec![Series::new("Visitors", vec![]), Series::default()];

        let items = legend_items(&series, &palette);
        assert_eq!(items[0].label, "Visitors");
        assert_eq!(items[1].label, "Series 2");
        assert_eq!(items[1].color, "#aaa");
        assert_eq!(items[1].dataset_index, 1);
    }
}
