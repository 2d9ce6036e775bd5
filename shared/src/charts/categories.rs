use crate::models::series::{ChartPayload, ColorSpec};
use crate::theme::palette_color;
use serde::{Deserialize, Serialize};

/// One wedge of a pie or doughnut chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Pairs category labels with values and colors, keeping label order.
///
/// Missing or non-finite values are 0. A color list is cycled by its own
/// length; without colors the palette is cycled by index.
pub fn category_slices(
    labels: &[String],
    values: &[Option<f64>],
    colors: Option<&ColorSpec>,
    palette: &[String],
) -> Vec<CategorySlice> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| CategorySlice {
            name: label.clone(),
            value: values
                .get(i)
                .copied()
                .flatten()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            color: colors
                .and_then(|c| c.at(i))
                .map(str::to_string)
                .unwrap_or_else(|| palette_color(palette, i)),
        })
        .collect()
}

impl ChartPayload {
    /// Slices from the labels and the first dataset
    pub fn category_slices(&self, palette: &[String]) -> Vec<CategorySlice> {
        let Some(dataset) = self.datasets.first() else {
            return Vec::new();
        };
        category_slices(
            &self.labels,
            &dataset.values(),
            dataset.background_color.as_ref(),
            palette,
        )
    }
}

/// Sum of all slice values
pub fn slices_total(slices: &[CategorySlice]) -> f64 {
    slices.iter().map(|s| s.value).sum()
}
