use crate::models::series::Series;
use serde::{Deserialize, Serialize};

/// Magnitude of a bubble whose point carries none
pub const DEFAULT_BUBBLE_SIZE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub name: String,
    pub color: String,
}

/// Flattens every series into bubble points, series by series
pub fn bubble_points(series: &[Series], palette: &[String]) -> Vec<BubblePoint> {
    series
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            let name = match s.label.as_deref() {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => format!("Series {}", i),
            };
            let color = s.fill_color(i, palette);

            s.points.iter().map(move |p| BubblePoint {
                x: p.x.as_number().filter(|x| x.is_finite()).unwrap_or(0.0),
                y: p.y.unwrap_or(0.0),
                z: p.z.filter(|z| *z != 0.0).unwrap_or(DEFAULT_BUBBLE_SIZE),
                name: name.clone(),
                color: color.clone(),
            })
        })
        .collect()
}

/// Smallest and largest magnitude, for scaling radii
pub fn magnitude_range(points: &[BubblePoint]) -> Option<(f64, f64)> {
    points.iter().map(|p| p.z).fold(None, |range, z| match range {
        None => Some((z, z)),
        Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
    })
}
