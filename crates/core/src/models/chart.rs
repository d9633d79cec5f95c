use serde::{Deserialize, Serialize};

use super::series::LabeledSeries;

/// Static presentation options handed to the chart renderer.
///
/// The core never interprets these; it only carries them next to the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub point_radius: u32,
    pub point_background_color: String,
    /// Bezier curve tension of the line (0 = straight segments)
    pub tension: f64,
    pub animation_ms: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_color: "#00ff00".to_string(),
            background_color: "rgba(0, 255, 0, 0.1)".to_string(),
            fill: true,
            point_radius: 5,
            point_background_color: "#fff".to_string(),
            tension: 0.5,
            animation_ms: 800,
        }
    }
}

/// Everything the chart renderer needs for one line dataset.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Dataset legend, the pair identifier (e.g., "EUR-USD")
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

impl ChartData {
    pub fn from_series(dataset_label: impl Into<String>, series: &LabeledSeries, style: ChartStyle) -> Self {
        Self {
            dataset_label: dataset_label.into(),
            labels: series.labels.clone(),
            values: series.values.clone(),
            style,
        }
    }

    /// True when there is nothing to plot; the renderer shows its "no data" state.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
