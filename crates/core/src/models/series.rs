use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::rate::RawRatePoint;

/// Chart-ready series: one label per x-axis bucket and one value per label.
///
/// `labels.len() == values.len()` for every series the bucketizer builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LabeledSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append one bucket.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Iterate `(label, value)` pairs in chart order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// How the 6M / 1Y windows reduce every point that falls into one bucket
/// to a single chart value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketReduction {
    /// `closeBid` of the first point seen for the bucket.
    #[default]
    First,
    /// Mean `closeBid` of every point mapped to the bucket.
    Average,
}

/// One row of the tabular view, derived from a raw point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub date: NaiveDateTime,
    pub close_bid: f64,
    pub close_ask: f64,
    /// `(close_bid + close_ask) / 2`
    pub rate: f64,
}

impl TableRow {
    pub fn from_point(point: &RawRatePoint) -> Self {
        Self {
            date: point.timestamp,
            close_bid: point.close_bid,
            close_ask: point.close_ask,
            rate: point.mid_rate(),
        }
    }
}

/// Table rows for `points`, one per point, order preserved.
pub fn table_rows(points: &[RawRatePoint]) -> Vec<TableRow> {
    points.iter().map(TableRow::from_point).collect()
}
