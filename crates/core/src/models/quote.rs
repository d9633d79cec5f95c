use serde::{Deserialize, Serialize};

use super::rate::RawRatePoint;

/// Headline figures shown above the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineQuote {
    /// `highBid` of the first point in the window
    pub high_bid: f64,
    /// `lowBid` of the first point in the window
    pub low_bid: f64,
    /// Percent change of `closeBid` from the first to the last point.
    /// `None` when the first close is zero.
    pub change_percent: Option<f64>,
}

impl HeadlineQuote {
    /// Compute the headline for an ordered slice of points.
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[RawRatePoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;

        let change_percent = if first.close_bid.abs() > f64::EPSILON {
            Some((last.close_bid - first.close_bid) / first.close_bid * 100.0)
        } else {
            None
        };

        Some(Self {
            high_bid: first.high_bid,
            low_bid: first.low_bid,
            change_percent,
        })
    }

    pub fn is_up(&self) -> bool {
        self.change_percent.is_some_and(|c| c >= 0.0)
    }
}
