use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// The user-selectable display window of the chart.
///
/// Exactly one range is selected at any time. Serialized as its label
/// (`"24H"`, `"7D"`, `"1M"`, `"6M"`, `"1Y"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "24H")]
    Day,
    #[serde(rename = "7D")]
    Week,
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "6M")]
    HalfYear,
    #[serde(rename = "1Y")]
    Year,
}

impl TimeRange {
    /// Short label shown on the selection control.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day => "24H",
            TimeRange::Week => "7D",
            TimeRange::Month => "1M",
            TimeRange::HalfYear => "6M",
            TimeRange::Year => "1Y",
        }
    }

    /// All ranges, in the order the selection surface shows them.
    pub fn all() -> &'static [TimeRange] {
        &[
            TimeRange::Day,
            TimeRange::Week,
            TimeRange::Month,
            TimeRange::HalfYear,
            TimeRange::Year,
        ]
    }

    /// Whether the series for this range collapses repeated labels into one bucket.
    pub fn is_deduplicated(&self) -> bool {
        matches!(self, TimeRange::HalfYear | TimeRange::Year)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeRange::all()
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::InvalidRange(format!(
                    "'{s}' (expected one of 24H, 7D, 1M, 6M, 1Y)"
                ))
            })
    }
}
