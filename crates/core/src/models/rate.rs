use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single raw quote returned by the rate feed.
///
/// Immutable once received. Feeds return these ordered ascending by
/// `timestamp`; the controller re-sorts when a feed breaks that promise.
///
/// On the wire the timestamp travels as `date` and prices use camelCase
/// (`openBid`, `closeAsk`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRatePoint {
    #[serde(
        rename = "date",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    pub open_bid: f64,
    pub high_bid: f64,
    pub low_bid: f64,
    pub close_bid: f64,
    pub close_ask: f64,
}

impl RawRatePoint {
    /// Build a point where every bid/ask field carries the same price.
    /// Used for feeds that only publish a single reference rate.
    pub fn flat(timestamp: NaiveDateTime, price: f64) -> Self {
        Self {
            timestamp,
            open_bid: price,
            high_bid: price,
            low_bid: price,
            close_bid: price,
            close_ask: price,
        }
    }

    /// Midpoint of the closing bid and ask.
    pub fn mid_rate(&self) -> f64 {
        (self.close_bid + self.close_ask) / 2.0
    }

    /// Closing ask minus closing bid.
    pub fn spread(&self) -> f64 {
        self.close_ask - self.close_bid
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats tried, in order, for timestamps without an explicit offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a feed timestamp.
///
/// Accepts ISO date-times with or without seconds, a space instead of
/// `T`, RFC 3339 with an offset (normalized to UTC) and a bare date
/// (taken as midnight).
///
/// Offsets are dropped after conversion, so points sent with an offset
/// get 24H labels in UTC wall-clock time rather than the viewer's local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn serialize_timestamp<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{raw}'")))
}
