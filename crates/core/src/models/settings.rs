use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::pair::CurrencyPair;
use super::range::TimeRange;
use super::series::BucketReduction;

pub const DEFAULT_ENDPOINT: &str = "http://65.1.228.250:8080/fxd_trading/rate_feed/getRateFeed";

/// How `fromDate` / `toDate` are written into a rate feed request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `DD-MM-YYYY`
    DayMonthYear,
}

impl DateFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthYear => "%d-%m-%Y",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// User-configurable settings for the rate feed and the chart.
///
/// Missing fields fall back to their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// URL of the rate feed endpoint.
    pub endpoint: String,

    /// Pair identifier sent to the feed (e.g., "EUR-USD").
    pub currency_pair: String,

    /// Date serialization used in feed requests.
    pub date_format: DateFormat,

    /// HTTP timeout for a single feed request.
    pub timeout_secs: u64,

    /// Range selected before the user picks one.
    pub default_range: TimeRange,

    /// Per-bucket reduction for the 6M / 1Y windows.
    pub reduction: BucketReduction,

    /// Register the ECB daily reference feed as a fallback.
    ///
    /// Off by default: ECB data is one midnight mid rate per business day,
    /// so a primary outage would otherwise be published as flat, spreadless
    /// points instead of surfacing as a failed fetch.
    pub frankfurter_fallback: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            currency_pair: "EUR-USD".to_string(),
            date_format: DateFormat::Iso,
            timeout_secs: 30,
            default_range: TimeRange::Day,
            reduction: BucketReduction::First,
            frankfurter_fallback: false,
        }
    }
}

impl FeedSettings {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// The configured pair, parsed.
    pub fn pair(&self) -> Result<CurrencyPair, CoreError> {
        self.currency_pair.parse()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.endpoint.trim().is_empty() {
            return Err(CoreError::Config("endpoint must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Config("timeout_secs must be greater than 0".into()));
        }
        self.pair()
            .map_err(|e| CoreError::Config(format!("currency_pair: {e}")))?;
        Ok(())
    }
}
