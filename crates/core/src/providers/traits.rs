use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::pair::CurrencyPair;
use crate::models::rate::RawRatePoint;
use crate::models::settings::DateFormat;
use crate::models::window::DateWindow;

/// What the core asks a rate feed for: one pair over one date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateFeedRequest {
    pub pair: CurrencyPair,
    pub window: DateWindow,
}

impl RateFeedRequest {
    pub fn new(pair: CurrencyPair, window: DateWindow) -> Self {
        Self { pair, window }
    }

    /// `fromDate` as the feed expects it.
    pub fn from_param(&self, format: DateFormat) -> String {
        format.format(self.window.from())
    }

    /// `toDate` as the feed expects it.
    pub fn to_param(&self, format: DateFormat) -> String {
        format.format(self.window.to())
    }
}

/// Trait abstraction for every historical quote source.
///
/// The wire format (HTTP method, body encoding, date strings) belongs to
/// the implementation. Callers only rely on the returned points being
/// ordered ascending by timestamp; an empty vector is a valid answer.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateFeed: Send + Sync {
    /// Human-readable name of this feed (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch every raw point for `request.pair` inside `request.window`.
    async fn fetch_rates(&self, request: &RateFeedRequest) -> Result<Vec<RawRatePoint>, CoreError>;
}
