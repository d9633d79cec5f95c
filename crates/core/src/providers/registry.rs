use async_trait::async_trait;
use tracing::warn;

use crate::errors::CoreError;
use crate::models::rate::RawRatePoint;
use crate::models::settings::FeedSettings;

use super::frankfurter::FrankfurterFeed;
use super::rate_feed::RateFeedProvider;
use super::traits::{RateFeed, RateFeedRequest};

/// Ordered list of rate feeds with automatic fallback.
///
/// Tries feeds in registration order and returns the first success.
/// This is the only retry policy in the library; the controller itself
/// never retries.
pub struct RateFeedRegistry {
    feeds: Vec<Box<dyn RateFeed>>,
}

impl RateFeedRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { feeds: Vec::new() }
    }

    /// Create a registry with the default feeds for `settings`.
    pub fn new_with_defaults(settings: &FeedSettings) -> Self {
        // Trading desk feed: bid/ask quotes, primary
        Self::with_primary(Box::new(RateFeedProvider::from_settings(settings)), settings)
    }

    /// Create a registry around `primary`, adding the fallbacks `settings` enables.
    pub fn with_primary(primary: Box<dyn RateFeed>, settings: &FeedSettings) -> Self {
        let mut registry = Self::new();
        registry.register(primary);

        // Frankfurter: ECB daily reference rates, opt-in fallback
        if settings.frankfurter_fallback {
            registry.register(Box::new(FrankfurterFeed::new(settings.timeout_secs)));
        }

        registry
    }

    /// Register a new feed behind the ones already present.
    pub fn register(&mut self, feed: Box<dyn RateFeed>) {
        self.feeds.push(feed);
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Names of the registered feeds, in fallback order.
    pub fn feed_names(&self) -> Vec<String> {
        self.feeds.iter().map(|f| f.name().to_string()).collect()
    }
}

impl Default for RateFeedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateFeed for RateFeedRegistry {
    fn name(&self) -> &str {
        "Registry"
    }

    async fn fetch_rates(&self, request: &RateFeedRequest) -> Result<Vec<RawRatePoint>, CoreError> {
        let mut last_error = None;

        for feed in &self.feeds {
            match feed.fetch_rates(request).await {
                Ok(points) => return Ok(points),
                Err(e) => {
                    warn!(feed = feed.name(), error = %e, "rate feed failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(request.pair.identifier())))
    }
}
