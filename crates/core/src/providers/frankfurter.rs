use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::rate::RawRatePoint;
use super::traits::{RateFeed, RateFeedRequest};

const BASE_URL: &str = "https://api.frankfurter.dev/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Frankfurter API feed, used as a fallback for fiat pairs.
///
/// - **Free**: No API key, no rate limits, open-source.
/// - **Source**: European Central Bank (ECB) daily reference rates.
/// - **Endpoint**: `/{start}..{end}?base=EUR&symbols=USD`
///
/// ECB publishes one reference rate per business day and no bid/ask, so
/// every field of the resulting point carries that rate and the time is
/// midnight.
pub struct FrankfurterFeed {
    client: Client,
    timeout_secs: u64,
}

impl FrankfurterFeed {
    pub fn new(timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            timeout_secs,
        }
    }

    /// Request timeout the HTTP client was built with.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Turn the `rates` map of a time series response into ordered points.
    /// Dates that fail to parse or lack the quote currency are skipped.
    pub fn points_from_rates(
        rates: &HashMap<String, HashMap<String, f64>>,
        quote: &str,
    ) -> Vec<RawRatePoint> {
        let mut points: Vec<RawRatePoint> = rates
            .iter()
            .filter_map(|(date_str, day_rates)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                let rate = day_rates.get(quote)?;
                Some(RawRatePoint::flat(date.and_hms_opt(0, 0, 0)?, *rate))
            })
            .collect();

        points.sort_by_key(|p| p.timestamp);
        points
    }
}

impl Default for FrankfurterFeed {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

// ── Frankfurter API response types ──────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    rates: HashMap<String, HashMap<String, f64>>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateFeed for FrankfurterFeed {
    fn name(&self) -> &str {
        "Frankfurter"
    }

    async fn fetch_rates(&self, request: &RateFeedRequest) -> Result<Vec<RawRatePoint>, CoreError> {
        let base = &request.pair.base;
        let quote = &request.pair.quote;

        let from_str = request.window.from().format("%Y-%m-%d");
        let to_str = request.window.to().format("%Y-%m-%d");
        let url = format!("{BASE_URL}/{from_str}..{to_str}?base={base}&symbols={quote}");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "Frankfurter".into(),
                message: format!("HTTP {status} for {base}/{quote}"),
            });
        }

        let series: TimeSeriesResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "Frankfurter".into(),
            message: format!("Failed to parse time series for {base}/{quote}: {e}"),
        })?;

        Ok(Self::points_from_rates(&series.rates, quote))
    }
}
