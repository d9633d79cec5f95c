use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::rate::RawRatePoint;
use crate::models::settings::{DateFormat, FeedSettings};
use super::traits::{RateFeed, RateFeedRequest};

const PROVIDER_NAME: &str = "RateFeed";

/// The FX trading desk's `getRateFeed` endpoint.
///
/// - **Method**: `POST` with a JSON body
/// - **Body**: `{ "currencyPairs": ["EUR-USD"], "fromDate": "...", "toDate": "..." }`
/// - **Response**: `{ "result": [ { "date", "openBid", "highBid", "lowBid", "closeBid", "closeAsk" } ] }`
///
/// Dates are written with the configured [`DateFormat`] (ISO by default).
pub struct RateFeedProvider {
    client: Client,
    endpoint: String,
    date_format: DateFormat,
}

impl RateFeedProvider {
    pub fn new(endpoint: impl Into<String>, date_format: DateFormat, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
            date_format,
        }
    }

    pub fn from_settings(settings: &FeedSettings) -> Self {
        Self::new(settings.endpoint.clone(), settings.date_format, settings.timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    /// The JSON body sent for `request`.
    pub fn request_body(&self, request: &RateFeedRequest) -> RateFeedBody {
        RateFeedBody {
            currency_pairs: vec![request.pair.identifier()],
            from_date: request.from_param(self.date_format),
            to_date: request.to_param(self.date_format),
        }
    }

    /// Parse a response body. A missing or `null` `result` is an empty result.
    pub fn parse_body(body: &str) -> Result<Vec<RawRatePoint>, CoreError> {
        let resp: RateFeedResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse rate feed response: {e}"),
        })?;
        Ok(resp.result.unwrap_or_default())
    }
}

// ── Rate feed wire types ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFeedBody {
    pub currency_pairs: Vec<String>,
    pub from_date: String,
    pub to_date: String,
}

#[derive(Deserialize)]
struct RateFeedResponse {
    #[serde(default)]
    result: Option<Vec<RawRatePoint>>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateFeed for RateFeedProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_rates(&self, request: &RateFeedRequest) -> Result<Vec<RawRatePoint>, CoreError> {
        let body = self.request_body(request);

        let resp = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!(
                    "HTTP {status} for {} {}..{}",
                    request.pair, body.from_date, body.to_date
                ),
            });
        }

        let text = resp.text().await?;
        Self::parse_body(&text)
    }
}
