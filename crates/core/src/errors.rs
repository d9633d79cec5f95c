use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the entire fx-rate-chart-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// An empty feed response is not an error: it flows through as an
/// empty series and an empty table.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No rate feed available for {0}")]
    NoProvider(String),

    // ── Input validation ────────────────────────────────────────────
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Invalid currency pair: {0}")]
    InvalidPair(String),

    #[error("Invalid date window: 'to' ({to}) is before 'from' ({from})")]
    InvalidWindow { from: NaiveDate, to: NaiveDate },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// True for the errors a rate feed can produce while fetching
    /// (transport, non-success status, bad body, nothing to ask).
    ///
    /// These are caught at the controller boundary and never clear the
    /// currently published series.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Api { .. } | CoreError::Network(_) | CoreError::NoProvider(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors often carry the full URL; drop the query part.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
