use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// A currency pair such as EUR-USD.
///
/// Both codes are stored upper-case and must be exactly 3 ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Result<Self, CoreError> {
        let base = normalize_code(base)?;
        let quote = normalize_code(quote)?;
        if base == quote {
            return Err(CoreError::InvalidPair(format!(
                "base and quote are both {base}"
            )));
        }
        Ok(Self { base, quote })
    }

    /// The identifier the rate feed expects, e.g. `EUR-USD`.
    pub fn identifier(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: "EUR".to_string(),
            quote: "USD".to_string(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CoreError;

    /// Parse `EUR-USD` or `EUR/USD` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once(['-', '/'])
            .ok_or_else(|| CoreError::InvalidPair(format!("'{s}' (expected e.g. EUR-USD)")))?;
        Self::new(base, quote)
    }
}

fn normalize_code(code: &str) -> Result<String, CoreError> {
    let trimmed = code.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::InvalidPair(format!(
            "'{code}' must be exactly 3 ASCII letters (e.g., EUR, USD)"
        )));
    }
    Ok(trimmed)
}
