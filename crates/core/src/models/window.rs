use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Concrete calendar bounds requested from the rate feed.
///
/// Both ends are inclusive and `to >= from` always holds, including for
/// windows read back through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

/// Unchecked wire shape of a [`DateWindow`].
#[derive(Deserialize)]
struct RawWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl TryFrom<RawWindow> for DateWindow {
    type Error = CoreError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.from, raw.to)
    }
}

impl DateWindow {
    /// Build a window, rejecting one that ends before it starts.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if to < from {
            return Err(CoreError::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Window ending on `to`; a `from` past `to` collapses to a single day.
    pub(crate) fn ending_on(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from: from.min(to), to }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of calendar days between `from` and `to`.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}
