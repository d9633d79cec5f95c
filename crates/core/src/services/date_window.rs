use chrono::{Days, Months, NaiveDate};

use crate::models::range::TimeRange;
use crate::models::window::DateWindow;

/// Compute the calendar window to request for `range`, ending on `today`.
///
/// | Range | `from`            |
/// |-------|-------------------|
/// | 24H   | today − 1 day     |
/// | 7D    | today − 6 days    |
/// | 1M    | today − 1 month   |
/// | 6M    | today − 6 months  |
/// | 1Y    | today − 1 year    |
///
/// Month and year steps use calendar arithmetic and clamp to the last
/// valid day of the target month (Mar 31 − 1 month = Feb 28/29).
/// Steps that would leave chrono's supported date range saturate at
/// `NaiveDate::MIN`.
pub fn compute_window(range: TimeRange, today: NaiveDate) -> DateWindow {
    let from = match range {
        TimeRange::Day => today.checked_sub_days(Days::new(1)),
        TimeRange::Week => today.checked_sub_days(Days::new(6)),
        TimeRange::Month => today.checked_sub_months(Months::new(1)),
        TimeRange::HalfYear => today.checked_sub_months(Months::new(6)),
        TimeRange::Year => today.checked_sub_months(Months::new(12)),
    }
    .unwrap_or(NaiveDate::MIN);

    DateWindow::ending_on(from, today)
}
