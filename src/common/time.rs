//! Conversions between epoch-millisecond timestamps and calendar dates.

use chrono::{DateTime, NaiveDate};

pub const DAY_MS: i64 = 86_400_000;

/// UTC calendar date of a millisecond timestamp; `None` when out of range.
pub fn timestamp_to_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp).map(|dt| dt.date_naive())
}

/// Millisecond timestamp of midnight UTC on `date`.
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Millisecond timestamp of the last millisecond of `date` (UTC).
pub fn end_of_day_timestamp(date: NaiveDate) -> i64 {
    date_to_timestamp(date) + DAY_MS - 1
}

pub fn days_to_ms(days: u32) -> i64 {
    days as i64 * DAY_MS
}
