use chrono::NaiveDate;

use crate::common::time::{date_to_timestamp, end_of_day_timestamp};
use crate::indicators::error::IndicatorError;

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, IndicatorError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| IndicatorError::InvalidDate(value.to_string()))
}

/// Parse a `start`/`end` pair, rejecting `start` after `end`.
pub fn parse_date_bounds(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), IndicatorError> {
    let start_date = parse_iso_date(start)?;
    let end_date = parse_iso_date(end)?;
    if start_date > end_date {
        return Err(IndicatorError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start_date, end_date))
}

/// Inclusive millisecond range covering both whole days.
pub fn date_range_millis(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    (date_to_timestamp(start), end_of_day_timestamp(end))
}

/// Parse a `start`/`end` pair into an inclusive millisecond range covering
/// both whole days.
pub fn parse_date_range(start: &str, end: &str) -> Result<(i64, i64), IndicatorError> {
    let (start_date, end_date) = parse_date_bounds(start, end)?;
    Ok(date_range_millis(start_date, end_date))
}

/// Upper-case ticker; letters, digits, `.` and `-` only.
pub fn parse_symbol(value: &str) -> Result<String, IndicatorError> {
    let symbol = value.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol.len() <= 12
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if valid {
        Ok(symbol)
    } else {
        Err(IndicatorError::InvalidSymbol(value.to_string()))
    }
}
