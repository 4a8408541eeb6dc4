//! Unit tests for period returns

use chrono::NaiveDate;
use trendwire::common::time::{date_to_timestamp, end_of_day_timestamp};
use trendwire::indicators::period_return;
use trendwire::models::PriceBar;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bar_on(day: NaiveDate, close: f64) -> PriceBar {
    PriceBar::flat(date_to_timestamp(day), close)
}

/// Trading days Fri 2024-01-05 through Fri 2024-01-12.
fn january_bars() -> Vec<PriceBar> {
    vec![
        bar_on(date(2024, 1, 5), 100.0),
        bar_on(date(2024, 1, 8), 102.0),
        bar_on(date(2024, 1, 9), 104.0),
        bar_on(date(2024, 1, 10), 103.0),
        bar_on(date(2024, 1, 11), 108.0),
        bar_on(date(2024, 1, 12), 110.0),
    ]
}

#[test]
fn test_weekend_start_rolls_forward_to_monday() {
    let result = period_return(
        &january_bars(),
        date_to_timestamp(date(2024, 1, 6)),
        end_of_day_timestamp(date(2024, 1, 12)),
    )
    .unwrap();

    assert_eq!(result.start_date, date(2024, 1, 8));
    assert_eq!(result.end_date, date(2024, 1, 12));
    assert_eq!(result.start_close, 102.0);
    let expected = (110.0 - 102.0) / 102.0 * 100.0;
    assert!((result.return_percent - expected).abs() < 1e-9);
}

#[test]
fn test_weekend_end_rolls_back_to_friday() {
    let result = period_return(
        &january_bars(),
        date_to_timestamp(date(2024, 1, 5)),
        end_of_day_timestamp(date(2024, 1, 14)),
    )
    .unwrap();
    assert_eq!(result.end_date, date(2024, 1, 12));
    assert!((result.return_percent - 10.0).abs() < 1e-9);
}

#[test]
fn test_start_before_history_uses_first_bar() {
    let result = period_return(
        &january_bars(),
        date_to_timestamp(date(2023, 12, 1)),
        end_of_day_timestamp(date(2024, 1, 9)),
    )
    .unwrap();
    assert_eq!(result.start_date, date(2024, 1, 5));
    assert_eq!(result.end_date, date(2024, 1, 9));
}

#[test]
fn test_start_after_history_is_rejected() {
    let result = period_return(
        &january_bars(),
        date_to_timestamp(date(2024, 2, 1)),
        end_of_day_timestamp(date(2024, 2, 5)),
    );
    assert!(result.is_none());
}

#[test]
fn test_same_day_range_is_rejected() {
    let day = date(2024, 1, 9);
    let result = period_return(&january_bars(), date_to_timestamp(day), end_of_day_timestamp(day));
    assert!(result.is_none());
}

#[test]
fn test_empty_and_non_positive_closes() {
    let start = date_to_timestamp(date(2024, 1, 5));
    let end = end_of_day_timestamp(date(2024, 1, 12));
    assert!(period_return(&[], start, end).is_none());

    let mut bars = january_bars();
    bars[1].close = 0.0;
    assert!(period_return(&bars, date_to_timestamp(date(2024, 1, 8)), end).is_none());
}

#[test]
fn test_unordered_bars() {
    let mut bars = january_bars();
    bars.reverse();
    let result = period_return(
        &bars,
        date_to_timestamp(date(2024, 1, 6)),
        end_of_day_timestamp(date(2024, 1, 12)),
    )
    .unwrap();
    assert_eq!(result.start_date, date(2024, 1, 8));
}
