//! Unit tests for MACD series and crossovers

use trendwire::indicators::momentum::{macd_crosses, macd_series};
use trendwire::indicators::IndicatorError;
use trendwire::models::{MacdPoint, PriceBar};

const DAY_MS: i64 = 86_400_000;

fn create_test_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| PriceBar::flat(i as i64 * DAY_MS, 100.0 + ((i as f64) * 0.2).sin() * 10.0))
        .collect()
}

#[test]
fn test_macd_series_length_and_alignment() {
    let bars = create_test_bars(60);
    let points = macd_series(&bars, 12, 26, 9).unwrap();
    assert_eq!(points.len(), 27);
    assert_eq!(points[0].timestamp, bars[33].timestamp);
    for p in &points {
        assert!((p.histogram - (p.macd - p.signal)).abs() < 1e-12);
    }
}

#[test]
fn test_macd_insufficient_data() {
    let bars = create_test_bars(20);
    assert!(macd_series(&bars, 12, 26, 9).unwrap().is_empty());
}

#[test]
fn test_macd_rejects_inverted_periods() {
    let bars = create_test_bars(60);
    assert_eq!(
        macd_series(&bars, 26, 12, 9),
        Err(IndicatorError::InvalidPeriodOrder { fast: 26, slow: 12 })
    );
    assert_eq!(macd_series(&bars, 12, 26, 0), Err(IndicatorError::InvalidPeriod(0)));
}

#[test]
fn test_macd_crosses_report_earliest_events() {
    let points = vec![
        MacdPoint::new(0, -0.5, 0.0),
        MacdPoint::new(DAY_MS, 0.5, 0.0),
        MacdPoint::new(2 * DAY_MS, -0.5, 0.0),
        MacdPoint::new(3 * DAY_MS, 0.5, 0.0),
        MacdPoint::new(4 * DAY_MS, 0.8, 1.0),
    ];
    let crosses = macd_crosses(&points);
    assert_eq!(crosses.bullish, Some(DAY_MS));
    assert_eq!(crosses.bearish, Some(2 * DAY_MS));
    assert_eq!(crosses.zero_cross_above, Some(DAY_MS));
    assert_eq!(crosses.zero_cross_below, Some(2 * DAY_MS));
}

#[test]
fn test_macd_signal_and_zero_crosses_are_independent() {
    // MACD stays positive while crossing its signal line
    let points = vec![
        MacdPoint::new(0, 1.0, 2.0),
        MacdPoint::new(DAY_MS, 3.0, 2.0),
        MacdPoint::new(2 * DAY_MS, 4.0, 2.5),
    ];
    let crosses = macd_crosses(&points);
    assert_eq!(crosses.bullish, Some(DAY_MS));
    assert_eq!(crosses.bearish, None);
    assert_eq!(crosses.zero_cross_above, None);
    assert_eq!(crosses.zero_cross_below, None);
}

#[test]
fn test_macd_crosses_need_two_points() {
    let crosses = macd_crosses(&[MacdPoint::new(0, 1.0, 0.0)]);
    assert_eq!(crosses, Default::default());
}
