//! Unit tests for RSI series and threshold events

use trendwire::indicators::momentum::{rsi_series, rsi_threshold_events, RsiThresholds};
use trendwire::models::{IndicatorPoint, PriceBar};

const DAY_MS: i64 = 86_400_000;

fn rsi(values: &[f64]) -> Vec<IndicatorPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| IndicatorPoint::new(i as i64 * DAY_MS, *v))
        .collect()
}

fn day(i: i64) -> Option<i64> {
    Some(i * DAY_MS)
}

#[test]
fn test_overbought_reports_first_entry_of_episode() {
    let events = rsi_threshold_events(&rsi(&[65.0, 68.0, 71.0, 69.0, 72.0]), &RsiThresholds::default());
    assert_eq!(events.overbought, day(2));
    assert_eq!(events.oversold, None);
}

#[test]
fn test_zero_hysteresis_reports_latest_transition() {
    let thresholds = RsiThresholds {
        hysteresis: 0.0,
        ..RsiThresholds::default()
    };
    let events = rsi_threshold_events(&rsi(&[65.0, 68.0, 71.0, 69.0, 72.0]), &thresholds);
    assert_eq!(events.overbought, day(4));
}

#[test]
fn test_deep_retreat_starts_new_episode() {
    let events = rsi_threshold_events(&rsi(&[65.0, 71.0, 60.0, 72.0]), &RsiThresholds::default());
    assert_eq!(events.overbought, day(3));
}

#[test]
fn test_oversold_entry() {
    let events = rsi_threshold_events(&rsi(&[35.0, 29.0, 31.0, 28.0]), &RsiThresholds::default());
    assert_eq!(events.oversold, day(1));
    assert_eq!(events.overbought, None);
}

#[test]
fn test_exact_threshold_counts_as_entry() {
    let events = rsi_threshold_events(&rsi(&[50.0, 70.0, 50.0, 30.0]), &RsiThresholds::default());
    assert_eq!(events.overbought, day(1));
    assert_eq!(events.oversold, day(3));
}

#[test]
fn test_series_starting_overbought_has_no_entry() {
    let events = rsi_threshold_events(&rsi(&[75.0, 78.0, 80.0]), &RsiThresholds::default());
    assert_eq!(events.overbought, None);
}

#[test]
fn test_fewer_than_two_points() {
    let events = rsi_threshold_events(&rsi(&[80.0]), &RsiThresholds::default());
    assert_eq!(events.overbought, None);
    assert_eq!(events.oversold, None);
}

#[test]
fn test_unordered_input_gives_same_events() {
    let mut points = rsi(&[65.0, 68.0, 71.0, 69.0, 72.0]);
    points.reverse();
    let events = rsi_threshold_events(&points, &RsiThresholds::default());
    assert_eq!(events.overbought, day(2));
}

#[test]
fn test_rsi_series_of_rising_closes_is_100() {
    let bars: Vec<PriceBar> = (0..20)
        .map(|i| PriceBar::flat(i * DAY_MS, 100.0 + i as f64))
        .collect();
    let points = rsi_series(&bars, 14).unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0].timestamp, bars[14].timestamp);
    assert!(points.iter().all(|p| (p.value - 100.0).abs() < 1e-9));
}

#[test]
fn test_rsi_series_stays_in_range() {
    let bars: Vec<PriceBar> = (0..60)
        .map(|i| PriceBar::flat(i * DAY_MS, 100.0 + ((i as f64) * 0.5).sin() * 5.0))
        .collect();
    let points = rsi_series(&bars, 14).unwrap();
    assert_eq!(points.len(), 46);
    assert!(points.iter().all(|p| (0.0..=100.0).contains(&p.value)));
}

#[test]
fn test_rsi_series_insufficient_data() {
    let bars: Vec<PriceBar> = (0..14).map(|i| PriceBar::flat(i * DAY_MS, 100.0)).collect();
    assert!(rsi_series(&bars, 14).unwrap().is_empty());
}
