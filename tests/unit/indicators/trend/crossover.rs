//! Unit tests for crossover detection and golden/death cross regimes

use trendwire::indicators::normalize::AlignedPair;
use trendwire::indicators::trend::{
    detect_crossovers, first_crossover, moving_average_cross, CrossDirection, TrendState,
};
use trendwire::models::IndicatorPoint;

const DAY_MS: i64 = 86_400_000;
const START: i64 = 1_704_067_200_000;

fn day(i: usize) -> i64 {
    START + i as i64 * DAY_MS
}

fn series(values: &[f64]) -> Vec<IndicatorPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| IndicatorPoint::new(day(i), *v))
        .collect()
}

/// Fast series offset from a flat slow series of 100.
fn fast_slow(spreads: &[f64]) -> (Vec<IndicatorPoint>, Vec<IndicatorPoint>) {
    let fast: Vec<f64> = spreads.iter().map(|s| 100.0 + s).collect();
    (series(&fast), series(&vec![100.0; spreads.len()]))
}

#[test]
fn test_single_golden_cross_in_rising_market() {
    // SMA-50 climbs through a flat SMA-200 on day 220 of 300
    let spreads: Vec<f64> = (0..300).map(|i| if i < 220 { -1.0 } else { 1.0 }).collect();
    let (fast, slow) = fast_slow(&spreads);

    let result = moving_average_cross(&fast, &slow, 252);
    assert_eq!(result.state, Some(TrendState::Bullish));
    assert_eq!(result.golden_cross, Some(day(220)));
    assert_eq!(result.death_cross, None);
}

#[test]
fn test_bullish_reports_golden_cross_after_last_death_cross() {
    let (fast, slow) = fast_slow(&[-1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
    let result = moving_average_cross(&fast, &slow, 0);
    assert_eq!(result.state, Some(TrendState::Bullish));
    assert_eq!(result.golden_cross, Some(day(5)));
    assert_eq!(result.death_cross, None);
}

#[test]
fn test_touch_and_rebound_keeps_first_golden_cross() {
    // touching the slow average is not a death cross
    let (fast, slow) = fast_slow(&[-1.0, 1.0, 0.0, 1.0, 2.0]);
    let result = moving_average_cross(&fast, &slow, 0);
    assert_eq!(result.golden_cross, Some(day(1)));
}

#[test]
fn test_bearish_reports_most_recent_death_cross() {
    let (fast, slow) = fast_slow(&[1.0, -1.0, 1.0, -1.0, -2.0]);
    let result = moving_average_cross(&fast, &slow, 0);
    assert_eq!(result.state, Some(TrendState::Bearish));
    assert_eq!(result.death_cross, Some(day(3)));
    assert_eq!(result.golden_cross, None);
}

#[test]
fn test_equal_averages_count_as_bearish() {
    let (fast, slow) = fast_slow(&[-1.0, 1.0, 0.0]);
    let result = moving_average_cross(&fast, &slow, 0);
    assert_eq!(result.state, Some(TrendState::Bearish));
    assert_eq!(result.golden_cross, None);
}

#[test]
fn test_cross_outside_lookback_is_ignored() {
    let mut spreads = vec![-1.0; 3];
    spreads.extend(vec![1.0; 10]);
    let (fast, slow) = fast_slow(&spreads);

    let bounded = moving_average_cross(&fast, &slow, 5);
    assert_eq!(bounded.state, Some(TrendState::Bullish));
    assert_eq!(bounded.golden_cross, None);

    let unbounded = moving_average_cross(&fast, &slow, 0);
    assert_eq!(unbounded.golden_cross, Some(day(3)));
}

#[test]
fn test_no_overlap_yields_nothing() {
    let fast = series(&[1.0, 2.0]);
    let slow: Vec<IndicatorPoint> = vec![IndicatorPoint::new(day(10), 1.0)];
    let result = moving_average_cross(&fast, &slow, 0);
    assert_eq!(result.state, None);
    assert_eq!(result.golden_cross, None);
    assert_eq!(result.death_cross, None);
}

#[test]
fn test_regime_never_reports_opposing_cross() {
    let patterns: Vec<Vec<f64>> = vec![
        vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0],
        vec![1.0, -1.0, 1.0, -1.0],
        vec![0.0, 0.0, 1.0, 0.0, -1.0],
        vec![-2.0, -1.0, 0.5, 0.2, -0.1, 0.3],
        (0..40).map(|i| ((i as f64) * 0.7).sin()).collect(),
        (0..40).map(|i| ((i as f64) * 0.3).cos() - 0.2).collect(),
    ];

    for spreads in patterns {
        let (fast, slow) = fast_slow(&spreads);
        let result = moving_average_cross(&fast, &slow, 0);
        let latest = *spreads.last().unwrap();
        if latest > 0.0 {
            assert_eq!(result.state, Some(TrendState::Bullish), "{:?}", spreads);
            assert!(result.death_cross.is_none(), "{:?}", spreads);
        } else {
            assert_eq!(result.state, Some(TrendState::Bearish), "{:?}", spreads);
            assert!(result.golden_cross.is_none(), "{:?}", spreads);
        }
    }
}

#[test]
fn test_detect_and_first_crossover() {
    let pairs = vec![
        AlignedPair::new(1, 1.0, 2.0),
        AlignedPair::new(2, 3.0, 2.0),
        AlignedPair::new(3, 1.0, 2.0),
        AlignedPair::new(4, 3.0, 2.0),
    ];
    let crosses = detect_crossovers(&pairs);
    assert_eq!(crosses.len(), 3);
    assert_eq!(crosses[0].direction, CrossDirection::Upward);
    assert_eq!(crosses[1].direction, CrossDirection::Downward);

    let first_up = first_crossover(&pairs, CrossDirection::Upward).unwrap();
    assert_eq!(first_up.timestamp, 2);
    let first_down = first_crossover(&pairs, CrossDirection::Downward).unwrap();
    assert_eq!(first_down.timestamp, 3);
}
