//! Unit tests for series normalization

use trendwire::indicators::normalize::{align, align_with_constant, common_timestamps, sort_series};
use trendwire::models::{IndicatorPoint, PriceBar};

fn point(ts: i64, value: f64) -> IndicatorPoint {
    IndicatorPoint::new(ts, value)
}

#[test]
fn test_sort_series_orders_and_keeps_first_duplicate() {
    let series = vec![point(3, 30.0), point(1, 10.0), point(3, 99.0), point(2, 20.0)];
    let sorted = sort_series(&series);
    assert_eq!(sorted, vec![point(1, 10.0), point(2, 20.0), point(3, 30.0)]);
}

#[test]
fn test_sort_series_drops_non_finite_samples() {
    let series = vec![point(1, 10.0), point(2, f64::NAN), point(3, f64::INFINITY)];
    assert_eq!(sort_series(&series), vec![point(1, 10.0)]);

    let bars = vec![
        PriceBar::new(2, 1.0, f64::NAN, 1.0, 1.0, 0),
        PriceBar::flat(1, 5.0),
    ];
    assert_eq!(sort_series(&bars), vec![PriceBar::flat(1, 5.0)]);
}

#[test]
fn test_align_pairs_only_shared_timestamps() {
    let fast = vec![point(1, 1.0), point(2, 2.0), point(4, 4.0)];
    let slow = vec![point(4, 40.0), point(2, 20.0), point(3, 30.0)];
    let pairs = align(&fast, &slow);

    assert_eq!(pairs.len(), 2);
    assert_eq!((pairs[0].timestamp, pairs[0].a, pairs[0].b), (2, 2.0, 20.0));
    assert_eq!((pairs[1].timestamp, pairs[1].a, pairs[1].b), (4, 4.0, 40.0));
}

#[test]
fn test_align_with_constant() {
    let pairs = align_with_constant(&[point(2, -1.0), point(1, 1.0)], 0.0);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].timestamp, 1);
    assert!(pairs.iter().all(|p| p.b == 0.0));
}

#[test]
fn test_common_timestamps() {
    let a = vec![point(1, 0.0), point(2, 0.0), point(3, 0.0)];
    let b = vec![point(3, 0.0), point(2, 0.0)];
    let c = vec![point(2, 0.0), point(3, 0.0), point(4, 0.0)];
    assert_eq!(common_timestamps(&[&a[..], &b[..], &c[..]]), vec![2, 3]);
    assert!(common_timestamps(&[]).is_empty());
}
