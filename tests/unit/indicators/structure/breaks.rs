//! Unit tests for support and resistance breaks

use trendwire::indicators::structure::level_breaks;
use trendwire::models::PriceBar;

const DAY_MS: i64 = 86_400_000;

fn bar(i: usize, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar::new(i as i64 * DAY_MS, close, high, low, close, 1_000)
}

fn flat(count: usize) -> Vec<PriceBar> {
    (0..count).map(|i| bar(i, 100.5, 99.5, 100.0)).collect()
}

#[test]
fn test_close_below_confirmed_swing_low_is_support_break() {
    let mut bars = flat(30);
    bars[10] = bar(10, 100.5, 95.0, 100.0);
    bars.push(bar(30, 100.5, 93.5, 94.0));
    for i in 31..40 {
        bars.push(bar(i, 94.2, 93.8, 94.0));
    }

    let breaks = level_breaks(&bars, 5, 252);
    assert_eq!(breaks.support_break, Some(30 * DAY_MS));
    assert_eq!(breaks.resistance_break, None);
}

#[test]
fn test_close_above_confirmed_swing_high_is_resistance_break() {
    let mut bars = flat(30);
    bars[10] = bar(10, 105.0, 99.5, 100.0);
    bars.push(bar(30, 106.5, 99.5, 106.0));
    for i in 31..40 {
        bars.push(bar(i, 106.2, 105.8, 106.0));
    }

    let breaks = level_breaks(&bars, 5, 252);
    assert_eq!(breaks.resistance_break, Some(30 * DAY_MS));
    assert_eq!(breaks.support_break, None);
}

#[test]
fn test_break_outside_lookback_is_ignored() {
    let mut bars = flat(30);
    bars[10] = bar(10, 100.5, 95.0, 100.0);
    bars.push(bar(30, 100.5, 93.5, 94.0));
    for i in 31..40 {
        bars.push(bar(i, 94.2, 93.8, 94.0));
    }

    let breaks = level_breaks(&bars, 5, 8);
    assert_eq!(breaks.support_break, None);
}

#[test]
fn test_no_swings_no_breaks() {
    let breaks = level_breaks(&flat(50), 5, 252);
    assert_eq!(breaks, Default::default());
}
