//! 52-week high and low.

use crate::indicators::normalize::sort_series;
use crate::models::{PriceBar, SwingKind, SwingPoint};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FiftyTwoWeekRange {
    pub high: Option<SwingPoint>,
    pub low: Option<SwingPoint>,
}

/// Bars of the trailing `window` carrying the 52-week high and low.
///
/// With a quoted high (low), the bar whose high (low) is closest to it is
/// chosen; otherwise the bar with the extreme value. Ties go to the more
/// recent bar.
pub fn fifty_two_week_extremes(
    bars: &[PriceBar],
    high_hint: Option<f64>,
    low_hint: Option<f64>,
    window: usize,
) -> FiftyTwoWeekRange {
    let bars = sort_series(bars);
    let start = bars.len().saturating_sub(window);
    let tail = &bars[start..];

    let high = match high_hint.filter(|h| h.is_finite()) {
        Some(hint) => latest_min_by(tail, |b| (b.high - hint).abs()),
        None => latest_min_by(tail, |b| -b.high),
    };
    let low = match low_hint.filter(|l| l.is_finite()) {
        Some(hint) => latest_min_by(tail, |b| (b.low - hint).abs()),
        None => latest_min_by(tail, |b| b.low),
    };

    FiftyTwoWeekRange {
        high: high.map(|b| SwingPoint {
            timestamp: b.timestamp,
            price: b.high,
            kind: SwingKind::High,
        }),
        low: low.map(|b| SwingPoint {
            timestamp: b.timestamp,
            price: b.low,
            kind: SwingKind::Low,
        }),
    }
}

fn latest_min_by(bars: &[PriceBar], key: impl Fn(&PriceBar) -> f64) -> Option<&PriceBar> {
    let mut best: Option<(&PriceBar, f64)> = None;
    for bar in bars {
        let k = key(bar);
        if best.map_or(true, |(_, best_key)| k <= best_key) {
            best = Some((bar, k));
        }
    }
    best.map(|(bar, _)| bar)
}
