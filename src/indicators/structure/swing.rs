//! Swing high/low detection with a symmetric window.

use crate::indicators::normalize::sort_series;
use crate::models::{PriceBar, RecentSwings, SwingKind, SwingPoint};

/// Indices of swing points in an already-sorted bar slice.
///
/// Bar `i` is a swing high when its high is strictly greater than every other
/// high in `[i - window, i + window]`, and a swing low when its low is
/// strictly less than every other low there. Only interior bars qualify.
pub(crate) fn swing_indices(bars: &[PriceBar], window: usize) -> Vec<(usize, SwingKind)> {
    let n = bars.len();
    if window == 0 || n < 2 * window + 1 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for i in window..n - window {
        let neighbours = (i - window..=i + window).filter(|&j| j != i);
        let (mut is_high, mut is_low) = (true, true);
        for j in neighbours {
            is_high &= bars[i].high > bars[j].high;
            is_low &= bars[i].low < bars[j].low;
            if !is_high && !is_low {
                break;
            }
        }
        if is_high {
            out.push((i, SwingKind::High));
        }
        if is_low {
            out.push((i, SwingKind::Low));
        }
    }
    out
}

fn to_swing_point(bar: &PriceBar, kind: SwingKind) -> SwingPoint {
    let price = match kind {
        SwingKind::High => bar.high,
        SwingKind::Low => bar.low,
    };
    SwingPoint {
        timestamp: bar.timestamp,
        price,
        kind,
    }
}

/// Swing highs and lows in chronological order. Fewer than `2 * window + 1`
/// bars yields nothing.
pub fn find_swing_points(bars: &[PriceBar], window: usize) -> Vec<SwingPoint> {
    let bars = sort_series(bars);
    swing_indices(&bars, window)
        .into_iter()
        .map(|(i, kind)| to_swing_point(&bars[i], kind))
        .collect()
}

/// Highest swing high and lowest swing low among the last `tail` bars.
/// Equal prices resolve to the more recent swing.
pub fn recent_swings(bars: &[PriceBar], window: usize, tail: usize) -> RecentSwings {
    let bars = sort_series(bars);
    let start = bars.len().saturating_sub(tail);
    let swings = find_swing_points(&bars[start..], window);

    let mut recent = RecentSwings::default();
    for swing in swings {
        match swing.kind {
            SwingKind::High => {
                if recent.high.map_or(true, |h| swing.price >= h.price) {
                    recent.high = Some(swing);
                }
            }
            SwingKind::Low => {
                if recent.low.map_or(true, |l| swing.price <= l.price) {
                    recent.low = Some(swing);
                }
            }
        }
    }
    recent
}
