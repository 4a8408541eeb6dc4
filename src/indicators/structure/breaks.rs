//! Support and resistance breaks against the latest confirmed swing.

use serde::{Deserialize, Serialize};

use crate::indicators::normalize::sort_series;
use crate::indicators::structure::swing::swing_indices;
use crate::models::{PriceBar, SwingKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBreaks {
    pub support_break: Option<i64>,
    pub resistance_break: Option<i64>,
}

/// Most recent closes through the prevailing swing low (support) and swing
/// high (resistance) within the trailing `lookback` bars.
///
/// A swing becomes the prevailing level once `window` later bars have
/// confirmed it. A support break is a close below the level after a close at
/// or above it; a resistance break is the mirror image.
pub fn level_breaks(bars: &[PriceBar], window: usize, lookback: usize) -> LevelBreaks {
    let bars = sort_series(bars);
    let start = bars.len().saturating_sub(lookback);
    let bars = &bars[start..];

    let swings = swing_indices(bars, window);
    let lows: Vec<usize> = swings
        .iter()
        .filter(|(_, kind)| *kind == SwingKind::Low)
        .map(|(i, _)| *i)
        .collect();
    let highs: Vec<usize> = swings
        .iter()
        .filter(|(_, kind)| *kind == SwingKind::High)
        .map(|(i, _)| *i)
        .collect();

    let (mut next_low, mut next_high) = (0, 0);
    let (mut support, mut resistance): (Option<f64>, Option<f64>) = (None, None);
    let mut breaks = LevelBreaks::default();

    for i in 1..bars.len() {
        while next_low < lows.len() && lows[next_low] + window < i {
            support = Some(bars[lows[next_low]].low);
            next_low += 1;
        }
        while next_high < highs.len() && highs[next_high] + window < i {
            resistance = Some(bars[highs[next_high]].high);
            next_high += 1;
        }

        let (prev, cur) = (bars[i - 1].close, bars[i].close);
        if let Some(level) = support {
            if prev >= level && cur < level {
                breaks.support_break = Some(bars[i].timestamp);
            }
        }
        if let Some(level) = resistance {
            if prev <= level && cur > level {
                breaks.resistance_break = Some(bars[i].timestamp);
            }
        }
    }
    breaks
}
