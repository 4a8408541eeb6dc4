//! Crossover detection between two aligned series.
//!
//! The golden/death cross report is regime-aware: while the fast average sits
//! above the slow one, the golden cross that *started* the current bullish
//! regime is reported rather than whichever cross happened last.

use serde::{Deserialize, Serialize};

use crate::indicators::normalize::{align, AlignedPair};
use crate::models::IndicatorPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossDirection {
    /// Series `a` moved from at-or-below `b` to strictly above it.
    Upward,
    /// Series `a` moved from at-or-above `b` to strictly below it.
    Downward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossover {
    pub timestamp: i64,
    pub direction: CrossDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendState {
    Bullish,
    Bearish,
}

/// Golden/death cross summary for a fast/slow moving-average pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageCross {
    pub state: Option<TrendState>,
    pub golden_cross: Option<i64>,
    pub death_cross: Option<i64>,
}

fn classify(prev: &AlignedPair, cur: &AlignedPair) -> Option<CrossDirection> {
    if prev.a <= prev.b && cur.a > cur.b {
        Some(CrossDirection::Upward)
    } else if prev.a >= prev.b && cur.a < cur.b {
        Some(CrossDirection::Downward)
    } else {
        None
    }
}

/// Every crossover in `pairs`, oldest first. `pairs` must already be sorted.
pub fn detect_crossovers(pairs: &[AlignedPair]) -> Vec<Crossover> {
    pairs
        .windows(2)
        .filter_map(|w| {
            classify(&w[0], &w[1]).map(|direction| Crossover {
                timestamp: w[1].timestamp,
                direction,
            })
        })
        .collect()
}

/// Earliest crossover in the given direction; the scan stops at the first hit.
pub fn first_crossover(pairs: &[AlignedPair], direction: CrossDirection) -> Option<Crossover> {
    pairs.windows(2).find_map(|w| {
        classify(&w[0], &w[1])
            .filter(|d| *d == direction)
            .map(|direction| Crossover {
                timestamp: w[1].timestamp,
                direction,
            })
    })
}

/// Golden/death cross selection over the last `max_lookback` aligned samples
/// (`0` searches everything).
///
/// - Bullish (fast above slow on the latest sample): the oldest golden cross
///   after the most recent death cross; the most recent golden cross when none
///   postdates it; the first golden cross when there is no death cross.
/// - Bearish: the most recent death cross.
pub fn moving_average_cross(
    fast: &[IndicatorPoint],
    slow: &[IndicatorPoint],
    max_lookback: usize,
) -> MovingAverageCross {
    let mut pairs = align(fast, slow);
    if max_lookback > 0 && pairs.len() > max_lookback {
        pairs.drain(..pairs.len() - max_lookback);
    }

    let Some(latest) = pairs.last() else {
        return MovingAverageCross::default();
    };
    let state = if latest.a > latest.b {
        TrendState::Bullish
    } else {
        TrendState::Bearish
    };

    let crosses = detect_crossovers(&pairs);
    let last_death = crosses
        .iter()
        .rev()
        .find(|c| c.direction == CrossDirection::Downward)
        .map(|c| c.timestamp);

    match state {
        TrendState::Bullish => {
            let goldens: Vec<i64> = crosses
                .iter()
                .filter(|c| c.direction == CrossDirection::Upward)
                .map(|c| c.timestamp)
                .collect();
            let golden_cross = match last_death {
                Some(death) => goldens
                    .iter()
                    .find(|&&golden| golden > death)
                    .or_else(|| goldens.last())
                    .copied(),
                None => goldens.first().copied(),
            };
            MovingAverageCross {
                state: Some(state),
                golden_cross,
                death_cross: None,
            }
        }
        TrendState::Bearish => MovingAverageCross {
            state: Some(state),
            golden_cross: None,
            death_cross: last_death,
        },
    }
}
