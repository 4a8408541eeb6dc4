//! RSI (Relative Strength Index) series and threshold events

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::normalize::sort_series;
use crate::indicators::validation::validate_period;
use crate::models::{IndicatorPoint, PriceBar};

/// RSI levels that mark overbought and oversold territory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
    /// Distance back inside the neutral band RSI must travel before a fresh
    /// entry starts a new episode. Zero reports the last raw transition.
    pub hysteresis: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
            hysteresis: 5.0,
        }
    }
}

/// Timestamps of the most recent overbought and oversold entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiEvents {
    pub overbought: Option<i64>,
    pub oversold: Option<i64>,
}

/// Wilder-smoothed RSI of closes.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss. The first
/// point lands on bar `period` (the first `period` price changes seed it).
pub fn rsi_series(bars: &[PriceBar], period: u32) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period(period)?;
    let bars = sort_series(bars);
    let period = period as usize;
    if bars.len() < period + 1 {
        return Ok(Vec::new());
    }

    let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
    let mut avg_gain = changes[..period].iter().map(|c| c.max(0.0)).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().map(|c| (-c).max(0.0)).sum::<f64>() / period as f64;

    let mut points = Vec::with_capacity(bars.len() - period);
    points.push(IndicatorPoint::new(bars[period].timestamp, rsi_value(avg_gain, avg_loss)));

    for (i, change) in changes.iter().enumerate().skip(period) {
        avg_gain = (avg_gain * (period - 1) as f64 + change.max(0.0)) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + (-change).max(0.0)) / period as f64;
        points.push(IndicatorPoint::new(bars[i + 1].timestamp, rsi_value(avg_gain, avg_loss)));
    }
    Ok(points)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Most recent overbought and oversold entries, scanning newest to oldest.
///
/// Overbought entry: previous RSI below the threshold, current at or above.
/// Oversold entry: previous above the threshold, current at or below. A dip
/// that stays within `hysteresis` of the threshold does not end an episode,
/// so the reported date is when the latest episode began.
pub fn rsi_threshold_events(points: &[IndicatorPoint], thresholds: &RsiThresholds) -> RsiEvents {
    let points = sort_series(points);
    if points.len() < 2 {
        return RsiEvents::default();
    }
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();

    let overbought = latest_episode_start(
        &values,
        |prev, cur| prev < thresholds.overbought && cur >= thresholds.overbought,
        |v| v < thresholds.overbought - thresholds.hysteresis,
    );
    let oversold = latest_episode_start(
        &values,
        |prev, cur| prev > thresholds.oversold && cur <= thresholds.oversold,
        |v| v > thresholds.oversold + thresholds.hysteresis,
    );

    RsiEvents {
        overbought: overbought.map(|i| points[i].timestamp),
        oversold: oversold.map(|i| points[i].timestamp),
    }
}

/// Index of the entry that began the latest episode. `is_entry(prev, cur)`
/// detects a transition; `is_reset(v)` marks a value that ends an episode.
fn latest_episode_start(
    values: &[f64],
    is_entry: impl Fn(f64, f64) -> bool,
    is_reset: impl Fn(f64) -> bool,
) -> Option<usize> {
    let mut found = None;
    for i in (1..values.len()).rev() {
        let (prev, cur) = (values[i - 1], values[i]);
        if found.is_some() && is_reset(cur) {
            break;
        }
        if is_entry(prev, cur) {
            found = Some(i);
            if is_reset(prev) {
                break;
            }
        }
    }
    found
}
