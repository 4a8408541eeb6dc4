//! MACD (Moving Average Convergence Divergence) series and crossovers

use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::normalize::{align_with_constant, sort_series, AlignedPair};
use crate::indicators::trend::crossover::{first_crossover, CrossDirection};
use crate::indicators::trend::ema::ema_values;
use crate::indicators::validation::validate_period;
use crate::models::{IndicatorPoint, MacdPoint, PriceBar};

/// Earliest occurrence of each MACD event in the supplied window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdCrosses {
    /// MACD line crossed above the signal line.
    pub bullish: Option<i64>,
    /// MACD line crossed below the signal line.
    pub bearish: Option<i64>,
    pub zero_cross_above: Option<i64>,
    pub zero_cross_below: Option<i64>,
}

/// Calculate the MACD series
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn macd_series(
    bars: &[PriceBar],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Result<Vec<MacdPoint>, IndicatorError> {
    validate_period(fast_period)?;
    validate_period(slow_period)?;
    validate_period(signal_period)?;
    if fast_period >= slow_period {
        return Err(IndicatorError::InvalidPeriodOrder {
            fast: fast_period,
            slow: slow_period,
        });
    }

    let bars = sort_series(bars);
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let (fast, slow, signal) = (fast_period as usize, slow_period as usize, signal_period as usize);

    let fast_ema = ema_values(&closes, fast);
    let slow_ema = ema_values(&closes, slow);
    if slow_ema.is_empty() {
        return Ok(Vec::new());
    }

    // fast_ema[k] belongs to bar k + fast - 1, slow_ema[k] to bar k + slow - 1
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(k, slow_value)| fast_ema[k + slow - fast] - slow_value)
        .collect();

    let signal_line = ema_values(&macd_line, signal);
    let first_bar = slow - 1 + signal - 1;

    Ok(signal_line
        .iter()
        .enumerate()
        .map(|(k, &signal_value)| {
            MacdPoint::new(
                bars[first_bar + k].timestamp,
                macd_line[k + signal - 1],
                signal_value,
            )
        })
        .collect())
}

/// Earliest signal-line and zero-line crosses, scanning oldest to newest.
pub fn macd_crosses(points: &[MacdPoint]) -> MacdCrosses {
    let points = sort_series(points);
    if points.len() < 2 {
        return MacdCrosses::default();
    }

    let signal_pairs: Vec<AlignedPair> = points
        .iter()
        .map(|p| AlignedPair::new(p.timestamp, p.macd, p.signal))
        .collect();
    let macd_line: Vec<IndicatorPoint> = points
        .iter()
        .map(|p| IndicatorPoint::new(p.timestamp, p.macd))
        .collect();
    let zero_pairs = align_with_constant(&macd_line, 0.0);

    MacdCrosses {
        bullish: first_crossover(&signal_pairs, CrossDirection::Upward).map(|c| c.timestamp),
        bearish: first_crossover(&signal_pairs, CrossDirection::Downward).map(|c| c.timestamp),
        zero_cross_above: first_crossover(&zero_pairs, CrossDirection::Upward).map(|c| c.timestamp),
        zero_cross_below: first_crossover(&zero_pairs, CrossDirection::Downward)
            .map(|c| c.timestamp),
    }
}
