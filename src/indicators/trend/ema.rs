//! EMA (Exponential Moving Average) series

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::normalize::sort_series;
use crate::indicators::validation::validate_period;
use crate::models::{IndicatorPoint, PriceBar};

/// EMA over raw values, seeded with the SMA of the first `period` values.
/// Returns one value per input from index `period - 1` onward.
pub fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let Some(seed) = math::sma(&values[..period], period) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);
    let mut prev = seed;
    for &value in &values[period..] {
        prev = math::ema_from_previous(value, prev, period);
        out.push(prev);
    }
    out
}

/// EMA of closes for a specific period
pub fn ema_series(bars: &[PriceBar], period: u32) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period(period)?;
    let bars = sort_series(bars);
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let offset = period as usize - 1;

    Ok(ema_values(&closes, period as usize)
        .into_iter()
        .enumerate()
        .map(|(i, value)| IndicatorPoint::new(bars[i + offset].timestamp, value))
        .collect())
}
