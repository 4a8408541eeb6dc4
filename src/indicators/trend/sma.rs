//! SMA (Simple Moving Average) series

use crate::indicators::error::IndicatorError;
use crate::indicators::normalize::sort_series;
use crate::indicators::validation::validate_period;
use crate::models::{IndicatorPoint, PriceBar};

/// Rolling SMA of closes; the first point lands on the `period`-th bar.
pub fn sma_series(bars: &[PriceBar], period: u32) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period(period)?;
    let bars = sort_series(bars);
    let period = period as usize;
    if bars.len() < period {
        return Ok(Vec::new());
    }

    let mut points = Vec::with_capacity(bars.len() - period + 1);
    let mut window_sum: f64 = bars[..period].iter().map(|b| b.close).sum();
    points.push(IndicatorPoint::new(bars[period - 1].timestamp, window_sum / period as f64));

    for i in period..bars.len() {
        window_sum += bars[i].close - bars[i - period].close;
        points.push(IndicatorPoint::new(bars[i].timestamp, window_sum / period as f64));
    }
    Ok(points)
}
