//! Percentage return between two dates on the trading calendar.

use crate::common::math::percent_change;
use crate::common::time::timestamp_to_date;
use crate::indicators::normalize::sort_series;
use crate::models::{PeriodReturn, PriceBar};

/// Bar standing in for `start`: the first bar at or after it, else the last
/// bar before it, else the earliest bar. `bars` must be sorted and non-empty.
fn resolve_start(bars: &[PriceBar], start: i64) -> Option<usize> {
    bars.iter()
        .position(|b| b.timestamp >= start)
        .or_else(|| bars.iter().rposition(|b| b.timestamp < start))
        .or_else(|| (!bars.is_empty()).then_some(0))
}

/// Bar standing in for `end`: the last bar at or before it, else the first
/// bar after it.
fn resolve_end(bars: &[PriceBar], end: i64) -> Option<usize> {
    bars.iter()
        .rposition(|b| b.timestamp <= end)
        .or_else(|| bars.iter().position(|b| b.timestamp > end))
}

/// Return from the close of the bar resolved for `start` to the close of the
/// bar resolved for `end`, in percent.
///
/// `None` when there are no usable bars, a close is not positive, the start
/// bar falls after the end bar, or both resolve to the same bar.
pub fn period_return(bars: &[PriceBar], start: i64, end: i64) -> Option<PeriodReturn> {
    let bars = sort_series(bars);
    let start_idx = resolve_start(&bars, start)?;
    let end_idx = resolve_end(&bars, end)?;
    if start_idx >= end_idx {
        return None;
    }

    let (start_bar, end_bar) = (&bars[start_idx], &bars[end_idx]);
    if start_bar.close <= 0.0 || end_bar.close <= 0.0 {
        return None;
    }

    Some(PeriodReturn {
        start_date: timestamp_to_date(start_bar.timestamp)?,
        end_date: timestamp_to_date(end_bar.timestamp)?,
        start_close: start_bar.close,
        end_close: end_bar.close,
        return_percent: percent_change(start_bar.close, end_bar.close),
    })
}
