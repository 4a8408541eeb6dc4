//! Moving-average primitives and rounding.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Smoothing factor `2 / (period + 1)`.
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = ema_multiplier(period);
    (value - previous) * k + previous
}

/// Exponential moving average of the whole slice, seeded with the SMA of
/// the first `period` values.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    Some(
        values[period..]
            .iter()
            .fold(seed, |prev, &value| ema_from_previous(value, prev, period)),
    )
}

/// Round to the nearest multiple of `increment` (e.g. 0.5 for half dollars).
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}

pub fn percent_change(from: f64, to: f64) -> f64 {
    ((to - from) / from) * 100.0
}
