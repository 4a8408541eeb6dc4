//! Series normalization: ordering, de-duplication and timestamp alignment.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{IndicatorPoint, Timestamped};

/// Two series sampled at the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    pub timestamp: i64,
    pub a: f64,
    pub b: f64,
}

impl AlignedPair {
    pub fn new(timestamp: i64, a: f64, b: f64) -> Self {
        Self { timestamp, a, b }
    }
}

/// Sort ascending by timestamp, keep the first sample per timestamp and drop
/// samples carrying non-finite values.
pub fn sort_series<T: Timestamped + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().filter(|item| item.is_valid()).cloned().collect();
    sorted.sort_by_key(|item| item.timestamp());
    sorted.dedup_by_key(|item| item.timestamp());
    sorted
}

/// Pair the values of `a` and `b` on every timestamp present in both.
///
/// Nothing is forward-filled: a timestamp missing from either side is skipped.
pub fn align(a: &[IndicatorPoint], b: &[IndicatorPoint]) -> Vec<AlignedPair> {
    let b_values: BTreeMap<i64, f64> = sort_series(b)
        .into_iter()
        .map(|p| (p.timestamp, p.value))
        .collect();

    sort_series(a)
        .into_iter()
        .filter_map(|p| {
            b_values
                .get(&p.timestamp)
                .map(|&b_value| AlignedPair::new(p.timestamp, p.value, b_value))
        })
        .collect()
}

/// Pair a series against a constant, e.g. MACD against the zero line.
pub fn align_with_constant(series: &[IndicatorPoint], constant: f64) -> Vec<AlignedPair> {
    sort_series(series)
        .into_iter()
        .map(|p| AlignedPair::new(p.timestamp, p.value, constant))
        .collect()
}

/// Timestamps present in every series, ascending. Empty when no series are
/// given or they share no timestamp.
pub fn common_timestamps(series: &[&[IndicatorPoint]]) -> Vec<i64> {
    let mut iter = series.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut common: BTreeSet<i64> = sort_series(*first).iter().map(|p| p.timestamp).collect();
    for other in iter {
        let stamps: BTreeSet<i64> = sort_series(*other).iter().map(|p| p.timestamp).collect();
        common = common.intersection(&stamps).copied().collect();
        if common.is_empty() {
            break;
        }
    }
    common.into_iter().collect()
}
