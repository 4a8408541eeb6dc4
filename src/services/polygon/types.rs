//! Response payloads of the Polygon REST API.

use serde::Deserialize;

use crate::models::{IndicatorPoint, MacdPoint, PriceBar};

/// `/v2/aggs/ticker/{ticker}/range/1/day/{from}/{to}`
#[derive(Debug, Deserialize)]
pub struct AggregatesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<AggregateBar>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AggregateBar {
    /// Start of the aggregate window, ms epoch.
    pub t: i64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    #[serde(default)]
    pub v: f64,
}

impl From<AggregateBar> for PriceBar {
    fn from(bar: AggregateBar) -> Self {
        let volume = if bar.v.is_finite() && bar.v > 0.0 {
            bar.v.round() as u64
        } else {
            0
        };
        PriceBar::new(bar.t, bar.o, bar.h, bar.l, bar.c, volume)
    }
}

/// `/v1/indicators/{rsi|sma|ema|macd}/{ticker}`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct IndicatorResponse<V> {
    #[serde(default)]
    pub results: Option<IndicatorResults<V>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct IndicatorResults<V> {
    #[serde(default)]
    pub values: Vec<V>,
}

impl<V> IndicatorResponse<V> {
    pub fn into_values(self) -> Vec<V> {
        self.results.map(|r| r.values).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IndicatorValue {
    pub timestamp: i64,
    pub value: f64,
}

impl From<IndicatorValue> for IndicatorPoint {
    fn from(v: IndicatorValue) -> Self {
        IndicatorPoint::new(v.timestamp, v.value)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MacdValue {
    pub timestamp: i64,
    pub value: f64,
    pub signal: f64,
    #[serde(default)]
    pub histogram: Option<f64>,
}

impl From<MacdValue> for MacdPoint {
    fn from(v: MacdValue) -> Self {
        MacdPoint {
            timestamp: v.timestamp,
            macd: v.value,
            signal: v.signal,
            histogram: v.histogram.unwrap_or(v.value - v.signal),
        }
    }
}
