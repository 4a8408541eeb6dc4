//! Price and indicator series as delivered by the upstream data provider.

use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data. `timestamp` is milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl PriceBar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar whose open, high, low and close are all `price`.
    pub fn flat(timestamp: i64, price: f64) -> Self {
        Self::new(timestamp, price, price, price, price, 0)
    }

    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// A single value of an RSI, SMA or EMA series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub timestamp: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdPoint {
    pub fn new(timestamp: i64, macd: f64, signal: f64) -> Self {
        Self {
            timestamp,
            macd,
            signal,
            histogram: macd - signal,
        }
    }
}

/// Which single-valued indicator a series of [`IndicatorPoint`]s carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Rsi,
    Sma,
    Ema,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Sma => "sma",
            IndicatorKind::Ema => "ema",
        }
    }
}

/// Anything ordered on the trading calendar.
pub trait Timestamped {
    fn timestamp(&self) -> i64;

    /// False when a value the detectors compare is NaN or infinite.
    fn is_valid(&self) -> bool;
}

impl Timestamped for PriceBar {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Timestamped for IndicatorPoint {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn is_valid(&self) -> bool {
        self.value.is_finite()
    }
}

impl Timestamped for MacdPoint {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn is_valid(&self) -> bool {
        self.macd.is_finite() && self.signal.is_finite()
    }
}
