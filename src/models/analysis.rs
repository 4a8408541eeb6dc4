//! Findings produced by the turning-point analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{IndicatorPoint, MacdPoint, PriceBar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingKind {
    High,
    Low,
}

/// A local price extreme relative to a symmetric window of bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingPoint {
    pub timestamp: i64,
    pub price: f64,
    pub kind: SwingKind,
}

/// Candidate support or resistance level aggregated from nearby swing points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCluster {
    /// Running average of every swing price folded into the cluster.
    pub price: f64,
    pub touches: u32,
    pub most_recent_timestamp: i64,
}

impl LevelCluster {
    pub fn new(point: &SwingPoint) -> Self {
        Self {
            price: point.price,
            touches: 1,
            most_recent_timestamp: point.timestamp,
        }
    }

    pub fn absorb(&mut self, point: &SwingPoint) {
        let touches = self.touches as f64;
        self.price = (self.price * touches + point.price) / (touches + 1.0);
        self.touches += 1;
        self.most_recent_timestamp = self.most_recent_timestamp.max(point.timestamp);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Most significant swing high and low in the recent tail of the series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentSwings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<SwingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<SwingPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_close: f64,
    pub end_close: f64,
    pub return_percent: f64,
}

/// Dated trading events found in the lookback window.
///
/// A field is present only when the event was actually observed; consumers
/// must never phrase an event whose date is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurningPoints {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rsi_overbought_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rsi_oversold_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub golden_cross_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub death_cross_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub macd_bullish_cross_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub macd_bearish_cross_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub macd_zero_cross_above_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub macd_zero_cross_below_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recent_swing_high_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recent_swing_low_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fifty_two_week_high_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fifty_two_week_low_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub support_break_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resistance_break_date: Option<NaiveDate>,
}

impl TurningPoints {
    /// Number of events present in the record.
    pub fn event_count(&self) -> usize {
        [
            self.rsi_overbought_date,
            self.rsi_oversold_date,
            self.golden_cross_date,
            self.death_cross_date,
            self.macd_bullish_cross_date,
            self.macd_bearish_cross_date,
            self.macd_zero_cross_above_date,
            self.macd_zero_cross_below_date,
            self.recent_swing_high_date,
            self.recent_swing_low_date,
            self.fifty_two_week_high_date,
            self.fifty_two_week_low_date,
            self.support_break_date,
            self.resistance_break_date,
        ]
        .iter()
        .filter(|date| date.is_some())
        .count()
    }
}

/// One ticker's bars plus whatever indicator series the caller already has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub bars: Vec<PriceBar>,
    #[serde(default)]
    pub rsi: Vec<IndicatorPoint>,
    /// Fast moving average, conventionally the 50-day SMA.
    #[serde(default)]
    pub sma_fast: Vec<IndicatorPoint>,
    /// Slow moving average, conventionally the 200-day SMA.
    #[serde(default)]
    pub sma_slow: Vec<IndicatorPoint>,
    #[serde(default)]
    pub macd: Vec<MacdPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fifty_two_week_low: Option<f64>,
}

impl AnalysisInput {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self {
            bars,
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_rsi(mut self, rsi: Vec<IndicatorPoint>) -> Self {
        self.rsi = rsi;
        self
    }

    pub fn with_moving_averages(
        mut self,
        sma_fast: Vec<IndicatorPoint>,
        sma_slow: Vec<IndicatorPoint>,
    ) -> Self {
        self.sma_fast = sma_fast;
        self.sma_slow = sma_slow;
        self
    }

    pub fn with_macd(mut self, macd: Vec<MacdPoint>) -> Self {
        self.macd = macd;
        self
    }

    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_fifty_two_week_range(mut self, high: f64, low: f64) -> Self {
        self.fifty_two_week_high = Some(high);
        self.fifty_two_week_low = Some(low);
        self
    }
}

/// Everything the analysis engine found for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub turning_points: TurningPoints,
    pub levels: PriceLevels,
    pub recent_swings: RecentSwings,
    pub bars_analyzed: usize,
}
