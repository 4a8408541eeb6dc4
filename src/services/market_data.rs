//! Market data provider interface and the fetch step of the analysis pipeline.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::common::time::{date_to_timestamp, end_of_day_timestamp};
use crate::config::IndicatorPeriods;
use crate::models::{
    AnalysisInput, IndicatorKind, IndicatorPoint, MacdPoint, PriceBar, Timestamped,
};
use crate::services::error::{DataError, DataResult};

/// Upper bound on indicator points requested per series.
pub const MAX_INDICATOR_LIMIT: usize = 5000;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars between `from` and `to`, both inclusive.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<Vec<PriceBar>>;

    /// Most recent `limit` daily values of a single-valued indicator.
    async fn get_indicator(
        &self,
        symbol: &str,
        kind: IndicatorKind,
        window: u32,
        limit: usize,
    ) -> DataResult<Vec<IndicatorPoint>>;

    async fn get_macd(
        &self,
        symbol: &str,
        periods: &IndicatorPeriods,
        limit: usize,
    ) -> DataResult<Vec<MacdPoint>>;
}

/// Fetch bars and indicator series for one ticker concurrently.
///
/// Bars are required. Indicator series are optional: a failed fetch is logged
/// and leaves that series empty so the remaining detectors still run.
pub async fn fetch_analysis_input(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    from: NaiveDate,
    to: NaiveDate,
    periods: &IndicatorPeriods,
) -> DataResult<AnalysisInput> {
    let limit = ((to - from).num_days().max(1) as usize).min(MAX_INDICATOR_LIMIT);

    let (bars, rsi, sma_fast, sma_slow, macd) = tokio::join!(
        provider.get_daily_bars(symbol, from, to),
        provider.get_indicator(symbol, IndicatorKind::Rsi, periods.rsi, limit),
        provider.get_indicator(symbol, IndicatorKind::Sma, periods.sma_fast, limit),
        provider.get_indicator(symbol, IndicatorKind::Sma, periods.sma_slow, limit),
        provider.get_macd(symbol, periods, limit),
    );

    let bars = bars?;
    if bars.is_empty() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
        });
    }

    // indicator limits count points, not calendar days
    let first = bars.iter().map(|b| b.timestamp).min().unwrap_or_default();
    let last = bars.iter().map(|b| b.timestamp).max().unwrap_or_default();
    let clip = |series: Vec<IndicatorPoint>| within_range(series, first, last);

    let input = AnalysisInput::new(bars)
        .with_symbol(symbol)
        .with_rsi(clip(optional_series(symbol, "rsi", rsi)))
        .with_moving_averages(
            clip(optional_series(symbol, "sma_fast", sma_fast)),
            clip(optional_series(symbol, "sma_slow", sma_slow)),
        )
        .with_macd(within_range(optional_series(symbol, "macd", macd), first, last));

    debug!(
        symbol = symbol,
        bars = input.bars.len(),
        rsi = input.rsi.len(),
        sma_fast = input.sma_fast.len(),
        sma_slow = input.sma_slow.len(),
        macd = input.macd.len(),
        "Fetched analysis input"
    );
    Ok(input)
}

/// Points with `first <= timestamp <= last`.
fn within_range<T: Timestamped>(points: Vec<T>, first: i64, last: i64) -> Vec<T> {
    points
        .into_iter()
        .filter(|p| (first..=last).contains(&p.timestamp()))
        .collect()
}

fn optional_series<T>(symbol: &str, series: &str, result: DataResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(symbol = symbol, series = series, error = %e, "Indicator fetch failed, continuing without it");
        Vec::new()
    })
}

/// Provider serving fixed series, for tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    bars: HashMap<String, Vec<PriceBar>>,
    indicators: HashMap<(String, IndicatorKind, u32), Vec<IndicatorPoint>>,
    macd: HashMap<String, Vec<MacdPoint>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_indicator(
        mut self,
        symbol: &str,
        kind: IndicatorKind,
        window: u32,
        points: Vec<IndicatorPoint>,
    ) -> Self {
        self.indicators.insert((symbol.to_string(), kind, window), points);
        self
    }

    pub fn with_macd(mut self, symbol: &str, points: Vec<MacdPoint>) -> Self {
        self.macd.insert(symbol.to_string(), points);
        self
    }
}

fn most_recent<T: Clone>(points: &[T], limit: usize) -> Vec<T> {
    let start = points.len().saturating_sub(limit);
    points[start..].to_vec()
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<Vec<PriceBar>> {
        let bars = self.bars.get(symbol).ok_or_else(|| DataError::NoData {
            symbol: symbol.to_string(),
        })?;
        let (start, end) = (date_to_timestamp(from), end_of_day_timestamp(to));
        Ok(bars
            .iter()
            .filter(|b| b.timestamp >= start && b.timestamp <= end)
            .copied()
            .collect())
    }

    async fn get_indicator(
        &self,
        symbol: &str,
        kind: IndicatorKind,
        window: u32,
        limit: usize,
    ) -> DataResult<Vec<IndicatorPoint>> {
        Ok(self
            .indicators
            .get(&(symbol.to_string(), kind, window))
            .map(|points| most_recent(points, limit))
            .unwrap_or_default())
    }

    async fn get_macd(
        &self,
        symbol: &str,
        _periods: &IndicatorPeriods,
        limit: usize,
    ) -> DataResult<Vec<MacdPoint>> {
        Ok(self
            .macd
            .get(symbol)
            .map(|points| most_recent(points, limit))
            .unwrap_or_default())
    }
}
