//! Runtime configuration.
//!
//! Analysis tuning lives in [`AnalysisConfig`] and is passed explicitly to the
//! analyzer. Only the binaries read the process environment, through the
//! `from_env` constructors below.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Upper bound on `HISTORY_DAYS`, matching the indicator point limit.
pub const MAX_HISTORY_DAYS: i64 = 5000;

/// Keep a history span within `1..=MAX_HISTORY_DAYS`.
pub fn clamp_history_days(days: i64) -> i64 {
    days.clamp(1, MAX_HISTORY_DAYS)
}

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Thresholds, windows and tolerances used by the turning-point detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// RSI must retreat this far past the threshold before a new entry
    /// counts as a separate episode.
    pub rsi_hysteresis: f64,
    pub recent_swing_window: usize,
    /// Number of trailing bars searched for the recent swing high/low.
    pub recent_swing_tail: usize,
    pub level_swing_window: usize,
    /// Trailing bar counts whose swing points are pooled into levels.
    pub level_lookbacks: Vec<usize>,
    pub level_min_bars: usize,
    /// Dollar distance within which a swing point joins an existing cluster.
    pub cluster_tolerance: f64,
    /// Maximum distance of a level from the current price, as a fraction.
    pub level_proximity_pct: f64,
    /// Calendar days, counted back from the latest bar, that make a level recent.
    pub level_recency_days: u32,
    pub level_rounding: f64,
    /// Aligned samples searched for golden/death crosses.
    pub max_cross_lookback: usize,
    pub fifty_two_week_bars: usize,
    pub break_lookback: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            rsi_hysteresis: 5.0,
            recent_swing_window: 2,
            recent_swing_tail: 60,
            level_swing_window: 5,
            level_lookbacks: vec![90, 180, 252],
            level_min_bars: 30,
            cluster_tolerance: 1.0,
            level_proximity_pct: 0.20,
            level_recency_days: 60,
            level_rounding: 0.5,
            max_cross_lookback: 252,
            fifty_two_week_bars: 252,
            break_lookback: 252,
        }
    }
}

/// Periods used when indicator series have to be derived from bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub rsi: u32,
    pub sma_fast: u32,
    pub sma_slow: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            sma_fast: 50,
            sma_slow: 200,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Credentials and endpoint of the upstream market-data API.
#[derive(Debug, Clone)]
pub struct PolygonConfig {
    pub api_key: String,
    pub base_url: String,
}

impl PolygonConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_POLYGON_BASE_URL.to_string(),
        }
    }

    /// `None` when `POLYGON_API_KEY` is unset or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("POLYGON_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
        let base_url = env::var("POLYGON_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_POLYGON_BASE_URL.to_string());
        Some(Self { api_key, base_url })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Calendar days of history fetched per ticker analysis.
    pub history_days: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            history_days: 400,
        }
    }
}

impl ServerConfig {
    pub fn new(port: u16, history_days: i64) -> Self {
        Self {
            port,
            history_days: clamp_history_days(history_days),
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let history_days = env::var("HISTORY_DAYS")
            .ok()
            .and_then(|d| d.parse().ok())
            .filter(|d: &i64| *d > 0)
            .unwrap_or(defaults.history_days);
        Self::new(port, history_days)
    }
}
