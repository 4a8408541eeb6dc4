//! Runs every detector over one input and merges the findings.

use chrono::NaiveDate;
use tracing::debug;

use crate::common::time::timestamp_to_date;
use crate::config::AnalysisConfig;
use crate::indicators::momentum::{macd_crosses, rsi_threshold_events, RsiThresholds};
use crate::indicators::normalize::{common_timestamps, sort_series};
use crate::indicators::structure::{
    fifty_two_week_extremes, level_breaks, recent_swings, support_resistance,
};
use crate::indicators::trend::moving_average_cross;
use crate::models::{AnalysisInput, PriceLevels, TechnicalAnalysis, TurningPoints};

fn to_date(timestamp: Option<i64>) -> Option<NaiveDate> {
    timestamp.and_then(timestamp_to_date)
}

/// Turning-point analyzer. Each detector runs independently, so a gap in one
/// series (say, no MACD data) only blanks the findings that depend on it.
#[derive(Debug, Clone, Default)]
pub struct TechnicalAnalyzer {
    config: AnalysisConfig,
}

impl TechnicalAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, input: &AnalysisInput) -> TechnicalAnalysis {
        let config = &self.config;
        let bars = sort_series(&input.bars);

        // a quoted price wins over the last close
        let current_price = input
            .current_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| bars.last().map(|b| b.close).filter(|c| *c > 0.0));

        let thresholds = RsiThresholds {
            overbought: config.rsi_overbought,
            oversold: config.rsi_oversold,
            hysteresis: config.rsi_hysteresis,
        };
        let rsi = rsi_threshold_events(&input.rsi, &thresholds);
        let ma_cross = moving_average_cross(&input.sma_fast, &input.sma_slow, config.max_cross_lookback);
        let macd = macd_crosses(&input.macd);
        let swings = recent_swings(&bars, config.recent_swing_window, config.recent_swing_tail);
        let extremes = fifty_two_week_extremes(
            &bars,
            input.fifty_two_week_high,
            input.fifty_two_week_low,
            config.fifty_two_week_bars,
        );
        let breaks = level_breaks(&bars, config.level_swing_window, config.break_lookback);
        let levels = current_price
            .map(|price| support_resistance(&bars, price, config))
            .unwrap_or_else(PriceLevels::default);

        let turning_points = TurningPoints {
            rsi_overbought_date: to_date(rsi.overbought),
            rsi_oversold_date: to_date(rsi.oversold),
            golden_cross_date: to_date(ma_cross.golden_cross),
            death_cross_date: to_date(ma_cross.death_cross),
            macd_bullish_cross_date: to_date(macd.bullish),
            macd_bearish_cross_date: to_date(macd.bearish),
            macd_zero_cross_above_date: to_date(macd.zero_cross_above),
            macd_zero_cross_below_date: to_date(macd.zero_cross_below),
            recent_swing_high_date: to_date(swings.high.map(|s| s.timestamp)),
            recent_swing_low_date: to_date(swings.low.map(|s| s.timestamp)),
            fifty_two_week_high_date: to_date(extremes.high.map(|e| e.timestamp)),
            fifty_two_week_low_date: to_date(extremes.low.map(|e| e.timestamp)),
            support_break_date: to_date(breaks.support_break),
            resistance_break_date: to_date(breaks.resistance_break),
        };

        let aligned_averages =
            common_timestamps(&[input.sma_fast.as_slice(), input.sma_slow.as_slice()]).len();
        debug!(
            symbol = input.symbol.as_deref().unwrap_or("-"),
            bars = bars.len(),
            aligned_averages,
            events = turning_points.event_count(),
            trend = ?ma_cross.state,
            support = ?levels.support,
            resistance = ?levels.resistance,
            "Turning point analysis complete"
        );

        TechnicalAnalysis {
            symbol: input.symbol.clone(),
            current_price,
            turning_points,
            levels,
            recent_swings: swings,
            bars_analyzed: bars.len(),
        }
    }
}
