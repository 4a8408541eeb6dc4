//! Fill indicator series the upstream did not supply.

use crate::config::IndicatorPeriods;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd_series, rsi_series};
use crate::indicators::trend::sma_series;
use crate::indicators::validation::validate_periods;
use crate::models::AnalysisInput;

impl AnalysisInput {
    /// Derive RSI, fast/slow SMA and MACD from the bars for every series that
    /// is empty. Series already present are left untouched.
    pub fn with_derived_indicators(
        mut self,
        periods: &IndicatorPeriods,
    ) -> Result<Self, IndicatorError> {
        validate_periods(periods)?;

        if self.rsi.is_empty() {
            self.rsi = rsi_series(&self.bars, periods.rsi)?;
        }
        if self.sma_fast.is_empty() {
            self.sma_fast = sma_series(&self.bars, periods.sma_fast)?;
        }
        if self.sma_slow.is_empty() {
            self.sma_slow = sma_series(&self.bars, periods.sma_slow)?;
        }
        if self.macd.is_empty() {
            self.macd = macd_series(
                &self.bars,
                periods.macd_fast,
                periods.macd_slow,
                periods.macd_signal,
            )?;
        }
        Ok(self)
    }
}
