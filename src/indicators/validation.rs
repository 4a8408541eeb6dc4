use crate::config::IndicatorPeriods;
use crate::indicators::error::IndicatorError;
use crate::models::AnalysisInput;

pub fn validate_period(period: u32) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    Ok(())
}

pub fn validate_periods(periods: &IndicatorPeriods) -> Result<(), IndicatorError> {
    for period in [
        periods.rsi,
        periods.sma_fast,
        periods.sma_slow,
        periods.macd_fast,
        periods.macd_slow,
        periods.macd_signal,
    ] {
        validate_period(period)?;
    }
    if periods.sma_fast >= periods.sma_slow {
        return Err(IndicatorError::InvalidPeriodOrder {
            fast: periods.sma_fast,
            slow: periods.sma_slow,
        });
    }
    if periods.macd_fast >= periods.macd_slow {
        return Err(IndicatorError::InvalidPeriodOrder {
            fast: periods.macd_fast,
            slow: periods.macd_slow,
        });
    }
    Ok(())
}

/// Request-level checks run by the HTTP and CLI front ends.
///
/// Individual bad samples are not rejected here; the normalizer drops them.
pub fn validate_analysis_input(input: &AnalysisInput) -> Result<(), IndicatorError> {
    if input.bars.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }
    for (name, value) in [
        ("currentPrice", input.current_price),
        ("fiftyTwoWeekHigh", input.fifty_two_week_high),
        ("fiftyTwoWeekLow", input.fifty_two_week_low),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v <= 0.0 {
                return Err(IndicatorError::InvalidNumericFormat(format!("{}={}", name, v)));
            }
        }
    }
    Ok(())
}
