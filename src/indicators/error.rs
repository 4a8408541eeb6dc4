use thiserror::Error;

/// Errors raised while parsing or deriving indicator inputs.
///
/// The detectors themselves never fail; they report "no finding" instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid period: {0} (must be greater than zero)")]
    InvalidPeriod(u32),

    #[error("Invalid period ordering: fast {fast} must be shorter than slow {slow}")]
    InvalidPeriodOrder { fast: u32, slow: u32 },

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid numeric format: {0}")]
    InvalidNumericFormat(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("No price bars supplied")]
    EmptySeries,
}
