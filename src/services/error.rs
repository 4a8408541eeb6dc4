use thiserror::Error;

use crate::indicators::IndicatorError;

/// Errors raised while fetching series from the upstream provider.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded, retry after {retry_after} seconds")]
    RateLimit { retry_after: u64 },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No data available for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Result type for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Network failures, rate limits and upstream 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            DataError::Network(_) | DataError::RateLimit { .. } => true,
            DataError::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}
