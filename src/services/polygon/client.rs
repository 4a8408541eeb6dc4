//! Polygon REST client.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{AggregatesResponse, IndicatorResponse, IndicatorValue, MacdValue};
use crate::config::{IndicatorPeriods, PolygonConfig};
use crate::models::{IndicatorKind, IndicatorPoint, MacdPoint, PriceBar};
use crate::services::error::{DataError, DataResult};
use crate::services::market_data::MarketDataProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_MAX_RETRIES: usize = 3;

pub struct PolygonClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl PolygonClient {
    pub fn new(config: &PolygonConfig) -> DataResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DataError::Config("Polygon API key is empty".to_string()));
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: &PolygonConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_retries: DEFAULT_MAX_RETRIES,
            min_retry_delay: Duration::from_millis(200),
        }
    }

    pub fn with_retry_policy(mut self, max_retries: usize, min_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_retry_delay = min_delay;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> DataResult<T> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| self.send_once::<T>(path, query))
            .retry(backoff)
            .when(|e: &DataError| e.is_retryable())
            .notify(|e: &DataError, delay: Duration| {
                warn!(path = path, error = %e, delay_ms = delay.as_millis() as u64, "Retrying Polygon request");
            })
            .await
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> DataResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path = path, "Polygon request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DataError::Authentication(format!(
                    "Polygon rejected the API key (status {})",
                    status.as_u16()
                )));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1);
                return Err(DataError::RateLimit { retry_after });
            }
            _ => {}
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(DataError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| DataError::Parse {
            message: format!("{}: {}", path, e),
        })
    }
}

#[async_trait]
impl MarketDataProvider for PolygonClient {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<Vec<PriceBar>> {
        let path = format!(
            "/v2/aggs/ticker/{}/range/1/day/{}/{}",
            symbol,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        );
        let query = [
            ("adjusted", "true".to_string()),
            ("sort", "asc".to_string()),
            ("limit", "50000".to_string()),
        ];
        let response: AggregatesResponse = self.get_json(&path, &query).await?;
        if let Some(status) = response.status.as_deref() {
            debug!(symbol = symbol, status = status, bars = response.results.len(), "Aggregates received");
        }
        Ok(response.results.into_iter().map(PriceBar::from).collect())
    }

    async fn get_indicator(
        &self,
        symbol: &str,
        kind: IndicatorKind,
        window: u32,
        limit: usize,
    ) -> DataResult<Vec<IndicatorPoint>> {
        let path = format!("/v1/indicators/{}/{}", kind.as_str(), symbol);
        let query = [
            ("timespan", "day".to_string()),
            ("adjusted", "true".to_string()),
            ("window", window.to_string()),
            ("series_type", "close".to_string()),
            ("order", "desc".to_string()),
            ("limit", limit.to_string()),
        ];
        let response: IndicatorResponse<IndicatorValue> = self.get_json(&path, &query).await?;
        Ok(response.into_values().into_iter().map(IndicatorPoint::from).collect())
    }

    async fn get_macd(
        &self,
        symbol: &str,
        periods: &IndicatorPeriods,
        limit: usize,
    ) -> DataResult<Vec<MacdPoint>> {
        let path = format!("/v1/indicators/macd/{}", symbol);
        let query = [
            ("timespan", "day".to_string()),
            ("adjusted", "true".to_string()),
            ("short_window", periods.macd_fast.to_string()),
            ("long_window", periods.macd_slow.to_string()),
            ("signal_window", periods.macd_signal.to_string()),
            ("series_type", "close".to_string()),
            ("order", "desc".to_string()),
            ("limit", limit.to_string()),
        ];
        let response: IndicatorResponse<MacdValue> = self.get_json(&path, &query).await?;
        Ok(response.into_values().into_iter().map(MacdPoint::from).collect())
    }
}
