//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::analysis::TechnicalAnalyzer;
use crate::config::{clamp_history_days, IndicatorPeriods, ServerConfig};
use crate::indicators::{
    date_range_millis, parse_date_bounds, parse_date_range, parse_symbol, period_return,
    validate_analysis_input, IndicatorError,
};
use crate::metrics::Metrics;
use crate::models::{AnalysisInput, PeriodReturn, PriceBar, TechnicalAnalysis};
use crate::services::{fetch_analysis_input, DataError, MarketDataProvider};

pub const SERVICE_NAME: &str = "trendwire-analysis";

/// Calendar days fetched before a period-return start date, so the
/// "last bar before start" fallback has something to land on.
const PERIOD_RETURN_PADDING_DAYS: i64 = 10;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analyzer: Arc<TechnicalAnalyzer>,
    pub periods: IndicatorPeriods,
    pub provider: Option<Arc<dyn MarketDataProvider>>,
    pub history_days: i64,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, analyzer: TechnicalAnalyzer) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            analyzer: Arc::new(analyzer),
            periods: IndicatorPeriods::default(),
            provider: None,
            history_days: ServerConfig::default().history_days,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_periods(mut self, periods: IndicatorPeriods) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_history_days(mut self, history_days: i64) -> Self {
        self.history_days = clamp_history_days(history_days);
        self
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn error_body(status: StatusCode, message: impl ToString) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

fn bad_request(e: IndicatorError) -> ApiError {
    error_body(StatusCode::BAD_REQUEST, e)
}

fn unknown_symbol(e: IndicatorError) -> ApiError {
    error_body(StatusCode::NOT_FOUND, e)
}

fn upstream_error(state: &AppState, symbol: &str, e: DataError) -> ApiError {
    state.metrics.upstream_errors_total.inc();
    match e {
        DataError::NoData { .. } => error_body(StatusCode::NOT_FOUND, e),
        DataError::Indicator(inner) => bad_request(inner),
        other => {
            error!(symbol = symbol, error = %other, "Market data fetch failed");
            error_body(StatusCode::BAD_GATEWAY, other)
        }
    }
}

fn require_provider(state: &AppState) -> Result<Arc<dyn MarketDataProvider>, ApiError> {
    state.provider.clone().ok_or_else(|| {
        error_body(
            StatusCode::SERVICE_UNAVAILABLE,
            "No market data provider configured",
        )
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub input: AnalysisInput,
    /// Derive RSI/SMA/MACD from the bars for series left empty.
    #[serde(default = "default_true")]
    pub derive_indicators: bool,
}

#[derive(Debug, Deserialize)]
pub struct PeriodReturnRequest {
    pub bars: Vec<PriceBar>,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct PeriodReturnQuery {
    pub start: String,
    pub end: String,
}

/// Empty object when no return could be computed.
#[derive(Debug, Serialize)]
pub struct PeriodReturnResponse {
    #[serde(flatten)]
    pub result: Option<PeriodReturn>,
}

fn run_analysis(
    state: &AppState,
    input: AnalysisInput,
    derive: bool,
    source: &str,
) -> Result<TechnicalAnalysis, ApiError> {
    let input = if derive {
        input
            .with_derived_indicators(&state.periods)
            .map_err(bad_request)?
    } else {
        input
    };
    let analysis = state.analyzer.analyze(&input);
    state
        .metrics
        .analyses_total
        .with_label_values(&[source])
        .inc();
    Ok(analysis)
}

/// Analyze series supplied in the request body
async fn analyze_series(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<TechnicalAnalysis> {
    validate_analysis_input(&request.input).map_err(bad_request)?;
    let analysis = run_analysis(&state, request.input, request.derive_indicators, "request")?;
    Ok(Json(analysis))
}

/// Fetch a ticker's history from the provider and analyze it
async fn analyze_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> ApiResult<TechnicalAnalysis> {
    let symbol = parse_symbol(&ticker).map_err(unknown_symbol)?;
    let provider = require_provider(&state)?;

    state.metrics.upstream_requests_total.inc();
    let to = Utc::now().date_naive();
    let from = to - Duration::days(state.history_days);
    let input = fetch_analysis_input(provider.as_ref(), &symbol, from, to, &state.periods)
        .await
        .map_err(|e| upstream_error(&state, &symbol, e))?;

    let analysis = run_analysis(&state, input, true, "provider")?;
    info!(
        symbol = %symbol,
        events = analysis.turning_points.event_count(),
        "Ticker analysis served"
    );
    Ok(Json(analysis))
}

/// Period return over bars supplied in the request body
async fn period_return_series(
    Json(request): Json<PeriodReturnRequest>,
) -> ApiResult<PeriodReturnResponse> {
    let (start, end) = parse_date_range(&request.start, &request.end).map_err(bad_request)?;
    Ok(Json(PeriodReturnResponse {
        result: period_return(&request.bars, start, end),
    }))
}

/// Period return for a ticker, fetching bars from the provider
async fn period_return_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(params): Query<PeriodReturnQuery>,
) -> ApiResult<PeriodReturnResponse> {
    let symbol = parse_symbol(&ticker).map_err(unknown_symbol)?;
    let (start_date, end_date) =
        parse_date_bounds(&params.start, &params.end).map_err(bad_request)?;
    let (start, end) = date_range_millis(start_date, end_date);
    let provider = require_provider(&state)?;

    state.metrics.upstream_requests_total.inc();
    let bars = provider
        .get_daily_bars(
            &symbol,
            start_date - Duration::days(PERIOD_RETURN_PADDING_DAYS),
            end_date,
        )
        .await
        .map_err(|e| upstream_error(&state, &symbol, e))?;

    let result = period_return(&bars, start, end);
    if result.is_none() {
        warn!(
            symbol = %symbol,
            start = %start_date,
            end = %end_date,
            bars = bars.len(),
            "No period return for requested range"
        );
    }
    Ok(Json(PeriodReturnResponse { result }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/technical-analysis", post(analyze_series))
        .route("/api/technical-analysis/{ticker}", get(analyze_ticker))
        .route("/api/period-return", post(period_return_series))
        .route("/api/period-return/{ticker}", get(period_return_ticker))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state.with_history_days(config.history_days));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
