//! Trendwire analysis API server
//!
//! Serves turning-point analysis and period returns over HTTP. Ticker
//! endpoints are enabled when `POLYGON_API_KEY` is set.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use trendwire::analysis::TechnicalAnalyzer;
use trendwire::config::{get_environment, PolygonConfig, ServerConfig};
use trendwire::core::http::{start_server, AppState};
use trendwire::logging;
use trendwire::metrics::Metrics;
use trendwire::services::PolygonClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let env = get_environment();
    logging::init_logging(&env);

    let server_config = ServerConfig::from_env();
    info!("Starting Trendwire API Server");
    info!(environment = %env, "Environment");
    info!(
        port = server_config.port,
        history_days = server_config.history_days,
        "HTTP Server: http://0.0.0.0:{}",
        server_config.port
    );

    let metrics = Arc::new(Metrics::new()?);
    let mut state = AppState::new(metrics, TechnicalAnalyzer::default());
    match PolygonConfig::from_env() {
        Some(polygon) => {
            info!(base_url = %polygon.base_url, "Market data provider configured");
            state = state.with_provider(Arc::new(PolygonClient::new(&polygon)?));
        }
        None => warn!("POLYGON_API_KEY not set, ticker endpoints will return 503"),
    }

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
