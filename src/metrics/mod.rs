//! Prometheus metrics exposed at `/metrics`.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
    /// Completed analyses, labelled by `source` (`request` or `provider`).
    pub analyses_total: IntCounterVec,
    pub upstream_requests_total: IntCounter,
    pub upstream_errors_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::with_opts(Opts::new("http_requests_total", "Total HTTP requests"))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = Gauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let analyses_total = IntCounterVec::new(
            Opts::new("analyses_total", "Completed turning point analyses"),
            &["source"],
        )?;
        let upstream_requests_total = IntCounter::with_opts(Opts::new(
            "upstream_requests_total",
            "Market data fetches issued",
        ))?;
        let upstream_errors_total = IntCounter::with_opts(Opts::new(
            "upstream_errors_total",
            "Failed market data fetches",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(analyses_total.clone()))?;
        registry.register(Box::new(upstream_requests_total.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            analyses_total,
            upstream_requests_total,
            upstream_errors_total,
        })
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
