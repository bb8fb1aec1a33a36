//! Prometheus metrics for the HTTP surface and the analysis runtime

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::signal::Signal;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    /// Labelled by `outcome`: `scored` or `failed`.
    pub tickers_analyzed_total: IntCounterVec,
    /// Labelled by `signal`: `BUY`, `HOLD` or `SELL`.
    pub signals_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let tickers_analyzed_total = IntCounterVec::new(
            Opts::new("tickers_analyzed_total", "Tickers analyzed by outcome"),
            &["outcome"],
        )?;
        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Signals produced by type"),
            &["signal"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(tickers_analyzed_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            tickers_analyzed_total,
            signals_total,
        })
    }

    pub fn record_scored(&self, signal: Signal) {
        self.tickers_analyzed_total.with_label_values(&["scored"]).inc();
        self.signals_total.with_label_values(&[signal.as_str()]).inc();
    }

    pub fn record_failed(&self) {
        self.tickers_analyzed_total.with_label_values(&["failed"]).inc();
    }

    /// Text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
