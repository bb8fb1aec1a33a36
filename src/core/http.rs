//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::{self, RuntimeConfig};
use crate::core::runtime::AnalysisRuntime;
use crate::db::{InMemoryStore, PostgresStore, ResultStore, StoreError};
use crate::indicators::registry::IndicatorCategory;
use crate::metrics::Metrics;
use crate::models::indicators::{Candle, IndicatorSet};
use crate::models::session::{SessionStatus, SessionSummary, SummaryStats};
use crate::models::signal::AnalysisResult;
use crate::models::ticker::clean_ticker_symbol;
use crate::services::market_data::InMemoryMarketData;
use crate::signals::categories::CategoryWeights;
use crate::signals::decision::SignalThresholds;
use crate::signals::engine::{ScoringConfig, ScoringEngine, TickerScore};
use crate::signals::scoring::normalize_indicator;
use crate::signals::weights::{WeightError, WeightValidator};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub store: Arc<dyn ResultStore>,
    pub config: RuntimeConfig,
}

impl AppState {
    pub fn new(config: RuntimeConfig, store: Arc<dyn ResultStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            store,
            config,
        }
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

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
    #[error("{0}")]
    BadRequest(String),
    #[error("session '{0}' not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Store(StoreError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidWeights(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "btock-scoring-engine"
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

/// Raw weights from a request, validated and normalized; `None` keeps the server defaults.
fn request_weights(
    raw: Option<&HashMap<String, f64>>,
    fallback: CategoryWeights,
) -> Result<CategoryWeights, ApiError> {
    match raw {
        Some(map) => Ok(WeightValidator::normalize(&CategoryWeights::from_map(map)?)?),
        None => Ok(fallback),
    }
}

#[derive(Debug, Serialize)]
struct DefaultsResponse {
    weights: CategoryWeights,
    thresholds: SignalThresholds,
}

async fn default_weights() -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        weights: WeightValidator::default_weights(),
        thresholds: SignalThresholds::default(),
    })
}

#[derive(Debug, Deserialize)]
struct ValidateWeightsRequest {
    weights: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
struct ValidateWeightsResponse {
    weights: BTreeMap<String, f64>,
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Invalid weights come back unchanged with `is_valid: false`.
async fn validate_weights(
    Json(request): Json<ValidateWeightsRequest>,
) -> Json<ValidateWeightsResponse> {
    let normalized =
        CategoryWeights::from_map(&request.weights).and_then(|w| WeightValidator::normalize(&w));

    let response = match normalized {
        Ok(weights) => ValidateWeightsResponse {
            weights: weights.to_map(),
            is_valid: true,
            error: None,
        },
        Err(e) => ValidateWeightsResponse {
            weights: request.weights.into_iter().collect(),
            is_valid: false,
            error: Some(e.to_string()),
        },
    };
    Json(response)
}

#[derive(Debug, Deserialize)]
struct NormalizeRequest {
    name: String,
    value: f64,
}

#[derive(Debug, Serialize)]
struct NormalizeResponse {
    name: String,
    value: f64,
    score: f64,
    category: Option<IndicatorCategory>,
}

async fn normalize(Json(request): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    let score = normalize_indicator(&request.name, request.value);
    let category = IndicatorCategory::for_indicator(&request.name);
    Json(NormalizeResponse {
        name: request.name,
        value: request.value,
        score,
        category,
    })
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    indicators: IndicatorSet,
    weights: Option<HashMap<String, f64>>,
    thresholds: Option<SignalThresholds>,
}

async fn score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<TickerScore>, ApiError> {
    let defaults = state.config.scoring;
    let weights = request_weights(request.weights.as_ref(), defaults.weights)?;
    let engine = ScoringEngine::new(request.thresholds.unwrap_or(defaults.thresholds));
    Ok(Json(engine.analyze_ticker(&request.indicators, &weights)))
}

#[derive(Debug, Deserialize)]
struct TickerBars {
    ticker: String,
    bars: Vec<Candle>,
    current_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    tickers: Vec<TickerBars>,
    weights: Option<HashMap<String, f64>>,
    thresholds: Option<SignalThresholds>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    summary: SessionSummary,
    thresholds: SignalThresholds,
    status: SessionStatus,
    results: Vec<AnalysisResult>,
    stats: SummaryStats,
}

/// Analyze tickers whose daily bars are supplied in the request body.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if request.tickers.is_empty() {
        return Err(ApiError::BadRequest("no tickers supplied".to_string()));
    }

    let defaults = state.config.scoring;
    let config = RuntimeConfig {
        scoring: ScoringConfig {
            weights: request_weights(request.weights.as_ref(), defaults.weights)?,
            thresholds: request.thresholds.unwrap_or(defaults.thresholds),
        },
        ..state.config
    };

    let mut provider = InMemoryMarketData::new();
    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(request.tickers.len());
    for entry in request.tickers {
        if let Some(symbol) = clean_ticker_symbol(&entry.ticker) {
            // Later duplicates must not replace the first entry's bars or price.
            if !seen.insert(symbol.clone()) {
                continue;
            }
            if let Some(price) = entry.current_price {
                provider.insert_price(symbol.clone(), price);
            }
            provider.insert_bars(symbol, entry.bars);
        }
        order.push(entry.ticker);
    }

    let runtime = AnalysisRuntime::new(config, Arc::new(provider)).with_metrics(state.metrics.clone());
    let session = tokio::task::spawn_blocking(move || runtime.run(order))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    state.store.save_session(&session).await?;

    Ok(Json(AnalyzeResponse {
        summary: session.summary(),
        thresholds: session.thresholds,
        status: session.status,
        stats: session.stats(),
        results: session.results,
    }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let results = state.store.load_results(&session_id).await?;
    let stats = SummaryStats::from_results(&results);
    Ok(Json(json!({
        "session_id": session_id,
        "results": results,
        "stats": stats,
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/weights/default", get(default_weights))
        .route("/api/weights/validate", post(validate_weights))
        .route("/api/normalize", post(normalize))
        .route("/api/score", post(score))
        .route("/api/analyze", post(analyze))
        .route("/api/sessions/{id}", get(get_session))
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

/// Results go to PostgreSQL when `DATABASE_URL` is set and reachable, memory otherwise.
async fn open_store() -> Arc<dyn ResultStore> {
    let Some(url) = config::get_database_url() else {
        info!("DATABASE_URL not set, keeping results in memory");
        return Arc::new(InMemoryStore::new());
    };
    match PostgresStore::connect(&url).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "failed to connect to PostgreSQL, keeping results in memory");
            Arc::new(InMemoryStore::new())
        }
    }
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let store = open_store().await;
    let state = AppState::new(RuntimeConfig::from_env(), store, metrics);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Metrics endpoint available at http://0.0.0.0:{}/metrics", port);
    axum::serve(listener, app).await?;

    Ok(())
}
