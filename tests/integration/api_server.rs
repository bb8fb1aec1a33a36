//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, scoring and batch analysis.


use serde_json::{json, Value};

use test_utils::{rising_bars, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "btock-scoring-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"), "Expected http_requests_total metric");
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn default_weights_and_thresholds() {
    let app = TestApiServer::new().await;
    let body: Value = app.server.get("/api/weights/default").await.json();

    assert_eq!(body["weights"]["momentum"], 0.2);
    assert_eq!(body["weights"]["trend"], 0.3);
    assert_eq!(body["weights"]["support_resistance"], 0.15);
    assert_eq!(body["thresholds"]["buy"], 0.5);
    assert_eq!(body["thresholds"]["sell"], -0.5);
}

#[tokio::test]
async fn validate_weights_normalizes_valid_input() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/weights/validate")
        .json(&json!({
            "weights": {
                "momentum": 1.0,
                "trend": 1.0,
                "volatility": 1.0,
                "strength": 1.0,
                "support_resistance": 1.0
            }
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["is_valid"], true);
    assert_eq!(body["weights"]["strength"], 0.2);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn validate_weights_returns_rejected_input_unchanged() {
    let app = TestApiServer::new().await;
    let body: Value = app
        .server
        .post("/api/weights/validate")
        .json(&json!({"weights": {"momentum": -1.0, "trend": 2.0}}))
        .await
        .json();

    assert_eq!(body["is_valid"], false);
    assert_eq!(body["weights"]["momentum"], -1.0);
    assert_eq!(body["weights"]["trend"], 2.0);
    assert!(body["error"].as_str().unwrap().contains("negative"));
}

#[tokio::test]
async fn normalize_reports_score_and_category() {
    let app = TestApiServer::new().await;
    let body: Value = app
        .server
        .post("/api/normalize")
        .json(&json!({"name": "williams_r", "value": -10.0}))
        .await
        .json();

    assert_eq!(body["score"], 0.5);
    assert_eq!(body["category"], "momentum");

    let body: Value = app
        .server
        .post("/api/normalize")
        .json(&json!({"name": "ma50", "value": 120.0}))
        .await
        .json();
    assert!(body["category"].is_null());
}

#[tokio::test]
async fn score_classifies_indicator_set() {
    let app = TestApiServer::new().await;
    let body: Value = app
        .server
        .post("/api/score")
        .json(&json!({
            "indicators": {"rsi": 60.0},
            "weights": {"momentum": 1.0}
        }))
        .await
        .json();

    assert_eq!(body["category_scores"]["momentum"], 0.5);
    assert_eq!(body["final_weighted_score"], 0.5);
    assert_eq!(body["signal"], "BUY");
}

#[tokio::test]
async fn score_uses_request_thresholds() {
    let app = TestApiServer::new().await;
    let body: Value = app
        .server
        .post("/api/score")
        .json(&json!({
            "indicators": {"rsi": 60.0},
            "weights": {"momentum": 1.0},
            "thresholds": {"buy_threshold": 0.8, "sell_threshold": -0.8}
        }))
        .await
        .json();

    assert_eq!(body["signal"], "HOLD");
}

#[tokio::test]
async fn score_rejects_invalid_weights() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/score")
        .json(&json!({
            "indicators": {"rsi": 60.0},
            "weights": {"momentum": 0.0, "trend": 0.0}
        }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("zero"));
}

#[tokio::test]
async fn analyze_then_fetch_session() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({
            "tickers": [
                {"ticker": "aapl", "bars": rising_bars(250, 100.0), "current_price": 250.004},
                {"ticker": "n/a", "bars": []},
                {"ticker": "EMPTY", "bars": []}
            ]
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["summary"]["total_tickers"], 2);
    assert_eq!(body["summary"]["successful_tickers"], 1);
    assert_eq!(body["summary"]["success_rate"], 50.0);
    assert_eq!(body["stats"]["errors"], 1);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["ticker"], "AAPL");
    assert_eq!(results[0]["status"], "scored");
    assert_eq!(results[0]["current_price"], 250.0);
    assert_eq!(results[1]["ticker"], "EMPTY");
    assert_eq!(results[1]["error_message"], "No data available");

    let session_id = body["summary"]["session_id"].as_str().unwrap();
    assert_eq!(app.store.len().await, 1);

    let stored: Value = app.server.get(&format!("/api/sessions/{session_id}")).await.json();
    assert_eq!(stored["session_id"], session_id);
    assert_eq!(stored["results"], body["results"]);
    assert_eq!(stored["stats"]["successful"], 1);

    let metrics = app.server.get("/metrics").await.text();
    assert!(metrics.contains(r#"tickers_analyzed_total{outcome="scored"} 1"#));
}

#[tokio::test]
async fn analyze_keeps_first_entry_of_duplicate_tickers() {
    let app = TestApiServer::new().await;
    let body: Value = app
        .server
        .post("/api/analyze")
        .json(&json!({
            "tickers": [
                {"ticker": "aapl", "bars": rising_bars(250, 100.0)},
                {"ticker": "AAPL", "bars": rising_bars(50, 100.0), "current_price": 1.0}
            ]
        }))
        .await
        .json();

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["ticker"], "AAPL");
    assert_eq!(results[0]["status"], "scored");
    assert_eq!(results[0]["current_price"], 224.5);
}

#[tokio::test]
async fn analyze_requires_tickers() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/analyze")
        .json(&json!({"tickers": []}))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/sessions/deadbeef")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["status"], 404);
}
