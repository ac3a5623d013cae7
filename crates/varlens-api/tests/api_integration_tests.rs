//! Integration tests for the VarLens API endpoints.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use varlens_api::{create_router, AppState};
use varlens_risk::config::EngineConfig;
use varlens_risk::engine::VarEngine;

fn test_state() -> AppState {
    AppState::default()
}

/// Helper to make a POST request and get JSON response.
async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, serde_json::to_string(&body).unwrap()).await
}

async fn post_raw(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

fn sample_returns() -> Value {
    json!([-0.05, -0.03, -0.01, 0.00, 0.01, 0.02, 0.04])
}

// =============================================================================
// HEALTH CHECK TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(test_state());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["defaultSimulations"], 10_000);
}

// =============================================================================
// VAR TESTS
// =============================================================================

#[tokio::test]
async fn test_historical_var() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({
            "method": "historical",
            "returns": sample_returns(),
            "confidence": 0.90,
            "horizonDays": 1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "historical");
    assert!((json["value"].as_f64().unwrap() - 0.038).abs() < 1e-12);
    assert!((json["confidence"].as_f64().unwrap() - 0.90).abs() < 1e-12);
}

#[tokio::test]
async fn test_parametric_var_without_returns() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({
            "method": "parametric",
            "confidence": 0.95,
            "horizonDays": 10,
            "mean": 0.0,
            "volatility": 0.02
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected = 1.6448536269514722 * 0.02 * 10f64.sqrt();
    assert!((json["value"].as_f64().unwrap() - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_monte_carlo_seeded_is_reproducible() {
    let body = json!({
        "method": "montecarlo",
        "confidence": 0.99,
        "horizonDays": 1,
        "mean": 0.0,
        "volatility": 0.02,
        "simulationCount": 20000,
        "seed": 42
    });

    let (s1, first) = post_json(create_router(test_state()), "/api/v1/var", body.clone()).await;
    let (s2, second) = post_json(create_router(test_state()), "/api/v1/var", body).await;

    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(first["value"], second["value"]);
    assert_eq!(first["method"], "montecarlo");
}

#[tokio::test]
async fn test_invalid_confidence() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({ "method": "parametric", "confidence": 1.0, "mean": 0.0, "volatility": 0.02 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "INVALID_PARAMETER");
    assert_eq!(json["error"]["kind"], "InvalidParameter");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("confidence"));
}

#[tokio::test]
async fn test_insufficient_data() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({ "method": "historical", "returns": [0.01], "confidence": 0.95 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "INSUFFICIENT_DATA");
    assert_eq!(json["error"]["kind"], "InsufficientData");
}

#[tokio::test]
async fn test_zero_simulations_rejected() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({
            "method": "montecarlo",
            "confidence": 0.95,
            "mean": 0.0,
            "volatility": 0.02,
            "simulationCount": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["kind"], "InvalidParameter");
}

#[tokio::test]
async fn test_unknown_method_is_invalid_parameter() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({ "method": "garch", "returns": sample_returns(), "confidence": 0.95 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = create_router(test_state());
    let (status, json) = post_raw(app, "/api/v1/var", "{\"method\":".to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["kind"], "InvalidParameter");
}

#[tokio::test]
async fn test_monte_carlo_timeout() {
    let engine = VarEngine::new(EngineConfig::new().with_max_simulations(5_000_000)).unwrap();
    let app = create_router(AppState::new(engine, Duration::from_millis(1)));
    let (status, json) = post_json(
        app,
        "/api/v1/var",
        json!({
            "method": "montecarlo",
            "confidence": 0.99,
            "horizonDays": 10,
            "returns": sample_returns(),
            "sampling": "bootstrap",
            "simulationCount": 5000000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"]["code"], "TIMEOUT");
}

// =============================================================================
// REPORT TESTS
// =============================================================================

#[tokio::test]
async fn test_report_default_confidences() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var/report",
        json!({ "returns": sample_returns(), "seed": 7 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["observations"], 7);
    assert_eq!(json["seed"], 7);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|row| row["value"].is_number()));
}

#[tokio::test]
async fn test_report_records_row_errors() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/var/report",
        json!({ "returns": [0.01], "mean": 0.0, "volatility": 0.02, "confidences": [0.99] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["method"], "historical");
    assert_eq!(rows[0]["errorKind"], "InsufficientData");
    assert!(rows[1]["value"].is_number());
}

#[tokio::test]
async fn test_report_timeout() {
    let app = create_router(AppState::new(VarEngine::default(), Duration::from_millis(20)));
    let (status, json) = post_json(
        app,
        "/api/v1/var/report",
        json!({
            "returns": sample_returns(),
            "confidences": [0.90, 0.95, 0.975, 0.99],
            "mean": 0.0,
            "volatility": 0.02,
            "simulationCount": 5000000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"]["code"], "TIMEOUT");
}

#[tokio::test]
async fn test_report_too_many_confidences() {
    let app = create_router(test_state());
    let confidences: Vec<f64> = (1..=17).map(|i| 0.5 + f64::from(i) * 0.02).collect();
    let (status, json) = post_json(
        app,
        "/api/v1/var/report",
        json!({ "returns": sample_returns(), "confidences": confidences }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "INVALID_PARAMETER");
}

// =============================================================================
// RETURNS TESTS
// =============================================================================

#[tokio::test]
async fn test_returns_from_prices() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/returns",
        json!({
            "prices": [
                { "date": "2024-03-04", "close": 99.0 },
                { "date": "2024-03-01", "close": 100.0 },
                { "date": "2024-03-02", "close": 110.0 },
                { "date": "2024-03-03", "close": 99.0 }
            ],
            "previewSize": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["observations"], 3);
    assert!((json["returns"][0].as_f64().unwrap() - 0.10).abs() < 1e-12);

    let preview = json["preview"].as_array().unwrap();
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[1]["date"], "2024-03-04");
    assert!(preview[1]["return"].is_number());
}

#[tokio::test]
async fn test_returns_reject_non_positive_price() {
    let app = create_router(test_state());
    let (status, json) = post_json(
        app,
        "/api/v1/returns",
        json!({
            "prices": [
                { "date": "2024-03-01", "close": 100.0 },
                { "date": "2024-03-02", "close": 0.0 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["kind"], "InvalidParameter");
}
