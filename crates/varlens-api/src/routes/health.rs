//! Health check endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub default_simulations: usize,
    pub timeout_ms: u64,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_simulations: state.engine.config().default_simulations,
        timeout_ms: u64::try_from(state.timeout.as_millis()).unwrap_or(u64::MAX),
    })
}
