//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use infrastructure::ProviderStatus;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// At least one provider can serve forecasts
    pub ready: bool,
    /// Per-provider status
    pub providers: Vec<ProviderStatus>,
}

/// Readiness check - can any provider serve a forecast?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let providers = state.providers.readiness().await;
    let ready = providers.iter().any(|p| p.configured && p.healthy);

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(ReadinessResponse { ready, providers }))
}
