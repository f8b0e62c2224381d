//! Liveness endpoints for service monitoring.

use axum::Json;
use serde::Serialize;

/// Ping response.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /ping` - connectivity probe.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

/// `GET /health` - liveness probe.
///
/// Reports process liveness only; store reachability surfaces through the
/// endpoints that touch it.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
