//! Handlers behind the API key gate.
//!
//! Everything in this module is mounted under the authentication
//! middleware, so handlers receive an already-validated [`AuthContext`]
//! and never re-check the key themselves.

use crate::middleware::auth::AuthContext;
use axum::{Extension, Json};
use serde::Serialize;

/// Response for the gated ping endpoint.
#[derive(Debug, Serialize)]
pub struct ProtectedPingResponse {
    pub message: String,

    /// The key the request authenticated with, echoed back to its owner
    pub api_key: String,
}

/// `GET /api/v1/protected/ping` - authenticated connectivity probe.
///
/// # Authentication
///
/// Requires a valid key in the `api-key` header. The middleware has
/// already run the verification decision; this handler only consumes the
/// forwarded context.
pub async fn protected_ping(
    Extension(auth): Extension<AuthContext>,
) -> Json<ProtectedPingResponse> {
    Json(ProtectedPingResponse {
        message: "pong".to_string(),
        api_key: auth.api_key,
    })
}
