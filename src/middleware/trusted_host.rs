//! Host header allow-list middleware.
//!
//! Rejects any request whose Host header (port stripped) is not in the
//! configured allow-list. Applied to every route, public and protected,
//! before routing-specific middleware runs.

use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::header::HOST,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Trusted-host middleware function.
///
/// # Flow
///
/// 1. Read the Host header; absence is a rejection
/// 2. Strip an optional `:port` suffix
/// 3. Compare the bare hostname against the allow-list
///
/// # Errors
///
/// - `InvalidHost`: header missing or hostname not allow-listed (400)
pub async fn enforce_trusted_host(
    State(allowed_hosts): State<Arc<Vec<String>>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidHost)?;

    // "localhost:3000" -> "localhost"
    let hostname = host.split(':').next().unwrap_or(host);

    if !allowed_hosts.iter().any(|allowed| allowed == hostname) {
        return Err(AppError::InvalidHost);
    }

    Ok(next.run(request).await)
}
