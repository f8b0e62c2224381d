//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the `api-key` header
//! 2. Verify it against the key store (exists, active, not expired)
//! 3. Inject the validated key into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! A missing header and a rejected key are distinct failures: absence is
//! reported before any store lookup, while not-found, deactivated, and
//! expired keys all collapse into one undifferentiated rejection.

use crate::{error::AppError, services::api_key_service, store::SharedKeyStore};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Header carrying the API key on protected routes.
pub const API_KEY_HEADER: &str = "api-key";

/// Authentication context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers, so downstream code never re-validates the
/// key.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The validated API key string, exactly as presented
    pub api_key: String,
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract the `api-key` header from the request
/// 2. If absent: return 401 with an authentication-required error, before
///    any lookup
/// 3. Run the verification decision against the key store
/// 4. If rejected: return 401 with the undifferentiated invalid-or-expired
///    error
/// 5. If accepted: inject [`AuthContext`] into the request, call the next
///    handler
///
/// # Headers
///
/// Expected header format:
/// ```
/// api-key: h5uVzC0Q9rXaW2bLkTmPn8dE4sYfGj1A
/// ```
///
/// # Errors
///
/// - `MissingApiKey`: no header present (401)
/// - `InvalidApiKey`: verification denied (401)
/// - `Database`: the store lookup failed (500, not an auth failure)
pub async fn require_api_key(
    State(store): State<SharedKeyStore>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Extract the api-key header (fails before any store lookup)
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingApiKey)?
        .to_string();

    // Step 2: Run the verification decision
    if !api_key_service::verify_api_key(store.as_ref(), &api_key).await? {
        return Err(AppError::InvalidApiKey);
    }

    // Step 3: Inject context into request extensions
    // Route handlers can now extract this using Extension<AuthContext>
    request.extensions_mut().insert(AuthContext { api_key });

    // Step 4: Call the next middleware/handler
    Ok(next.run(request).await)
}
