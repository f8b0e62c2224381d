//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from key store operations
/// - **Authentication Errors**: Missing or rejected API keys
/// - **Resource Errors**: Administrative operations on nonexistent keys
/// - **Request Errors**: Requests arriving with a disallowed Host header
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Key store operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    ///
    /// Store failures are never masked as authentication failures: the
    /// caller sees a server-side error and decides whether to retry.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No API key was presented on a route that requires one.
    ///
    /// Returns HTTP 401 Unauthorized. Raised before any store lookup.
    #[error("API key is required. Please provide 'api-key' header.")]
    MissingApiKey,

    /// The presented API key failed verification.
    ///
    /// Covers not-found, deactivated, and expired keys. The three causes
    /// are deliberately undifferentiated so a caller cannot probe which
    /// condition failed.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or expired API key.")]
    InvalidApiKey,

    /// Administrative operation referenced an API key id that does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("API key not found")]
    KeyNotFound,

    /// Request carried a Host header outside the configured allow-list.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid host header")]
    InvalidHost,
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `MissingApiKey` → 401 Unauthorized
/// - `InvalidApiKey` → 401 Unauthorized
/// - `KeyNotFound` → 404 Not Found
/// - `InvalidHost` → 400 Bad Request
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "api_key_required",
                self.to_string(),
            ),
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "invalid_api_key",
                self.to_string(),
            ),
            AppError::KeyNotFound => (StatusCode::NOT_FOUND, "key_not_found", self.to_string()),
            AppError::InvalidHost => (StatusCode::BAD_REQUEST, "invalid_host", self.to_string()),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
