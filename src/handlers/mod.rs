//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (store operations, verification)
//! 3. Returns HTTP response (JSON, status code)

/// Liveness endpoints
pub mod health;
/// API key administration endpoints
pub mod keys;
/// Endpoints behind the API key gate
pub mod protected;
