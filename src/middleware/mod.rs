//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authenticate requests
//! - Reject requests from unexpected hosts
//! - Short-circuit requests (reject unauthorized)

/// API key authentication middleware
pub mod auth;
/// Host header allow-list middleware
pub mod trusted_host;
