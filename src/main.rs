//! Safe API - Main Application Entry Point
//!
//! This is a REST API server gating a small set of HTTP endpoints behind
//! header-supplied API keys. It provides administrative endpoints for
//! issuing, listing, and (de)activating keys, and a verification middleware
//! applied to the protected routes.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries), behind a `KeyStore` trait
//! - **Authentication**: opaque API keys in the `api-key` header
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::store::{SharedKeyStore, postgres::PgKeyStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // The key store is injected everywhere as a trait object, so tests can
    // swap in an in-memory fake for the same routes
    let store: SharedKeyStore = Arc::new(PgKeyStore::new(pool));
    let allowed_hosts = Arc::new(config.allowed_hosts);

    // Create protected routes (behind the API key gate)
    let protected_routes = Router::new()
        .route(
            "/api/v1/protected/ping",
            get(handlers::protected::protected_ping),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            store.clone(),
            middleware::auth::require_api_key,
        ));

    // Combine public, administrative, and protected routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health_check))
        // Key administration routes (outside the gate, see handlers::keys)
        .route("/api/v1/keys", post(handlers::keys::create_key))
        .route("/api/v1/keys", get(handlers::keys::list_keys))
        .route(
            "/api/v1/keys/{id}/activate",
            post(handlers::keys::activate_key),
        )
        .route(
            "/api/v1/keys/{id}/deactivate",
            post(handlers::keys::deactivate_key),
        )
        // Merge protected routes
        .merge(protected_routes)
        // Reject requests for hosts outside the allow-list
        .layer(axum_middleware::from_fn_with_state(
            allowed_hosts,
            middleware::trusted_host::enforce_trusted_host,
        ))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share the key store with all handlers via State extraction
        .with_state(store);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
