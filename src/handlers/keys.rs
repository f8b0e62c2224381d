//! API key administration HTTP handlers.
//!
//! This module implements the key management endpoints:
//! - POST /api/v1/keys - Issue a new key
//! - GET /api/v1/keys - List all keys (without secrets)
//! - POST /api/v1/keys/:id/activate - Re-enable a key
//! - POST /api/v1/keys/:id/deactivate - Revoke a key (reversibly)
//!
//! These endpoints are deliberately left outside the API key gate,
//! matching the deployed configuration; access control for them is
//! expected from the surrounding network layer.

use crate::{
    error::AppError,
    models::api_key::{ApiKeyCreatedResponse, ApiKeySummary, CreateApiKeyRequest},
    services::api_key_service,
    store::{KeyStore, SharedKeyStore},
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Issue a new API key.
///
/// # Endpoint
///
/// `POST /api/v1/keys`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "svc-A",           // optional
///   "expiration_days": 30      // optional, defaults to 7
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the created record, including the plaintext
///   secret - the only time it is ever returned
/// - **Error (500)**: store failure
///
/// ```json
/// {
///   "id": 1,
///   "key": "h5uVzC0Q9rXaW2bLkTmPn8dE4sYfGj1A",
///   "name": "svc-A",
///   "created_at": "2025-12-20T10:00:00Z",
///   "expires_at": "2025-12-27T10:00:00Z"
/// }
/// ```
///
/// A zero or negative `expiration_days` is accepted and produces a key
/// that is already expired on arrival.
pub async fn create_key(
    State(store): State<SharedKeyStore>,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<Json<ApiKeyCreatedResponse>, AppError> {
    let record =
        api_key_service::create_api_key(store.as_ref(), request.name, request.expiration_days)
            .await?;

    tracing::info!(id = record.id, "API key issued");

    Ok(Json(record.into()))
}

/// List all API keys.
///
/// # Endpoint
///
/// `GET /api/v1/keys`
///
/// # Response
///
/// - **Success (200 OK)**: array of summaries, newest first; the plaintext
///   `key` is never included
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "svc-A",
///     "created_at": "2025-12-20T10:00:00Z",
///     "expires_at": "2025-12-27T10:00:00Z",
///     "is_active": true,
///     "is_expired": false
///   }
/// ]
/// ```
///
/// `is_expired` is computed against the clock at listing time, so an entry
/// can flip to expired between two listings with no write in between.
pub async fn list_keys(
    State(store): State<SharedKeyStore>,
) -> Result<Json<Vec<ApiKeySummary>>, AppError> {
    let records = store.list_all().await?;

    // Convert each record to its administrative view (secrets excluded)
    let summaries: Vec<ApiKeySummary> = records.into_iter().map(Into::into).collect();

    Ok(Json(summaries))
}

/// Re-enable a deactivated API key.
///
/// # Endpoint
///
/// `POST /api/v1/keys/{id}/activate`
///
/// Activation does not touch expiry: an expired key stays unusable no
/// matter how often it is re-activated.
///
/// # Response
///
/// - **Success (200 OK)**: the updated summary
/// - **Error (404)**: no key with that id
pub async fn activate_key(
    State(store): State<SharedKeyStore>,
    Path(id): Path<i64>,
) -> Result<Json<ApiKeySummary>, AppError> {
    set_key_active(store.as_ref(), id, true).await
}

/// Deactivate an API key.
///
/// # Endpoint
///
/// `POST /api/v1/keys/{id}/deactivate`
///
/// Takes effect on the next verification; the record itself is kept.
///
/// # Response
///
/// - **Success (200 OK)**: the updated summary
/// - **Error (404)**: no key with that id
pub async fn deactivate_key(
    State(store): State<SharedKeyStore>,
    Path(id): Path<i64>,
) -> Result<Json<ApiKeySummary>, AppError> {
    set_key_active(store.as_ref(), id, false).await
}

/// Shared body of the activate/deactivate handlers: flip the flag, then
/// re-read the record for the acknowledgment.
async fn set_key_active(
    store: &dyn KeyStore,
    id: i64,
    active: bool,
) -> Result<Json<ApiKeySummary>, AppError> {
    if !store.set_active(id, active).await? {
        return Err(AppError::KeyNotFound);
    }

    tracing::info!(id, active, "API key activation flag updated");

    let record = store.find_by_id(id).await?.ok_or(AppError::KeyNotFound)?;
    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryKeyStore;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn admin_app() -> Router {
        let store: SharedKeyStore = Arc::new(MemoryKeyStore::new());
        Router::new()
            .route("/api/v1/keys", post(create_key))
            .route("/api/v1/keys", get(list_keys))
            .route("/api/v1/keys/{id}/activate", post(activate_key))
            .route("/api/v1/keys/{id}/deactivate", post(deactivate_key))
            .with_state(store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_create_returns_plaintext_secret_once() {
        let app = admin_app();

        let (status, body) = send(&app, "POST", "/api/v1/keys", Some(r#"{"name":"svc-A"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "svc-A");
        assert_eq!(body["key"].as_str().unwrap().len(), 32);
        assert!(body["id"].as_i64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn test_list_omits_plaintext_and_reports_state() {
        let app = admin_app();
        send(&app, "POST", "/api/v1/keys", Some(r#"{"name":"svc-A"}"#)).await;

        let (status, body) = send(&app, "GET", "/api/v1/keys", None).await;

        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "svc-A");
        assert_eq!(entries[0]["is_active"], true);
        assert_eq!(entries[0]["is_expired"], false);
        assert!(entries[0].get("key").is_none());
    }

    #[tokio::test]
    async fn test_deactivate_unknown_id_is_not_found() {
        let app = admin_app();

        let (status, body) = send(&app, "POST", "/api/v1/keys/42/deactivate", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "key_not_found");
    }

    #[tokio::test]
    async fn test_activate_deactivate_roundtrip() {
        let app = admin_app();
        let (_, created) = send(&app, "POST", "/api/v1/keys", Some("{}")).await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) =
            send(&app, "POST", &format!("/api/v1/keys/{id}/deactivate"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], false);

        let (status, body) = send(&app, "POST", &format!("/api/v1/keys/{id}/activate"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], true);
    }

    #[tokio::test]
    async fn test_created_key_is_expired_in_listing_when_window_is_zero() {
        let app = admin_app();
        send(&app, "POST", "/api/v1/keys", Some(r#"{"expiration_days":0}"#)).await;

        let (_, body) = send(&app, "GET", "/api/v1/keys", None).await;

        let entries = body.as_array().unwrap();
        assert_eq!(entries[0]["is_expired"], true);
        // Expiry and activation are independent axes
        assert_eq!(entries[0]["is_active"], true);
    }
}
