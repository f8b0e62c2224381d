//! API key data model and request/response types.
//!
//! This module defines:
//! - `ApiKey`: Database entity representing an issued key
//! - `CreateApiKeyRequest`: Request body for issuing keys
//! - `ApiKeyCreatedResponse`: Response returned once at creation (includes the secret)
//! - `ApiKeySummary`: Listing/administrative view (never includes the secret)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Monotonically assigned identifier (BIGSERIAL)
/// - `key`: The opaque secret string, unique across all records
/// - `name`: Optional human-readable label
/// - `created_at`: When the key was issued
/// - `expires_at`: `created_at` plus the requested expiration window
/// - `is_active`: Whether the key is currently enabled
///
/// # Lifecycle
///
/// A record is created once, read many times during verification, and only
/// ever mutated on its `is_active` flag. Activation and expiry are
/// independent axes: a key can be inactive-but-unexpired, active-but-expired,
/// and so on. Only an active, unexpired key passes verification.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Unique identifier for this API key, assigned by the store
    pub id: i64,

    /// The opaque secret string, generated at creation and immutable after.
    ///
    /// Returned to the caller exactly once, in the creation response.
    /// Listings and administrative views never expose it.
    pub key: String,

    /// Optional human-readable label (e.g., the consuming service's name)
    pub name: Option<String>,

    /// Timestamp when this API key was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which verification always denies.
    ///
    /// Expiry is observed lazily at verification time; there is no
    /// background sweep and no way to extend it.
    pub expires_at: DateTime<Utc>,

    /// Whether this API key is currently active.
    ///
    /// Deactivated keys are rejected during verification. This provides a
    /// reversible way to revoke access without deleting the record.
    pub is_active: bool,
}

impl ApiKey {
    /// Whether this key has passed its expiration boundary.
    ///
    /// Evaluated against the current UTC clock on every call. The boundary
    /// is inclusive: a key whose `expires_at` equals now is already expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Request body for issuing a new API key.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "svc-A",
///   "expiration_days": 30
/// }
/// ```
///
/// Both fields are optional: `name` defaults to absent, `expiration_days`
/// to 7. A zero or negative window is accepted and produces a key that is
/// already expired.
#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    /// Optional label for the new key
    pub name: Option<String>,

    /// Days until expiration (defaults to 7 if not provided)
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i32,
}

/// Default expiration window when not specified in the request.
fn default_expiration_days() -> i32 {
    7
}

/// Response body returned when a key is created.
///
/// This is the only moment the plaintext secret is ever returned to a
/// caller; it is not retrievable again afterward.
///
/// # JSON Example
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
#[derive(Debug, Serialize)]
pub struct ApiKeyCreatedResponse {
    /// Identifier to use for later activate/deactivate calls
    pub id: i64,

    /// The plaintext secret (shown only this once)
    pub key: String,

    /// Label, if one was supplied
    pub name: Option<String>,

    /// Issuance timestamp
    pub created_at: DateTime<Utc>,

    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyCreatedResponse {
    fn from(record: ApiKey) -> Self {
        Self {
            id: record.id,
            key: record.key,
            name: record.name,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

/// Administrative view of an API key.
///
/// Used by the listing and activate/deactivate endpoints. The plaintext
/// `key` field is deliberately absent.
#[derive(Debug, Serialize)]
pub struct ApiKeySummary {
    /// Key identifier
    pub id: i64,

    /// Label, if one was supplied at creation
    pub name: Option<String>,

    /// Issuance timestamp
    pub created_at: DateTime<Utc>,

    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,

    /// Administrator-controlled activation flag
    pub is_active: bool,

    /// Whether the key is past its expiration boundary (computed at
    /// listing time, not stored)
    pub is_expired: bool,
}

/// Convert a database record into its administrative view.
///
/// This transformation drops the plaintext `key` and snapshots the expiry
/// check against the current clock.
impl From<ApiKey> for ApiKeySummary {
    fn from(record: ApiKey) -> Self {
        let is_expired = record.is_expired();
        Self {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            expires_at: record.expires_at,
            is_active: record.is_active,
            is_expired,
        }
    }
}
