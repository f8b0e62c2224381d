//! Key store abstraction and implementations.
//!
//! The store owns the durable record of every issued key. It is consumed
//! through the [`KeyStore`] trait and injected into the verification service
//! and the HTTP handlers at construction time, never reached through a
//! process-wide singleton. Production uses [`postgres::PgKeyStore`]; tests
//! substitute an in-memory fake.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{error::AppError, models::api_key::ApiKey};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Shared handle to the key store, cloned into middleware and handlers.
pub type SharedKeyStore = Arc<dyn KeyStore>;

/// Durable record store for API keys.
///
/// Each operation is atomic and immediately visible to subsequent reads.
/// Conflicting writes (e.g., two concurrent `set_active` calls on the same
/// id) are serialized by the implementation, so the final state is always
/// one of the requested values.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Persist a new key record.
    ///
    /// The store assigns the identifier and computes both timestamps from a
    /// single clock reading, so `expires_at` is exactly `created_at` plus
    /// `expiration_days`. The record starts active. A zero or negative
    /// window yields a record that is already expired.
    async fn insert(
        &self,
        key: &str,
        name: Option<String>,
        expiration_days: i32,
    ) -> Result<ApiKey, AppError>;

    /// Look up a record by its secret string.
    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError>;

    /// Look up a record by its identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<ApiKey>, AppError>;

    /// Fetch every record, newest first.
    async fn list_all(&self) -> Result<Vec<ApiKey>, AppError>;

    /// Flip a record's activation flag.
    ///
    /// Returns `false` if no record has the given id; nothing is mutated in
    /// that case.
    async fn set_active(&self, id: i64, active: bool) -> Result<bool, AppError>;
}
