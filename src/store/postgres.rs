//! PostgreSQL implementation of the key store.
//!
//! Backed by the shared sqlx connection pool. Each operation acquires a
//! connection from the pool for its own duration, so handles are released
//! on every exit path. Atomicity of single-row updates comes from
//! PostgreSQL itself; no additional locking is needed.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::api_key::ApiKey,
    store::KeyStore,
};

/// Key store backed by the `api_keys` table.
pub struct PgKeyStore {
    pool: DbPool,
}

impl PgKeyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgKeyStore {
    /// Insert a new key record.
    ///
    /// Both timestamps derive from the same `NOW()` (stable within a
    /// statement), which keeps `expires_at - created_at` exactly equal to
    /// the requested window. The UNIQUE constraint on `key` is the backstop
    /// against generator collisions; a violation surfaces as a database
    /// error.
    async fn insert(
        &self,
        key: &str,
        name: Option<String>,
        expiration_days: i32,
    ) -> Result<ApiKey, AppError> {
        let record = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (key, name, created_at, expires_at)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id, key, name, created_at, expires_at, is_active
            "#,
        )
        .bind(key)
        .bind(name)
        .bind(expiration_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        let record = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, created_at, expires_at, is_active
             FROM api_keys
             WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiKey>, AppError> {
        let record = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, created_at, expires_at, is_active
             FROM api_keys
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Fetch all records in reverse chronological order (newest first).
    async fn list_all(&self) -> Result<Vec<ApiKey>, AppError> {
        let records = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, name, created_at, expires_at, is_active
             FROM api_keys
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Flip the activation flag on a single record.
    ///
    /// A single-row UPDATE is atomic, so two concurrent calls on the same
    /// id settle on exactly one of the requested values, never a torn mix.
    async fn set_active(&self, id: i64, active: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE api_keys SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
