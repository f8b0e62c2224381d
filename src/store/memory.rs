//! In-memory key store used as a test double.
//!
//! Mirrors the PostgreSQL store's observable behavior: monotonically
//! assigned ids, both timestamps from a single clock reading, newest-first
//! listing, and atomic activation toggles (a mutex serializes conflicting
//! writes the way single-row updates do in PostgreSQL).

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;

use crate::{error::AppError, models::api_key::ApiKey, store::KeyStore};

/// Key store holding records in process memory.
pub struct MemoryKeyStore {
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: i64,
    records: Vec<ApiKey>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn insert(
        &self,
        key: &str,
        name: Option<String>,
        expiration_days: i32,
    ) -> Result<ApiKey, AppError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        let created_at = Utc::now();
        let record = ApiKey {
            id: inner.next_id,
            key: key.to_string(),
            name,
            created_at,
            expires_at: created_at + Duration::days(i64::from(expiration_days)),
            is_active: true,
        };

        inner.next_id += 1;
        inner.records.push(record.clone());

        Ok(record)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.records.iter().find(|r| r.key == key).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiKey>, AppError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ApiKey>, AppError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        // Newest first, matching the PostgreSQL implementation
        let mut records = inner.records.clone();
        records.reverse();
        Ok(records)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        match inner.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids() {
        let store = MemoryKeyStore::new();

        let first = store.insert("key-one", None, 7).await.unwrap();
        let second = store.insert("key-two", None, 7).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_active);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let store = MemoryKeyStore::new();
        store.insert("key-one", None, 7).await.unwrap();
        store.insert("key-two", None, 7).await.unwrap();

        let listed = store.list_all().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].key, "key-two");
        assert_eq!(listed[1].key, "key-one");
    }

    #[tokio::test]
    async fn test_set_active_unknown_id_mutates_nothing() {
        let store = MemoryKeyStore::new();
        store.insert("key-one", None, 7).await.unwrap();

        let found = store.set_active(42, false).await.unwrap();

        assert!(!found);
        assert!(store.find_by_id(1).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_settle_on_one_value() {
        let store = Arc::new(MemoryKeyStore::new());
        let record = store.insert("key-one", None, 7).await.unwrap();

        let deactivate = {
            let store = store.clone();
            let id = record.id;
            tokio::spawn(async move { store.set_active(id, false).await })
        };
        let activate = {
            let store = store.clone();
            let id = record.id;
            tokio::spawn(async move { store.set_active(id, true).await })
        };

        assert!(deactivate.await.unwrap().unwrap());
        assert!(activate.await.unwrap().unwrap());

        // The final flag is whichever write landed last; listing agrees with
        // the point read, with no torn state in between.
        let final_record = store.find_by_id(record.id).await.unwrap().unwrap();
        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].is_active, final_record.is_active);
    }
}
