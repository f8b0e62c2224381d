//! API key service - generation, issuance, and verification.
//!
//! This service handles:
//! - Random secret generation
//! - Key creation with expiration
//! - The allow/deny verification decision
//!
//! The service itself is stateless; all shared state lives behind the
//! injected [`KeyStore`]. Verification is read-only: it neither mutates
//! records nor logs attempts.

use rand::{Rng, distr::Alphanumeric};

use crate::{error::AppError, models::api_key::ApiKey, store::KeyStore};

/// Length of generated API keys, in characters.
pub const API_KEY_LENGTH: usize = 32;

/// Generate a random API key.
///
/// # Output
///
/// `length` characters drawn uniformly from `{A-Z, a-z, 0-9}`, sampled
/// from the thread-local CSPRNG so outputs are not predictable from prior
/// ones. Collisions over the 62^32 keyspace are negligible; the store's
/// uniqueness constraint on `key` is the backstop, not the generator.
pub fn generate_api_key(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Create a new API key with expiration.
///
/// # Process
///
/// 1. Generate a fresh secret via [`generate_api_key`]
/// 2. Delegate persistence to the store, which assigns the id and computes
///    `created_at`/`expires_at` from one clock reading
///
/// # Returns
///
/// The full record, including the plaintext secret. This is the only
/// moment the plaintext is ever handed back; afterward only the record's
/// metadata is retrievable.
///
/// # Errors
///
/// - `Database`: the store failed to persist the record
pub async fn create_api_key(
    store: &dyn KeyStore,
    name: Option<String>,
    expiration_days: i32,
) -> Result<ApiKey, AppError> {
    let key = generate_api_key(API_KEY_LENGTH);
    store.insert(&key, name, expiration_days).await
}

/// Verify if an API key is valid and not expired.
///
/// # Checks
///
/// 1. A record exists for the candidate string
/// 2. The record is active
/// 3. The record is not past its expiration boundary (evaluated now, at
///    call time - never cached)
///
/// All three must pass for `true`. The checks leave no trace: this
/// function has no side effects, so an abandoned verification needs no
/// unwinding.
///
/// # Errors
///
/// - `Database`: the lookup itself failed. Store failures propagate to the
///   caller unmasked; they are not authentication failures.
pub async fn verify_api_key(store: &dyn KeyStore, candidate: &str) -> Result<bool, AppError> {
    let record = match store.find_by_key(candidate).await? {
        Some(record) => record,
        None => return Ok(false),
    };

    if !record.is_active {
        return Ok(false);
    }

    if record.is_expired() {
        return Ok(false);
    }

    Ok(true)
}
