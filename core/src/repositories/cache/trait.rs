//! Key/value cache trait defining the interface for shared TTL-based state.
//!
//! The cache is the synchronization boundary for token lifecycles: its
//! operations must be atomic on the backing store, so no in-process lock
//! is needed around a single token's state transitions.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Contract for the shared low-latency cache.
///
/// Implementations map errors to [`DomainError::Transient`] so callers can
/// distinguish an outage from a definitive answer.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Store `value` under `key` with a time-to-live in seconds.
    ///
    /// An existing entry is replaced and its TTL reset.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Fetch the value stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Entry present and not expired
    /// * `Ok(None)` - No live entry for the key
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remove the entry under `key`, reporting whether it existed.
    ///
    /// This MUST be a single atomic check-and-delete on the backing store:
    /// when two callers race on the same key, exactly one observes `true`.
    /// Callers rely on that return value to decide ownership; they never
    /// pair a read with a delete.
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Check whether a live entry exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// List keys matching a glob-style pattern (e.g. `refresh:*`).
    ///
    /// Scanning is not atomic with concurrent writers; callers must
    /// tolerate entries appearing or vanishing mid-scan.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, DomainError>;
}
