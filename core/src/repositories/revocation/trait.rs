//! Durable store trait for revoked refresh tokens.
//!
//! The cache alone cannot guarantee that a consumed refresh hash stays
//! dead: an eviction would erase the evidence. Every revocation therefore
//! also lands in this store, which rotation consults before trusting a
//! hash it found in the cache.

use async_trait::async_trait;

use crate::domain::entities::token::RevokedRefreshRecord;
use crate::errors::DomainError;

/// Contract for the durable revoked-refresh-token backstop.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    /// Persist a revoked-token record, keyed by its hash.
    ///
    /// Inserting an already-present hash is a no-op, not an error;
    /// rotation and explicit revocation may both record the same hash.
    async fn insert(&self, record: &RevokedRefreshRecord) -> Result<(), DomainError>;

    /// Check whether a hash has been durably revoked.
    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Remove the record for a hash, reporting whether it existed.
    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete all records whose shadowed token has expired.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records pruned
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
