//! Refresh-token rotation.
//!
//! A refresh token moves `Issued -> Active -> {Rotated | Expired |
//! Revoked}`; the terminal states have no way out. Rotation is the only
//! transition that mints anything, and it must hand out at most one new
//! pair per raw secret no matter how many callers present it at once.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{hash_refresh_token, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{KeyValueCache, RevokedTokenStore, UserDirectory};
use crate::services::events::{AuthEvent, EventRegistry};

use super::cache_keys::refresh_key;
use super::issuer::TokenIssuer;
use super::refresh_store::RefreshTokenStore;
use super::revocation::RevocationRegistry;

/// Single entry point for consuming a refresh token and minting the next
/// pair.
pub struct RotationCoordinator<C, U, R> {
    cache: Arc<C>,
    issuer: Arc<TokenIssuer<U>>,
    refresh_store: Arc<RefreshTokenStore<C>>,
    revocation: Arc<RevocationRegistry<C, R>>,
    events: Arc<EventRegistry>,
}

impl<C, U, R> RotationCoordinator<C, U, R>
where
    C: KeyValueCache,
    U: UserDirectory,
    R: RevokedTokenStore,
{
    /// Creates a new rotation coordinator
    pub fn new(
        cache: Arc<C>,
        issuer: Arc<TokenIssuer<U>>,
        refresh_store: Arc<RefreshTokenStore<C>>,
        revocation: Arc<RevocationRegistry<C, R>>,
        events: Arc<EventRegistry>,
    ) -> Self {
        Self {
            cache,
            issuer,
            refresh_store,
            revocation,
            events,
        }
    }

    /// Consumes a refresh token and mints a new access/refresh pair.
    ///
    /// The commit point is the atomic check-and-delete of the cache
    /// entry: before it, a failure or cancellation leaves no persisted
    /// change; the caller that wins the delete is the only one allowed to
    /// mint. A hash already in the durable revoked set, or a delete that
    /// reports "did not exist", is a replay and fails with `Conflict`.
    /// Past the commit point every failure is reported as transient: the
    /// old token is gone, so the caller recovers with a fresh login.
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - New pair; `auth_time` still reflects the
    ///   session's stored last-login
    /// * `Err(DomainError)` - `Invalid`, `Conflict`, or `Transient` per
    ///   the rules above
    pub async fn refresh_tokens(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        if raw_refresh_token.trim().is_empty() {
            return Err(TokenError::Invalid.into());
        }

        let token_hash = hash_refresh_token(raw_refresh_token);

        if self.revocation.is_hash_durably_revoked(&token_hash).await? {
            warn!("Replay of a durably revoked refresh token");
            return Err(TokenError::Conflict.into());
        }

        let owner = self
            .cache
            .get(&refresh_key(&token_hash))
            .await?
            .ok_or(DomainError::Token(TokenError::Invalid))?;
        let user_id =
            Uuid::parse_str(&owner).map_err(|_| DomainError::Token(TokenError::Invalid))?;

        // Commit point: one atomic check-and-delete decides which caller
        // consumes the token. No separate read is consulted.
        let consumed = self.cache.delete(&refresh_key(&token_hash)).await?;
        if !consumed {
            warn!("Refresh token replay detected for user {}", user_id);
            return Err(TokenError::Conflict.into());
        }

        // The consumed hash must stay dead even if the cache later evicts
        // its tombstone; a failed durable insert is logged, not fatal,
        // because the cache entry is already gone.
        if let Err(e) = self.revocation.record_revoked_hash(&token_hash).await {
            warn!("Failed to durably record rotated refresh token: {}", e);
        }

        let access = self
            .issuer
            .generate_access_token(user_id)
            .await
            .map_err(transient_after_commit)?;
        let (refresh, raw_token) = self
            .refresh_store
            .generate_refresh_token(user_id)
            .await
            .map_err(transient_after_commit)?;

        info!("Rotated refresh token for user {}", user_id);
        self.events.dispatch(&AuthEvent::TokensRotated { user_id });

        Ok(TokenPair::new(access, refresh, raw_token))
    }
}

/// Past the commit point the old refresh token is spent; whatever went
/// wrong, the caller's only recovery is re-authentication.
fn transient_after_commit(source: DomainError) -> DomainError {
    DomainError::Transient {
        message: format!(
            "Rotation interrupted after consuming the refresh token: {}",
            source
        ),
    }
}
