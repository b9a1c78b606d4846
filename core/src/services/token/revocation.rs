//! Revocation bookkeeping: per-token entries, the durable refresh-token
//! backstop, and the per-user cutover mark.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{hash_refresh_token, RevokedRefreshRecord};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::{KeyValueCache, RevokedTokenStore};

use super::cache_keys::{refresh_hash_from_key, refresh_key, revoked_key, user_revoked_key};
use super::config::TokenServiceConfig;
use super::validator::decode_claims_unverified;

/// Records and answers revocation state for access and refresh tokens.
pub struct RevocationRegistry<C, R> {
    cache: Arc<C>,
    durable: Arc<R>,
    config: TokenServiceConfig,
}

impl<C: KeyValueCache, R: RevokedTokenStore> RevocationRegistry<C, R> {
    /// Creates a new revocation registry
    pub fn new(cache: Arc<C>, durable: Arc<R>, config: TokenServiceConfig) -> Self {
        Self {
            cache,
            durable,
            config,
        }
    }

    /// Revokes a single access token by its `jti`.
    ///
    /// The token is parsed without signature validation; only `jti` and
    /// `exp` matter here. An already-expired token is a no-op: expiry
    /// rejection covers it and a revocation entry would be dead weight.
    ///
    /// # Returns
    /// * `Ok(true)` - Revocation entry written
    /// * `Ok(false)` - Token already expired, nothing to revoke
    /// * `Err(DomainError)` - Unreadable token, or the cache write failed
    pub async fn revoke_access_token(&self, jwt: &str) -> DomainResult<bool> {
        let claims = decode_claims_unverified(jwt)?;

        let remaining = claims.remaining_lifetime_seconds();
        if remaining == 0 {
            debug!("Access token {} already expired, nothing to revoke", claims.jti);
            return Ok(false);
        }

        // TTL bounded by the token's remaining lifetime keeps the
        // revocation list self-pruning.
        self.cache
            .set(&revoked_key(&claims.jti), "1", remaining as u64)
            .await?;

        info!("Revoked access token {} for {}s", claims.jti, remaining);
        Ok(true)
    }

    /// Checks whether an access token has been revoked.
    ///
    /// Unreadable tokens and tokens missing `jti` or `sub` count as
    /// revoked. A token is also revoked when its user's cutover timestamp
    /// is newer than the token's `auth_time`.
    pub async fn is_access_token_revoked(&self, jwt: &str) -> DomainResult<bool> {
        let claims = match decode_claims_unverified(jwt) {
            Ok(claims) => claims,
            Err(_) => return Ok(true),
        };

        if claims.jti.is_empty() || claims.sub.is_empty() {
            return Ok(true);
        }

        if self.cache.exists(&revoked_key(&claims.jti)).await? {
            return Ok(true);
        }

        if let Some(raw_cutover) = self.cache.get(&user_revoked_key(&claims.sub)).await? {
            if let Ok(cutover) = raw_cutover.parse::<i64>() {
                return Ok(claims.auth_time < cutover);
            }
        }

        Ok(false)
    }

    /// Revokes a single refresh token given its raw secret.
    ///
    /// # Returns
    /// * `Ok(true)` - Cache entry removed (if present) and hash durably
    ///   recorded
    /// * `Err(DomainError)` - Empty input, or either store failed; the
    ///   failure is reported, never swallowed
    pub async fn revoke_refresh_token(&self, raw_token: &str) -> DomainResult<bool> {
        if raw_token.trim().is_empty() {
            return Err(TokenError::Invalid.into());
        }

        let token_hash = hash_refresh_token(raw_token);
        let existed = self.cache.delete(&refresh_key(&token_hash)).await?;
        if !existed {
            warn!("Refresh token hash was not present in cache during revocation");
        }

        self.record_revoked_hash(&token_hash).await?;
        Ok(true)
    }

    /// Durably records a refresh-token hash as revoked.
    ///
    /// The cache no longer knows the token's original expiry, so the
    /// record conservatively lives for a full refresh lifetime before
    /// cleanup prunes it.
    pub(crate) async fn record_revoked_hash(&self, token_hash: &str) -> DomainResult<()> {
        let record = RevokedRefreshRecord::new(
            token_hash.to_string(),
            Utc::now() + self.config.refresh_token_lifetime(),
        );
        self.durable.insert(&record).await
    }

    /// Checks whether a refresh-token hash is in the durable revoked set.
    pub(crate) async fn is_hash_durably_revoked(&self, token_hash: &str) -> DomainResult<bool> {
        self.durable.exists(token_hash).await
    }

    /// Invalidates every token belonging to a user.
    ///
    /// Scans the cache for the user's refresh entries (best effort:
    /// per-entry failures are logged and skipped), then writes the cutover
    /// timestamp that kills all access tokens whose `auth_time` predates
    /// it. The cutover TTL equals the access-token lifetime, the window in
    /// which such tokens could still be alive.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<bool> {
        let owner = user_id.to_string();

        let keys = self.cache.scan_keys(&refresh_key("*")).await?;
        for key in keys {
            match self.cache.get(&key).await {
                Ok(Some(value)) if value == owner => {
                    if let Err(e) = self.cache.delete(&key).await {
                        warn!("Skipping refresh entry {} during logout-all: {}", key, e);
                        continue;
                    }
                    let token_hash = refresh_hash_from_key(&key);
                    if let Err(e) = self.record_revoked_hash(token_hash).await {
                        warn!(
                            "Failed to durably revoke refresh hash during logout-all: {}",
                            e
                        );
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to inspect refresh entry {} during logout-all: {}", key, e);
                }
            }
        }

        let cutover = Utc::now().timestamp().to_string();
        self.cache
            .set(
                &user_revoked_key(&owner),
                &cutover,
                self.config.access_token_lifetime_seconds(),
            )
            .await?;

        info!("All tokens revoked for user {}", user_id);
        Ok(true)
    }
}
