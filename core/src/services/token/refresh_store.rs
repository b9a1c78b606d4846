//! Opaque refresh-token minting and cache storage.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use rand::RngCore;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{hash_refresh_token, RefreshTokenRecord};
use crate::errors::DomainResult;
use crate::repositories::KeyValueCache;

use super::cache_keys;
use super::config::TokenServiceConfig;

/// Mints opaque refresh tokens and stores only their hash.
pub struct RefreshTokenStore<C> {
    cache: Arc<C>,
    config: TokenServiceConfig,
}

impl<C: KeyValueCache> RefreshTokenStore<C> {
    /// Creates a new refresh token store
    pub fn new(cache: Arc<C>, config: TokenServiceConfig) -> Self {
        Self { cache, config }
    }

    /// Generates a fresh refresh token for a user.
    ///
    /// A 256-bit secret is drawn from the thread CSPRNG and handed back
    /// base64url-encoded; only its SHA-256 hash reaches the cache
    /// (`refresh:{hash} -> userId`, TTL = refresh lifetime). The raw
    /// secret is returned exactly once and never stored or logged.
    ///
    /// # Returns
    /// * `Ok((record, raw_token))` - Server-side record plus the secret
    /// * `Err(DomainError)` - Cache write failed (transient)
    pub async fn generate_refresh_token(
        &self,
        user_id: Uuid,
    ) -> DomainResult<(RefreshTokenRecord, String)> {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        let raw_token = URL_SAFE_NO_PAD.encode(secret);

        let token_hash = hash_refresh_token(&raw_token);
        let expires_at = Utc::now() + self.config.refresh_token_lifetime();

        self.cache
            .set(
                &cache_keys::refresh_key(&token_hash),
                &user_id.to_string(),
                self.config.refresh_token_lifetime_seconds(),
            )
            .await?;

        debug!("Stored refresh token hash for user {}", user_id);
        Ok((RefreshTokenRecord::new(token_hash, expires_at), raw_token))
    }
}
