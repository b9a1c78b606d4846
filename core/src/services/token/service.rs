//! Token service facade.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{hash_refresh_token, TokenPair};
use crate::errors::DomainResult;
use crate::repositories::{KeyValueCache, RevokedTokenStore, UserDirectory};
use crate::services::events::{AuthEvent, EventRegistry};

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::keys::KeyProvider;
use super::refresh_store::RefreshTokenStore;
use super::revocation::RevocationRegistry;
use super::rotation::RotationCoordinator;
use super::validator::{decode_claims_unverified, TokenValidator};

/// Entry point for the authentication token core.
///
/// Composes the issuer, refresh store, revocation registry, validator,
/// and rotation coordinator over one cache, user directory, and durable
/// store, and exposes the operations the auth layer consumes.
pub struct TokenService<C, U, R> {
    directory: Arc<U>,
    issuer: Arc<TokenIssuer<U>>,
    refresh_store: Arc<RefreshTokenStore<C>>,
    revocation: Arc<RevocationRegistry<C, R>>,
    validator: TokenValidator<C, R>,
    rotation: RotationCoordinator<C, U, R>,
    events: Arc<EventRegistry>,
}

impl<C, U, R> TokenService<C, U, R>
where
    C: KeyValueCache,
    U: UserDirectory,
    R: RevokedTokenStore,
{
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `cache` - Shared TTL-based key/value cache
    /// * `directory` - User identity lookup
    /// * `durable` - Durable revoked-refresh-token store
    /// * `keys` - Signing credential holder
    /// * `config` - Token service configuration
    /// * `events` - Startup-built auth event registry
    pub fn new(
        cache: Arc<C>,
        directory: Arc<U>,
        durable: Arc<R>,
        keys: Arc<KeyProvider>,
        config: TokenServiceConfig,
        events: Arc<EventRegistry>,
    ) -> Self {
        let issuer = Arc::new(TokenIssuer::new(
            directory.clone(),
            keys.clone(),
            config.clone(),
        ));
        let refresh_store = Arc::new(RefreshTokenStore::new(cache.clone(), config.clone()));
        let revocation = Arc::new(RevocationRegistry::new(
            cache.clone(),
            durable,
            config.clone(),
        ));
        let validator = TokenValidator::new(keys, revocation.clone(), config.clone());
        let rotation = RotationCoordinator::new(
            cache,
            issuer.clone(),
            refresh_store.clone(),
            revocation.clone(),
            events.clone(),
        );

        Self {
            directory,
            issuer,
            refresh_store,
            revocation,
            validator,
            rotation,
            events,
        }
    }

    /// Issues a fresh access/refresh pair for a user at login.
    pub async fn generate_token_pair(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let access = self.issuer.generate_access_token(user_id).await?;
        let (refresh, raw_token) = self.refresh_store.generate_refresh_token(user_id).await?;

        self.events
            .dispatch(&AuthEvent::TokenPairIssued { user_id });

        Ok(TokenPair::new(access, refresh, raw_token))
    }

    /// Validates an access token (signature, claims, lifetime, revocation).
    pub async fn validate_token(&self, token: &str) -> DomainResult<bool> {
        self.validator.validate_token(token).await
    }

    /// Rotates a refresh token into a new pair.
    ///
    /// Fails with `Conflict` on replay and `Invalid` on unknown or expired
    /// secrets; see [`RotationCoordinator::refresh_tokens`].
    pub async fn refresh_tokens(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        self.rotation.refresh_tokens(raw_refresh_token).await
    }

    /// Revokes a single access token for its remaining lifetime.
    pub async fn revoke_access_token(&self, token: &str) -> DomainResult<bool> {
        let revoked = self.revocation.revoke_access_token(token).await?;

        if revoked {
            if let Ok(claims) = decode_claims_unverified(token) {
                self.events
                    .dispatch(&AuthEvent::AccessTokenRevoked { jti: claims.jti });
            }
        }

        Ok(revoked)
    }

    /// Revokes a single refresh token given its raw secret.
    pub async fn revoke_refresh_token(&self, raw_token: &str) -> DomainResult<bool> {
        let revoked = self.revocation.revoke_refresh_token(raw_token).await?;

        if revoked {
            self.events.dispatch(&AuthEvent::RefreshTokenRevoked {
                token_hash: hash_refresh_token(raw_token),
            });
        }

        Ok(revoked)
    }

    /// Logs a user out everywhere: drops their refresh tokens and writes
    /// the cutover mark that invalidates every live access token.
    ///
    /// # Returns
    /// * `Ok(true)` - Revocation completed
    /// * `Ok(false)` - No such user; nothing was written
    pub async fn revoke_all_tokens_for_user(&self, user_id: Uuid) -> DomainResult<bool> {
        if self.directory.get_by_id(user_id).await?.is_none() {
            debug!("Ignoring logout-all for unknown user {}", user_id);
            return Ok(false);
        }

        let revoked = self.revocation.revoke_all_for_user(user_id).await?;

        if revoked {
            self.events
                .dispatch(&AuthEvent::AllUserTokensRevoked { user_id });
        }

        Ok(revoked)
    }
}
