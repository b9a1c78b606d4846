//! Access-token issuance.

use std::sync::Arc;

use chrono::TimeZone;
use chrono::Utc;
use jsonwebtoken::{encode, Header};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{AccessToken, Claims};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::UserDirectory;

use super::config::TokenServiceConfig;
use super::keys::KeyProvider;

/// Builds and signs access tokens from identity snapshots.
pub struct TokenIssuer<U> {
    directory: Arc<U>,
    keys: Arc<KeyProvider>,
    config: TokenServiceConfig,
}

impl<U: UserDirectory> TokenIssuer<U> {
    /// Creates a new token issuer
    pub fn new(directory: Arc<U>, keys: Arc<KeyProvider>, config: TokenServiceConfig) -> Self {
        Self {
            directory,
            keys,
            config,
        }
    }

    /// Generates a signed access token for a user.
    ///
    /// The `auth_time` claim is taken from the snapshot's stored
    /// last-login, so every token of a session carries the same value
    /// regardless of when it was minted.
    ///
    /// # Returns
    /// * `Ok(AccessToken)` - Signed token plus its computed expiration
    /// * `Err(DomainError)` - User absent (`UserNotFound`), snapshot
    ///   missing identity fields (`IncompleteIdentity`), or signing failed
    pub async fn generate_access_token(&self, user_id: Uuid) -> DomainResult<AccessToken> {
        let user = self
            .directory
            .get_by_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::UserNotFound))?;

        let (email, name, last_login) = user
            .identity_parts()
            .ok_or(DomainError::Token(TokenError::IncompleteIdentity))?;

        let claims = Claims::new_access_token(
            user_id,
            email,
            name,
            last_login.timestamp(),
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_lifetime(),
        );

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| DomainError::Internal {
                message: "Computed expiry timestamp out of range".to_string(),
            })?;

        let keys = self.keys.snapshot();
        let token = encode(&Header::new(keys.algorithm), &claims, &keys.encoding).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign access token: {}", e),
            }
        })?;

        debug!("Issued access token {} for user {}", claims.jti, user_id);
        Ok(AccessToken::new(token, expires_at))
    }
}
