//! Access-token validation.

use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{KeyValueCache, RevokedTokenStore};

use super::config::TokenServiceConfig;
use super::keys::KeyProvider;
use super::revocation::RevocationRegistry;

/// Validates access tokens: revocation state first, then signature,
/// issuer, and lifetime.
pub struct TokenValidator<C, R> {
    keys: Arc<KeyProvider>,
    revocation: Arc<RevocationRegistry<C, R>>,
    config: TokenServiceConfig,
}

impl<C: KeyValueCache, R: RevokedTokenStore> TokenValidator<C, R> {
    /// Creates a new token validator
    pub fn new(
        keys: Arc<KeyProvider>,
        revocation: Arc<RevocationRegistry<C, R>>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            keys,
            revocation,
            config,
        }
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // The audience claim is carried but not checked
        validation.validate_aud = false;
        validation.leeway = self.config.clock_skew_seconds;
        validation
    }

    /// Validates an access token.
    ///
    /// Every validity failure (malformed, bad signature, wrong issuer,
    /// expired, revoked) is a clean `false`; only infrastructure outages
    /// surface as errors.
    pub async fn validate_token(&self, token: &str) -> DomainResult<bool> {
        if token.trim().is_empty() {
            return Ok(false);
        }

        if self.revocation.is_access_token_revoked(token).await? {
            return Ok(false);
        }

        let keys = self.keys.snapshot();
        match decode::<Claims>(token, &keys.decoding, &self.validation(keys.algorithm)) {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("Access token failed validation: {}", e);
                Ok(false)
            }
        }
    }
}

/// Decodes claims without verifying the signature or expiry.
///
/// Revocation bookkeeping needs `jti`, `sub`, `auth_time`, and `exp` from
/// tokens it does not otherwise trust; full validation stays with
/// [`TokenValidator`].
pub(crate) fn decode_claims_unverified(token: &str) -> Result<Claims, DomainError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|_| DomainError::Token(TokenError::Invalid))?;
    Ok(data.claims)
}
