//! Configuration for the token services

use chrono::Duration;
use jsonwebtoken::Algorithm;
use th_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Configuration shared by the token services.
///
/// The signing secret itself lives in [`super::KeyProvider`]; this struct
/// carries everything else.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT issuer claim, checked during validation
    pub issuer: String,
    /// JWT audience claim, carried in tokens but not validated
    pub audience: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes
    pub access_token_lifetime_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_lifetime_days: i64,
    /// Allowed clock skew during validation, in seconds
    pub clock_skew_seconds: u64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: "taskhandler".to_string(),
            audience: "taskhandler-api".to_string(),
            algorithm: Algorithm::HS256,
            access_token_lifetime_minutes: 60,
            refresh_token_lifetime_days: 7,
            clock_skew_seconds: 60,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the environment-backed JWT configuration.
    ///
    /// Fails with a configuration error when any required setting is
    /// invalid; the service must not start in that state.
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        config.validate().map_err(|e| DomainError::Config {
            message: e.to_string(),
        })?;

        Ok(Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            algorithm: Algorithm::HS256,
            access_token_lifetime_minutes: config.access_token_lifetime_minutes,
            refresh_token_lifetime_days: config.refresh_token_lifetime_days,
            clock_skew_seconds: 60,
        })
    }

    /// Access token lifetime as a duration
    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_lifetime_minutes)
    }

    /// Refresh token lifetime as a duration
    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_lifetime_days)
    }

    /// Access token lifetime in whole seconds (cache TTLs)
    pub fn access_token_lifetime_seconds(&self) -> u64 {
        (self.access_token_lifetime_minutes * 60).max(0) as u64
    }

    /// Refresh token lifetime in whole seconds (cache TTLs)
    pub fn refresh_token_lifetime_seconds(&self) -> u64 {
        (self.refresh_token_lifetime_days * 24 * 60 * 60).max(0) as u64
    }
}
