//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::{require_var, ConfigError};

/// JWT signing configuration.
///
/// Every field is required at startup; a missing or malformed value is a
/// fatal [`ConfigError`] so the service never signs or validates tokens
/// with a partial configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HS256 signing
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in minutes
    pub access_token_lifetime_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_lifetime_days: i64,
}

impl JwtConfig {
    /// Load the JWT configuration from environment variables.
    ///
    /// Reads `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE`,
    /// `JWT_ACCESS_TOKEN_LIFETIME_MINUTES` and
    /// `JWT_REFRESH_TOKEN_LIFETIME_DAYS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            secret: require_var("JWT_SECRET")?,
            issuer: require_var("JWT_ISSUER")?,
            audience: require_var("JWT_AUDIENCE")?,
            access_token_lifetime_minutes: parse_required("JWT_ACCESS_TOKEN_LIFETIME_MINUTES")?,
            refresh_token_lifetime_days: parse_required("JWT_REFRESH_TOKEN_LIFETIME_DAYS")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate field-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::InvalidVar {
                name: "JWT_SECRET".to_string(),
                reason: "secret must not be empty".to_string(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::InvalidVar {
                name: "JWT_ISSUER".to_string(),
                reason: "issuer must not be empty".to_string(),
            });
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::InvalidVar {
                name: "JWT_AUDIENCE".to_string(),
                reason: "audience must not be empty".to_string(),
            });
        }
        if self.access_token_lifetime_minutes <= 0 {
            return Err(ConfigError::InvalidVar {
                name: "JWT_ACCESS_TOKEN_LIFETIME_MINUTES".to_string(),
                reason: "lifetime must be positive".to_string(),
            });
        }
        if self.refresh_token_lifetime_days <= 0 {
            return Err(ConfigError::InvalidVar {
                name: "JWT_REFRESH_TOKEN_LIFETIME_DAYS".to_string(),
                reason: "lifetime must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Access token lifetime in seconds
    pub fn access_token_lifetime_seconds(&self) -> i64 {
        self.access_token_lifetime_minutes * 60
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_lifetime_seconds(&self) -> i64 {
        self.refresh_token_lifetime_days * 24 * 60 * 60
    }
}

fn parse_required(name: &str) -> Result<i64, ConfigError> {
    let raw = require_var(name)?;
    raw.parse().map_err(|_| ConfigError::InvalidVar {
        name: name.to_string(),
        reason: format!("expected an integer, got '{}'", raw),
    })
}
