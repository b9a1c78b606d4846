//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing configuration (strictly required at startup)
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration

pub mod auth;
pub mod cache;
pub mod database;

use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;

/// Errors raised while loading configuration from the environment.
///
/// These are fatal: a service that cannot assemble its configuration must
/// not start accepting traffic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: String, reason: String },
}

/// Read a required environment variable, failing if absent or blank.
pub(crate) fn require_var(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar {
            name: name.to_string(),
        }),
    }
}

/// Read an optional environment variable, applying a default when absent.
pub(crate) fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// JWT settings are strictly required; cache and database settings fall
    /// back to local development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
        })
    }
}
