//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::var_or;

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Default TTL for cache entries in seconds
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_connections: 10,
            connection_timeout: 5,
            default_ttl: default_ttl(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            url: var_or("REDIS_URL", "redis://localhost:6379"),
            max_connections: var_or("REDIS_MAX_CONNECTIONS", "10").parse().unwrap_or(10),
            connection_timeout: var_or("REDIS_CONNECTION_TIMEOUT", "5").parse().unwrap_or(5),
            default_ttl: default_ttl(),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_ttl() -> u64 {
    3600
}
