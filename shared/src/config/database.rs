//! Database configuration module

use serde::{Deserialize, Serialize};

use super::var_or;

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/taskhandler"),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            url: var_or("DATABASE_URL", "mysql://localhost:3306/taskhandler"),
            max_connections: var_or("DATABASE_MAX_CONNECTIONS", "10").parse().unwrap_or(10),
            connect_timeout: var_or("DATABASE_CONNECT_TIMEOUT", "30").parse().unwrap_or(30),
            idle_timeout: var_or("DATABASE_IDLE_TIMEOUT", "600").parse().unwrap_or(600),
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
