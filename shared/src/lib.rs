//! Shared utilities and common types for the TaskHandler server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Configuration error types

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CacheConfig, ConfigError, DatabaseConfig, JwtConfig};
