//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TaskHandler
//! backend. It provides concrete implementations of the collaborator
//! contracts the token core consumes:
//!
//! - **Cache**: Redis client implementing the key/value cache contract
//! - **Database**: MySQL implementation of the durable revoked-token store

use thiserror::Error;

use th_core::errors::DomainError;

/// Cache module - Redis client and operations
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Errors raised by infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Infrastructure failures reach the domain layer as transient errors,
/// except misconfiguration, which is fatal.
impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Config { message },
            other => DomainError::transient(other.to_string()),
        }
    }
}
