//! Domain-specific error types and error handling.
//!
//! Expected failures are modeled as explicit values rather than panics or
//! unwinding, so callers can branch on the exact class of failure
//! (re-authentication on `Conflict`, retry on `Transient`, and so on).

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No user exists for the requested identity
    #[error("User not found")]
    UserNotFound,

    /// The identity snapshot lacks email, name, or last-login
    #[error("User identity snapshot is incomplete")]
    IncompleteIdentity,

    /// Malformed token, unknown refresh secret, or failed signature check
    #[error("Token is invalid")]
    Invalid,

    /// Token lifetime has elapsed
    #[error("Token expired")]
    Expired,

    /// Token was revoked, either individually or by a per-user cutover
    #[error("Token revoked")]
    Revoked,

    /// Refresh token was already consumed by a concurrent or earlier rotation
    #[error("Refresh token already rotated")]
    Conflict,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Cache or durable store temporarily unavailable; callers may retry
    #[error("Transient dependency failure: {message}")]
    Transient { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a transient infrastructure failure.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Whether the failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
