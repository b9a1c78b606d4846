//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Claims structure for the access-token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email at issuance time
    pub email: String,

    /// User display name at issuance time
    pub name: String,

    /// Epoch seconds of the session's last login
    pub auth_time: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token.
    ///
    /// `auth_time` is the epoch-second timestamp of the session's last
    /// login; it is carried unchanged through rotations so a per-user
    /// revocation cutover can invalidate every token of the session.
    pub fn new_access_token(
        user_id: Uuid,
        email: &str,
        name: &str,
        auth_time: i64,
        issuer: &str,
        audience: &str,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            auth_time,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Remaining lifetime in whole seconds, zero once expired
    pub fn remaining_lifetime_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Signed access token returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Compact signed token string (header.payload.signature)
    pub token: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a new access token value object
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Checks if the access token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Refresh-token record kept server side.
///
/// Only the SHA-256 hash of the opaque secret is ever stored; possession
/// of the raw secret is the sole proof of validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Hex-encoded SHA-256 hash of the raw token
    pub token_hash: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new refresh-token record
    pub fn new(token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash,
            expires_at,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Durable record of a revoked refresh token.
///
/// Written alongside the cache deletion so an early cache eviction cannot
/// resurrect a consumed hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedRefreshRecord {
    /// Hex-encoded SHA-256 hash of the revoked token
    pub token_hash: String,

    /// Timestamp when the token was revoked
    pub revoked_at: DateTime<Utc>,

    /// Timestamp after which the record itself can be pruned
    pub expires_at: DateTime<Utc>,
}

impl RevokedRefreshRecord {
    /// Creates a new revoked-token record
    pub fn new(token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash,
            revoked_at: Utc::now(),
            expires_at,
        }
    }

    /// Checks if the record has outlived the token it shadows
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned at login and at rotation
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token
    pub access: AccessToken,

    /// Server-side refresh record (hash + expiry)
    pub refresh: RefreshTokenRecord,

    /// The opaque refresh secret, handed out exactly once
    pub raw_refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access: AccessToken, refresh: RefreshTokenRecord, raw_refresh_token: String) -> Self {
        Self {
            access,
            refresh,
            raw_refresh_token,
        }
    }
}

// The raw refresh secret must never end up in logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &self.access)
            .field("refresh", &self.refresh)
            .field("raw_refresh_token", &"<redacted>")
            .finish()
    }
}

/// Hashes a raw refresh token for storage and lookup
pub fn hash_refresh_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    hex::encode(hasher.finalize())
}
