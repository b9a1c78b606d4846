//! Cache key layout for token state.
//!
//! Three key families share the cache:
//! - `refresh:{hash}` maps a refresh-token hash to its owning user id
//! - `revoked:{jti}` marks a single revoked access token
//! - `user_revoked:{userId}` holds a per-user revocation cutover timestamp

const REFRESH_PREFIX: &str = "refresh:";

pub(crate) fn refresh_key(token_hash: &str) -> String {
    format!("{}{}", REFRESH_PREFIX, token_hash)
}

pub(crate) fn revoked_key(jti: &str) -> String {
    format!("revoked:{}", jti)
}

pub(crate) fn user_revoked_key(user_id: &str) -> String {
    format!("user_revoked:{}", user_id)
}

/// Recover the token hash from a `refresh:{hash}` key found by a scan.
pub(crate) fn refresh_hash_from_key(key: &str) -> &str {
    key.strip_prefix(REFRESH_PREFIX).unwrap_or(key)
}
