//! Signing-key management for token issuance and validation.
//!
//! Key material is held as an immutable snapshot behind an atomically
//! swapped `Arc`. Readers take the lock only for the pointer exchange,
//! never across a network call, so a concurrent key rotation cannot stall
//! token traffic.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tracing::{error, info, warn};

use crate::errors::DomainError;

/// Immutable signing/verification key material
#[derive(Clone)]
pub struct KeySnapshot {
    /// Key for signing tokens
    pub(crate) encoding: EncodingKey,
    /// Key for verifying tokens
    pub(crate) decoding: DecodingKey,
    /// Algorithm the keys belong to
    pub(crate) algorithm: Algorithm,
}

impl KeySnapshot {
    /// Build HS256 key material from a shared secret.
    ///
    /// # Returns
    /// * `Ok(KeySnapshot)` - Key material ready for use
    /// * `Err(DomainError)` - The secret is empty (fatal misconfiguration)
    pub fn from_secret(secret: &str) -> Result<Self, DomainError> {
        if secret.trim().is_empty() {
            return Err(DomainError::Config {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        })
    }
}

impl std::fmt::Debug for KeySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySnapshot")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Owner of the current signing credentials.
///
/// Injected into every component that signs or verifies tokens; each
/// operation works against the snapshot it grabbed, so a swap mid-request
/// cannot mix old and new key material.
pub struct KeyProvider {
    current: RwLock<Arc<KeySnapshot>>,
}

impl KeyProvider {
    /// Create a provider from the configured HS256 secret
    pub fn from_secret(secret: &str) -> Result<Self, DomainError> {
        Ok(Self {
            current: RwLock::new(Arc::new(KeySnapshot::from_secret(secret)?)),
        })
    }

    /// The current key material
    pub fn snapshot(&self) -> Arc<KeySnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in key material built from a new secret.
    ///
    /// Tokens signed with the previous secret stop validating once the
    /// swap completes; callers coordinate rollover windows themselves.
    pub fn install_secret(&self, secret: &str) -> Result<(), DomainError> {
        let snapshot = Arc::new(KeySnapshot::from_secret(secret)?);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
        info!("Installed new signing key material");
        Ok(())
    }

    /// Periodically pull a fresh secret from `source` and install it.
    ///
    /// A failing pull keeps the current keys and retries next interval.
    pub fn start_refresh_task<F>(self: Arc<Self>, interval: Duration, source: F)
    where
        F: Fn() -> Result<String, DomainError> + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            info!(
                "Signing-key refresh task started - will run every {}s",
                interval.as_secs()
            );
            let mut timer = tokio::time::interval(interval);
            // The first tick fires immediately; skip it, the provider
            // already holds valid keys.
            timer.tick().await;

            loop {
                timer.tick().await;
                match source() {
                    Ok(secret) => {
                        if let Err(e) = self.install_secret(&secret) {
                            error!("Refusing refreshed signing secret: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("Signing-key refresh failed, keeping current keys: {}", e);
                    }
                }
            }
        });
    }
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("current", &self.snapshot())
            .finish()
    }
}
