//! Periodic maintenance of the durable revoked-token store.
//!
//! Cache-side revocation entries expire on their own TTLs; the durable
//! backstop rows do not, so a background task prunes the ones whose
//! shadowed token has expired.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::RevokedTokenStore;

/// Configuration for the revocation cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for pruning expired revoked-token records
pub struct RevocationCleanupService<R: RevokedTokenStore + 'static> {
    store: Arc<R>,
    config: RevocationCleanupConfig,
}

impl<R: RevokedTokenStore> RevocationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(store: Arc<R>, config: RevocationCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cleanup run
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.store.delete_expired().await {
            Ok(count) => {
                result.revoked_records_deleted = count;
                info!("Deleted {} expired revoked-token records", count);
            }
            Err(e) => {
                error!("Failed to prune revoked-token records: {}", e);
                result.errors.push(format!("Revocation cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Revocation cleanup cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired revoked-token records deleted
    pub revoked_records_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
