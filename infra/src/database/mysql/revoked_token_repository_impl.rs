//! MySQL implementation of the RevokedTokenStore trait.
//!
//! Durable backstop for revoked refresh-token hashes. The backing table:
//!
//! ```sql
//! CREATE TABLE revoked_refresh_tokens (
//!     token_hash VARCHAR(64) NOT NULL PRIMARY KEY,
//!     revoked_at DATETIME(6)  NOT NULL,
//!     expires_at DATETIME(6)  NOT NULL,
//!     INDEX idx_revoked_refresh_tokens_expires_at (expires_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::debug;

use th_core::domain::entities::token::RevokedRefreshRecord;
use th_core::errors::DomainError;
use th_core::repositories::RevokedTokenStore;

/// MySQL implementation of RevokedTokenStore
pub struct MySqlRevokedTokenStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevokedTokenStore {
    /// Create a new MySQL revoked-token store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn store_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::transient(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl RevokedTokenStore for MySqlRevokedTokenStore {
    async fn insert(&self, record: &RevokedRefreshRecord) -> Result<(), DomainError> {
        // Re-revoking the same hash refreshes the record instead of failing
        let query = r#"
            INSERT INTO revoked_refresh_tokens (token_hash, revoked_at, expires_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                revoked_at = VALUES(revoked_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&record.token_hash)
            .bind(record.revoked_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to insert revoked token record", e))?;

        debug!("Durably recorded revoked refresh token hash");
        Ok(())
    }

    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM revoked_refresh_tokens WHERE token_hash = ?) AS present";

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to check revoked token record", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| Self::store_error("Failed to read existence result", e))?;

        Ok(present == 1)
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_refresh_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to delete revoked token record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let now: DateTime<Utc> = Utc::now();

        let result = sqlx::query("DELETE FROM revoked_refresh_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("Failed to prune revoked token records", e))?;

        Ok(result.rows_affected() as usize)
    }
}
