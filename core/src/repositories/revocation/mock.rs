//! Mock implementation of RevokedTokenStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedRefreshRecord;
use crate::errors::DomainError;

use super::r#trait::RevokedTokenStore;

/// Mock durable revocation store for testing
pub struct MockRevokedTokenStore {
    records: Arc<RwLock<HashMap<String, RevokedRefreshRecord>>>,
    available: AtomicBool,
}

impl MockRevokedTokenStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle simulated availability of the backing store
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::transient("mock revocation store unavailable"))
        }
    }
}

impl Default for MockRevokedTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevokedTokenStore for MockRevokedTokenStore {
    async fn insert(&self, record: &RevokedRefreshRecord) -> Result<(), DomainError> {
        self.check_available()?;
        self.records
            .write()
            .await
            .insert(record.token_hash.clone(), record.clone());
        Ok(())
    }

    async fn exists(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.records.read().await.contains_key(token_hash))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.records.write().await.remove(token_hash).is_some())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let store = MockRevokedTokenStore::new();
        let record = RevokedRefreshRecord::new("h".to_string(), Utc::now() + Duration::days(7));

        store.insert(&record).await.unwrap();
        store.insert(&record).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.exists("h").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired_prunes_only_stale_records() {
        let store = MockRevokedTokenStore::new();
        store
            .insert(&RevokedRefreshRecord::new(
                "live".to_string(),
                Utc::now() + Duration::days(7),
            ))
            .await
            .unwrap();
        store
            .insert(&RevokedRefreshRecord::new(
                "stale".to_string(),
                Utc::now() - Duration::seconds(1),
            ))
            .await
            .unwrap();

        assert_eq!(store.delete_expired().await.unwrap(), 1);
        assert!(store.exists("live").await.unwrap());
        assert!(!store.exists("stale").await.unwrap());
    }
}
