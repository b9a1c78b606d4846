//! In-memory implementation of KeyValueCache for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::KeyValueCache;

/// In-memory cache with per-entry expiry.
///
/// Entries expire lazily on access. `delete` removes under a single write
/// lock, which makes it the same atomic check-and-delete the real cache
/// provides. The `set_available` switch simulates an outage: every
/// operation then fails with a transient error.
pub struct MockKeyValueCache {
    entries: Arc<RwLock<HashMap<String, (String, DateTime<Utc>)>>>,
    available: AtomicBool,
}

impl MockKeyValueCache {
    /// Create a new empty mock cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle simulated availability of the backing store
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Insert an entry directly, bypassing the trait (test setup helper)
    pub async fn insert_raw(&self, key: &str, value: &str, ttl_seconds: u64) {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), expires_at));
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::transient("mock cache unavailable"))
        }
    }

    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        }
    }
}

impl Default for MockKeyValueCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCache for MockKeyValueCache {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available()?;
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(value, _)| value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some((_, expires_at)) => Ok(expires_at > Utc::now()),
            None => Ok(false),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        self.check_available()?;
        let now = Utc::now();
        let entries = self.entries.read().await;

        let mut keys = Vec::new();
        for (key, (_, expires_at)) in entries.iter() {
            if *expires_at > now && Self::matches(pattern, key) {
                keys.push(key.clone());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MockKeyValueCache::new();

        cache.set("k", "v", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert!(cache.exists("k").await.unwrap());

        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible() {
        let cache = MockKeyValueCache::new();
        cache.insert_raw("k", "v", 0).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_scan_with_trailing_wildcard() {
        let cache = MockKeyValueCache::new();
        cache.set("refresh:a", "1", 60).await.unwrap();
        cache.set("refresh:b", "2", 60).await.unwrap();
        cache.set("revoked:c", "3", 60).await.unwrap();

        let mut keys = cache.scan_keys("refresh:*").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["refresh:a".to_string(), "refresh:b".to_string()]);
    }

    #[tokio::test]
    async fn test_unavailable_cache_reports_transient() {
        let cache = MockKeyValueCache::new();
        cache.set_available(false);

        let err = cache.set("k", "v", 60).await.unwrap_err();
        assert!(err.is_transient());
        assert!(cache.get("k").await.is_err());
    }
}
