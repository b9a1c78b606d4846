//! KeyValueCache adapter for the Redis client.
//!
//! Bridges the core's cache contract onto [`RedisClient`]; Redis errors
//! surface to the domain layer as transient failures.

use async_trait::async_trait;

use th_core::errors::DomainError;
use th_core::repositories::KeyValueCache;

use super::redis_client::RedisClient;

#[async_trait]
impl KeyValueCache for RedisClient {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(Into::into)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        RedisClient::get(self, key).await.map_err(Into::into)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        RedisClient::delete(self, key).await.map_err(Into::into)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        RedisClient::exists(self, key).await.map_err(Into::into)
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, DomainError> {
        RedisClient::scan_keys(self, pattern)
            .await
            .map_err(Into::into)
    }
}
