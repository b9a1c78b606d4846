//! Integration tests for the Redis cache client
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p th_infra --test redis_integration -- --ignored

use th_core::repositories::KeyValueCache;
use th_infra::cache::RedisClient;
use th_shared::config::CacheConfig;

fn test_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(test_config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_and_expiry_metadata() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let key = "test:token:set-get";

    client.set_with_expiry(key, "owner-1", 60).await.unwrap();
    assert_eq!(
        RedisClient::get(&client, key).await.unwrap(),
        Some("owner-1".to_string())
    );

    RedisClient::delete(&client, key).await.unwrap();
    assert_eq!(RedisClient::get(&client, key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_delete_reports_prior_existence_exactly_once() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let key = "test:token:atomic-delete";

    client.set_with_expiry(key, "owner-1", 60).await.unwrap();

    // The single-use guarantee of rotation rests on DEL's return value
    assert!(RedisClient::delete(&client, key).await.unwrap());
    assert!(!RedisClient::delete(&client, key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_scan_matches_key_family() {
    let client = RedisClient::new(test_config()).await.unwrap();

    client
        .set_with_expiry("test:scan:refresh:aaa", "u1", 60)
        .await
        .unwrap();
    client
        .set_with_expiry("test:scan:refresh:bbb", "u2", 60)
        .await
        .unwrap();
    client
        .set_with_expiry("test:scan:revoked:ccc", "1", 60)
        .await
        .unwrap();

    let mut keys = RedisClient::scan_keys(&client, "test:scan:refresh:*")
        .await
        .unwrap();
    keys.sort();
    assert_eq!(keys, vec!["test:scan:refresh:aaa", "test:scan:refresh:bbb"]);

    for key in [
        "test:scan:refresh:aaa",
        "test:scan:refresh:bbb",
        "test:scan:revoked:ccc",
    ] {
        RedisClient::delete(&client, key).await.unwrap();
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_client_satisfies_cache_contract() {
    let client = RedisClient::new(test_config()).await.unwrap();
    let cache: &dyn KeyValueCache = &client;
    let key = "test:token:contract";

    cache.set(key, "owner-1", 60).await.unwrap();
    assert!(cache.exists(key).await.unwrap());
    assert_eq!(cache.get(key).await.unwrap(), Some("owner-1".to_string()));
    assert!(cache.delete(key).await.unwrap());
    assert!(!cache.exists(key).await.unwrap());
}
