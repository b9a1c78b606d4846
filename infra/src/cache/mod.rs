//! Redis cache client and its key/value cache adapter.

pub mod kv_adapter;
pub mod redis_client;

pub use redis_client::RedisClient;
