//! Shared fixtures for token service tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::repositories::{MockKeyValueCache, MockRevokedTokenStore, MockUserDirectory};
use crate::services::events::EventRegistry;
use crate::services::token::{KeyProvider, TokenService, TokenServiceConfig};

pub(crate) const TEST_SECRET: &str = "unit-test-signing-secret";

pub(crate) struct TestHarness {
    pub service: TokenService<MockKeyValueCache, MockUserDirectory, MockRevokedTokenStore>,
    pub cache: Arc<MockKeyValueCache>,
    pub directory: Arc<MockUserDirectory>,
    pub durable: Arc<MockRevokedTokenStore>,
    pub keys: Arc<KeyProvider>,
}

pub(crate) fn harness() -> TestHarness {
    harness_with_events(Arc::new(EventRegistry::default()))
}

pub(crate) fn harness_with_events(events: Arc<EventRegistry>) -> TestHarness {
    let cache = Arc::new(MockKeyValueCache::new());
    let directory = Arc::new(MockUserDirectory::new());
    let durable = Arc::new(MockRevokedTokenStore::new());
    let keys = Arc::new(KeyProvider::from_secret(TEST_SECRET).expect("test key material"));

    let service = TokenService::new(
        cache.clone(),
        directory.clone(),
        durable.clone(),
        keys.clone(),
        TokenServiceConfig::default(),
        events,
    );

    TestHarness {
        service,
        cache,
        directory,
        durable,
        keys,
    }
}

/// Register a user whose session started a little while ago, so a
/// revocation cutover taken "now" is strictly newer than `auth_time`.
pub(crate) async fn register_user(directory: &MockUserDirectory) -> Uuid {
    register_user_logged_in_at(directory, Utc::now() - Duration::seconds(10)).await
}

pub(crate) async fn register_user_logged_in_at(
    directory: &MockUserDirectory,
    last_login: chrono::DateTime<Utc>,
) -> Uuid {
    let mut user = User::new("user@example.com", "Sample User");
    user.last_login = Some(last_login);
    directory.insert(user).await
}

/// Sign arbitrary claims with the test secret (for crafting expired or
/// otherwise unusual tokens).
pub(crate) fn encode_claims(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("claims encode")
}

pub(crate) fn encode_claims_with_secret(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("claims encode")
}

pub(crate) fn sample_claims(user_id: Uuid) -> Claims {
    Claims::new_access_token(
        user_id,
        "user@example.com",
        "Sample User",
        Utc::now().timestamp() - 10,
        "taskhandler",
        "taskhandler-api",
        Duration::minutes(60),
    )
}
