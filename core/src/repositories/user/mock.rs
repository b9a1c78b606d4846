//! Mock implementation of UserDirectory for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserDirectory;

/// Mock user directory for testing
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserDirectory {
    /// Create a new empty mock directory
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a user, returning its id
    pub async fn insert(&self, user: User) -> Uuid {
        let id = user.id;
        self.users.write().await.insert(id, user);
        id
    }

    /// Overwrite a user's last-login timestamp (simulates a fresh login)
    pub async fn set_last_login(&self, id: Uuid, last_login: DateTime<Utc>) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.last_login = Some(last_login);
        }
    }

    /// Remove a user entirely (simulates account deletion)
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }
}
