//! User identity snapshot as seen by the token services.
//!
//! The token core only reads users; account management lives elsewhere.
//! Email, name, and last-login are nullable because legacy records may
//! predate those columns, and tokens must never be issued for such users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, if the record is complete
    pub email: Option<String>,

    /// Display name, if the record is complete
    pub name: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login: Option<DateTime<Utc>>,

    /// Whether the user account is active
    pub is_active: bool,
}

impl User {
    /// Creates a new User instance with a fresh login timestamp
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: Some(email.into()),
            name: Some(name.into()),
            created_at: now,
            last_login: Some(now),
            is_active: true,
        }
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login = Some(Utc::now());
        self.is_active = true;
    }

    /// Marks the user as logged out
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// The identity fields required for token issuance, or `None` when any
    /// of them is missing.
    pub fn identity_parts(&self) -> Option<(&str, &str, DateTime<Utc>)> {
        match (&self.email, &self.name, self.last_login) {
            (Some(email), Some(name), Some(last_login)) => {
                Some((email.as_str(), name.as_str(), last_login))
            }
            _ => None,
        }
    }
}
