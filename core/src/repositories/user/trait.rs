//! User directory trait resolving user ids to identity snapshots.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Read-only directory of user identity snapshots.
///
/// The token core never writes users; account management owns that. The
/// snapshot's `last_login` drives the `auth_time` claim, which is why the
/// directory is consulted on every issuance rather than cached.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Lookup failed
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}
