//! MySQL repository implementations

pub mod revoked_token_repository_impl;

pub use revoked_token_repository_impl::MySqlRevokedTokenStore;
