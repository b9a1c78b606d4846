//! Business services containing domain logic and use cases.

pub mod events;
pub mod token;

// Re-export commonly used types
pub use events::{AuthEvent, AuthEventKind, EventRegistry, EventRegistryBuilder};
pub use token::{
    CleanupResult, KeyProvider, KeySnapshot, RefreshTokenStore, RevocationCleanupConfig,
    RevocationCleanupService, RevocationRegistry, RotationCoordinator, TokenIssuer, TokenService,
    TokenServiceConfig, TokenValidator,
};
