//! Auth event registry.
//!
//! Token operations announce what happened (a pair was issued, a rotation
//! completed, a user was logged out everywhere) to subscribers registered
//! at startup. The registry maps an event-kind tag to an ordered list of
//! subscriber functions and is immutable once built, so dispatch needs no
//! runtime type lookup and no locking.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Events emitted by the token services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A new access/refresh pair was issued at login
    TokenPairIssued { user_id: Uuid },

    /// A refresh token was consumed and a new pair minted
    TokensRotated { user_id: Uuid },

    /// A single access token was revoked
    AccessTokenRevoked { jti: String },

    /// A single refresh token was revoked
    RefreshTokenRevoked { token_hash: String },

    /// Every token of a user was invalidated
    AllUserTokensRevoked { user_id: Uuid },
}

impl AuthEvent {
    /// The tag used to look up subscribers
    pub fn kind(&self) -> AuthEventKind {
        match self {
            Self::TokenPairIssued { .. } => AuthEventKind::TokenPairIssued,
            Self::TokensRotated { .. } => AuthEventKind::TokensRotated,
            Self::AccessTokenRevoked { .. } => AuthEventKind::AccessTokenRevoked,
            Self::RefreshTokenRevoked { .. } => AuthEventKind::RefreshTokenRevoked,
            Self::AllUserTokensRevoked { .. } => AuthEventKind::AllUserTokensRevoked,
        }
    }
}

/// Event-kind tag for subscription lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthEventKind {
    TokenPairIssued,
    TokensRotated,
    AccessTokenRevoked,
    RefreshTokenRevoked,
    AllUserTokensRevoked,
}

/// A subscriber callback invoked on dispatch
pub type AuthEventSubscriber = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Startup-built registry of event subscribers.
///
/// Subscribers for a kind run in subscription order.
#[derive(Default)]
pub struct EventRegistry {
    subscribers: HashMap<AuthEventKind, Vec<AuthEventSubscriber>>,
}

impl EventRegistry {
    /// Start building a registry
    pub fn builder() -> EventRegistryBuilder {
        EventRegistryBuilder {
            subscribers: HashMap::new(),
        }
    }

    /// Deliver an event to every subscriber registered for its kind
    pub fn dispatch(&self, event: &AuthEvent) {
        let Some(subscribers) = self.subscribers.get(&event.kind()) else {
            return;
        };
        debug!(
            "Dispatching {:?} to {} subscriber(s)",
            event.kind(),
            subscribers.len()
        );
        for subscriber in subscribers {
            subscriber(event);
        }
    }

    /// Number of subscribers registered for a kind
    pub fn subscriber_count(&self, kind: AuthEventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .subscribers
            .iter()
            .map(|(kind, subs)| (*kind, subs.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("subscribers", &counts)
            .finish()
    }
}

/// Builder collecting subscriptions before the registry is frozen
pub struct EventRegistryBuilder {
    subscribers: HashMap<AuthEventKind, Vec<AuthEventSubscriber>>,
}

impl EventRegistryBuilder {
    /// Register a subscriber for one event kind
    pub fn subscribe<F>(mut self, kind: AuthEventKind, subscriber: F) -> Self
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Arc::new(subscriber));
        self
    }

    /// Freeze the registry
    pub fn build(self) -> EventRegistry {
        EventRegistry {
            subscribers: self.subscribers,
        }
    }
}
