//! Credential gate at the stream boundary.
//!
//! Before a stream is opened, a bearer credential must be present in the
//! session store; absence is a precondition failure and no network call is
//! made. When the server rejects the credential, the gate clears the stored
//! session and signals the embedding application to route back to
//! authentication.

use std::sync::Arc;

use crate::error::AuthError;
use crate::traits::{SessionStore, ACCESS_TOKEN_KEY, USERNAME_KEY};

/// Signal raised toward the embedding application when the session is
/// invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// The stored session was cleared; route the user to re-authentication.
    Reauthenticate,
}

/// Gate over the injected session store.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
}

impl SessionGate {
    /// Create a gate over a session store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Check the precondition for opening a stream.
    ///
    /// Returns the bearer token, or `AuthError::NotAuthenticated` if none
    /// is stored.
    pub fn authorize(&self) -> Result<String, AuthError> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// The signed-in user's display name, if stored.
    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY)
    }

    /// Clear the stored credential and display name after the server
    /// rejected the session.
    pub fn invalidate(&self) -> GateSignal {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(USERNAME_KEY);
        tracing::info!("session invalidated; credential cleared");
        GateSignal::Reauthenticate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemorySessionStore;

    #[test]
    fn test_authorize_without_token_fails() {
        let gate = SessionGate::new(Arc::new(InMemorySessionStore::new()));
        assert_eq!(gate.authorize(), Err(AuthError::NotAuthenticated));
    }

    #[test]
    fn test_authorize_returns_token() {
        let store = Arc::new(InMemorySessionStore::with_entries([(
            ACCESS_TOKEN_KEY,
            "tok-42",
        )]));
        let gate = SessionGate::new(store);
        assert_eq!(gate.authorize().as_deref(), Ok("tok-42"));
    }

    #[test]
    fn test_username_passthrough() {
        let store = Arc::new(InMemorySessionStore::with_entries([(USERNAME_KEY, "ada")]));
        let gate = SessionGate::new(store);
        assert_eq!(gate.username().as_deref(), Some("ada"));
    }

    #[test]
    fn test_invalidate_clears_session() {
        let store = Arc::new(InMemorySessionStore::with_entries([
            (ACCESS_TOKEN_KEY, "tok"),
            (USERNAME_KEY, "ada"),
        ]));
        let gate = SessionGate::new(store.clone());

        let signal = gate.invalidate();
        assert_eq!(signal, GateSignal::Reauthenticate);
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(USERNAME_KEY).is_none());
        assert_eq!(gate.authorize(), Err(AuthError::NotAuthenticated));
    }
}
