use std::sync::{Arc, RwLock};

use crate::domain::{AccessState, StorageError, StoredSession, TokenStorage};

// Process-wide authentication state, passed explicitly to everything that needs it.
// The token is opaque: it is never parsed or checked for expiry.
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    state: RwLock<StoredSession>,
}

impl SessionStore {
    // Load whatever the durable storage holds; an empty store means Anonymous.
    pub fn init(storage: Arc<dyn TokenStorage>) -> Result<Self, StorageError> {
        let stored = storage.load()?.unwrap_or_default();
        tracing::debug!(authenticated = stored.token.is_some(), "session loaded");
        Ok(Self {
            storage,
            state: RwLock::new(stored),
        })
    }

    // Durable storage is written before memory changes.
    pub fn login(&self, token: impl Into<String>, email: Option<String>) -> Result<(), StorageError> {
        let session = StoredSession {
            token: Some(token.into()),
            email,
        };
        self.storage.save(&session)?;
        *self.write_state() = session;
        tracing::info!("session started");
        Ok(())
    }

    // Memory is cleared even if the durable clear fails.
    pub fn logout(&self) -> Result<(), StorageError> {
        *self.write_state() = StoredSession::default();
        self.storage.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.read_state().token.clone()
    }

    pub fn email(&self) -> Option<String> {
        self.read_state().email.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().token.is_some()
    }

    pub fn access_state(&self) -> AccessState {
        if self.is_authenticated() {
            AccessState::Authenticated
        } else {
            AccessState::Anonymous
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, StoredSession> {
        // A poisoned lock still holds a consistent StoredSession value.
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, StoredSession> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
