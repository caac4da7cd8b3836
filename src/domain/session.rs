use serde::{Deserialize, Serialize};

use crate::domain::errors::StorageError;

// Session record kept in durable client storage across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: Option<String>,
    // Kept next to the token so settings can show the account without a round-trip.
    #[serde(default)]
    pub email: Option<String>,
}

// Two-state authentication model; derived only from token presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Anonymous,
    Authenticated,
}

// Port for durable key-value storage of the session.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, StorageError>;
    fn save(&self, session: &StoredSession) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}
