//! In-memory session store.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Session, SessionStore};
use crate::error::StorageError;

/// A single-slot session holder that lives as long as the process.
///
/// Always succeeds. [`get`](SessionStore::get) returns the default session
/// until something has been set.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Session>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Session> {
        // A panic while holding the guard cannot leave a Session half-written.
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, session: &Session) -> Result<(), StorageError> {
        *self.slot() = session.clone();
        Ok(())
    }

    async fn get(&self) -> Result<Session, StorageError> {
        Ok(self.slot().clone())
    }
}
