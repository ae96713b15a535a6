//! Session persistence.
//!
//! A [`Session`] is the result of one successful login. The client keeps the
//! live token in memory and writes every new session through a
//! [`SessionStore`], so a later process can pick it up without logging in
//! again.

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::AccessToken;
use crate::error::StorageError;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

/// The outcome of a login: an access token and the device it was issued to.
///
/// The default value (empty token, no device) stands for "no session".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: AccessToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl Session {
    /// Create a session from a token and an optional device id.
    pub fn new(access_token: AccessToken, device_id: Option<String>) -> Self {
        Self {
            access_token,
            device_id,
        }
    }

    /// Returns true if this session carries a usable token.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Persistent storage for the current session.
///
/// The client reads the store once during construction and writes to it
/// only while holding its exclusive token lock, so implementations see a
/// single writer at a time.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Replace the stored session.
    async fn set(&self, session: &Session) -> Result<(), StorageError>;

    /// Load the stored session, or the default session if none was stored.
    async fn get(&self) -> Result<Session, StorageError>;
}
