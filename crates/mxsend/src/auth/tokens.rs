//! Access token type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token for authenticated homeserver requests.
///
/// The empty token means "not logged in"; it is what a never-written
/// session store hands back.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or persisting a session.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no token has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.debug_tuple("AccessToken").field(&"").finish()
        } else {
            f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
        }
    }
}
