//! Login credentials type.

use std::fmt;

use crate::types::HomeserverUrl;

/// Password login credentials for a homeserver.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use mxsend::{Credentials, HomeserverUrl};
///
/// let server = HomeserverUrl::new("https://matrix.example.org").unwrap();
/// let creds = Credentials::new(server, "alice", "hunter2");
/// assert_eq!(creds.user(), "alice");
/// ```
#[derive(Clone)]
pub struct Credentials {
    server: HomeserverUrl,
    user: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `server` - The homeserver to log in to
    /// * `user` - A user id (`@alice:example.org`) or bare localpart
    /// * `password` - The account password
    pub fn new(server: HomeserverUrl, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server,
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the homeserver these credentials belong to.
    pub fn server(&self) -> &HomeserverUrl {
        &self.server
    }

    /// Returns the user identifier.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password.
    ///
    /// Use this only when constructing the login request.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
