//! The authenticated homeserver client.
//!
//! [`Client`] owns the credentials, the HTTP transport and the cached access
//! token. Request building reads the token under a shared lock; logging in
//! takes the exclusive lock for the whole round trip, so at most one login is
//! in flight per client and concurrent callers that hit a 401 with the same
//! stale token share one re-login.

mod authenticator;
mod endpoints;
mod executor;
mod operations;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::auth::{AccessToken, Credentials};
use crate::error::{Error, TransportError};
use crate::session::SessionStore;
use crate::types::HomeserverUrl;

/// Upper bound on every homeserver call made with the default transport,
/// and on every login call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Options for building a [`Client`].
#[derive(Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    session_store: Option<Arc<dyn SessionStore>>,
    http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Configuration with no session store and the default transport.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            session_store: None,
            http_client: None,
        }
    }

    /// Load the session from, and persist new sessions to, `store`.
    pub fn with_session_store<S: SessionStore + 'static>(mut self, store: Arc<S>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Use a custom HTTP transport. Its own timeout applies to sends and
    /// uploads; logins are still capped at [`REQUEST_TIMEOUT`].
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("session_store", &self.session_store.is_some())
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

/// A logged-in connection to a homeserver.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks and threads. All clones share one token.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use mxsend::{Client, ClientConfig, Credentials, FileSessionStore, HomeserverUrl};
///
/// # async fn example() -> Result<(), mxsend::Error> {
/// let server = HomeserverUrl::new("https://matrix.example.org")?;
/// let config = ClientConfig::new(Credentials::new(server, "alice", "password"))
///     .with_session_store(Arc::new(FileSessionStore::new("session.json")));
///
/// // Logs in only if session.json holds no token yet.
/// let client = Client::new(config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    credentials: Credentials,
    http: reqwest::Client,
    token: RwLock<AccessToken>,
    store: Option<Arc<dyn SessionStore>>,
}

impl Client {
    /// Build a client, restoring the stored session if there is one and
    /// logging in otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails, or if a login is needed
    /// and it fails.
    #[instrument(skip(config), fields(server = %config.credentials.server(), user = %config.credentials.user()))]
    pub async fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = match config.http_client {
            Some(http) => http,
            None => default_http_client()?,
        };

        let mut token = AccessToken::default();
        if let Some(store) = &config.session_store {
            let session = store.get().await?;
            if session.is_authenticated() {
                debug!("Restored stored session");
                token = session.access_token;
            }
        }

        let needs_login = token.is_empty();
        let client = Self {
            inner: Arc::new(ClientInner {
                credentials: config.credentials,
                http,
                token: RwLock::new(token),
                store: config.session_store,
            }),
        };

        if needs_login {
            client.refresh_if_stale(&AccessToken::default()).await?;
        }

        Ok(client)
    }

    /// Log in with `credentials`, without a session store.
    pub async fn login(credentials: Credentials) -> Result<Self, Error> {
        Self::new(ClientConfig::new(credentials)).await
    }

    /// Returns the homeserver this client talks to.
    pub fn server(&self) -> &HomeserverUrl {
        self.inner.credentials.server()
    }

    /// Returns the user this client logs in as.
    pub fn user(&self) -> &str {
        self.inner.credentials.user()
    }

    /// Returns a snapshot of the token currently in use.
    pub async fn access_token(&self) -> AccessToken {
        self.inner.token.read().await.clone()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("server", self.server())
            .field("user", &self.user())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

fn default_http_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .user_agent(concat!("mxsend/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::Transport(TransportError::from(e)))
}

/// Run `operation` until it finishes or `signal` fires, whichever is first.
///
/// A fired signal drops the in-flight request and yields
/// [`TransportError::Cancelled`]. If the signal interrupts a login, the
/// token is left as it was.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: mxsend::Client, room: mxsend::RoomId) {
/// let deadline = tokio::time::sleep(std::time::Duration::from_secs(5));
/// let result = mxsend::with_cancellation(deadline, client.send_text(&room, "hi")).await;
/// # }
/// ```
pub async fn with_cancellation<T, S, F>(signal: S, operation: F) -> Result<T, Error>
where
    S: Future<Output = ()>,
    F: Future<Output = Result<T, Error>>,
{
    tokio::select! {
        biased;
        result = operation => result,
        () = signal => Err(TransportError::Cancelled.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    fn credentials() -> Credentials {
        let server = HomeserverUrl::new("https://matrix.example.org").unwrap();
        Credentials::new(server, "alice", "secret")
    }

    #[test]
    fn config_debug_hides_password() {
        let config = ClientConfig::new(credentials())
            .with_session_store(Arc::new(InMemorySessionStore::new()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("session_store: true"));
    }

    #[tokio::test]
    async fn cancellation_wins_over_pending_operation() {
        let result: Result<(), Error> =
            with_cancellation(async {}, std::future::pending()).await;
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn finished_operation_is_returned() {
        let result = with_cancellation(std::future::pending(), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
