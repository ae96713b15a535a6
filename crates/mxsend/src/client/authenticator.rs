//! Password login and token installation.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};

use super::endpoints::{LOGIN, LOGIN_TYPE_PASSWORD, LoginRequest};
use super::{Client, REQUEST_TIMEOUT};
use crate::auth::AccessToken;
use crate::error::{AuthError, Error};
use crate::session::Session;

impl Client {
    /// Log in again unless someone already replaced `previous`.
    ///
    /// `previous` is the token the caller last saw in use. If the cached
    /// token differs from it, another caller has already logged in and this
    /// returns immediately. Otherwise a password login is performed while
    /// holding the exclusive token lock, the new token is installed and the
    /// session is written to the store.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] if the homeserver rejects the login; the cached
    ///   token is left unchanged.
    /// - [`Error::Storage`] if persisting the new session fails; the new
    ///   token is already in use at that point.
    #[instrument(skip(self, previous), fields(user = %self.inner.credentials.user()))]
    pub async fn refresh_if_stale(&self, previous: &AccessToken) -> Result<(), Error> {
        let mut token = self.inner.token.write().await;

        if *token != *previous {
            debug!("Token already replaced by a concurrent login");
            return Ok(());
        }

        info!("Logging in");

        let credentials = &self.inner.credentials;
        let request = LoginRequest {
            login_type: LOGIN_TYPE_PASSWORD,
            user: credentials.user(),
            password: credentials.password(),
        };
        let payload = serde_json::to_vec(&request).map_err(|source| Error::Marshal {
            what: "login",
            source,
        })?;

        let response = self
            .inner
            .http
            .post(credentials.server().endpoint(LOGIN))
            .timeout(REQUEST_TIMEOUT)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.bytes().await?;
        let session: Session = serde_json::from_slice(&body).map_err(|e| Error::Decode {
            what: "login",
            message: e.to_string(),
        })?;

        if !session.is_authenticated() {
            return Err(Error::Decode {
                what: "login",
                message: "empty access_token".to_string(),
            });
        }

        *token = session.access_token.clone();
        debug!(device_id = ?session.device_id, "Logged in");

        if let Some(store) = &self.inner.store {
            store.set(&session).await?;
        }

        Ok(())
    }
}
