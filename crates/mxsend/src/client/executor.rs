//! Authenticated request execution with a single re-login retry.

use reqwest::header::HeaderMap;
use reqwest::{Method, Response, StatusCode};
use tracing::{info, instrument, trace};

use super::Client;
use crate::error::{Error, RequestError};

/// One attempt plus one retry after a re-login.
const MAX_ATTEMPTS: u32 = 2;

/// A fully built homeserver request, replayable as-is.
#[derive(Debug, Clone)]
pub(crate) struct AuthedRequest {
    pub method: Method,
    pub path: String,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl AuthedRequest {
    pub(crate) fn new(method: Method, path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            headers: HeaderMap::new(),
        }
    }

    pub(crate) fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

impl Client {
    /// Send `request` with the current bearer token.
    ///
    /// When the homeserver answers 401 and `allow_auth_retry` is set, logs in
    /// again (or adopts a token another caller just obtained) and sends the
    /// identical request once more. A second 401 is final.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] on connection failures and timeouts, never retried.
    /// - [`Error::Request`] with the status and body of the last response.
    /// - Any error of [`Client::refresh_if_stale`] raised by the re-login.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub(crate) async fn execute(
        &self,
        request: &AuthedRequest,
        allow_auth_retry: bool,
    ) -> Result<Response, Error> {
        let url = self.server().endpoint(&request.path);
        let max_attempts = if allow_auth_retry { MAX_ATTEMPTS } else { 1 };
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.access_token().await;
            trace!(attempt, "Sending request");

            let response = self
                .inner
                .http
                .request(request.method.clone(), &url)
                .bearer_auth(token.as_str())
                .headers(request.headers.clone())
                .body(request.body.clone())
                .send()
                .await?;

            let status = response.status();
            trace!(%status, "Response received");

            if status.as_u16() < 400 {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && attempt < max_attempts {
                info!("Access token rejected, logging in again");
                self.refresh_if_stale(&token).await?;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(RequestError {
                status: status.as_u16(),
                body,
            }
            .into());
        }
    }
}
