//! Error types for the mxsend library.
//!
//! This module provides a unified error type with explicit variants for
//! serialization, transport, authentication, request, storage, and input
//! validation errors.

use thiserror::Error;

/// The unified error type for mxsend operations.
///
/// Every variant is terminal for the call that produced it. The only automatic
/// recovery the client performs is the single re-login after a 401.
#[derive(Debug, Error)]
pub enum Error {
    /// A request payload could not be serialized.
    #[error("failed to marshal {what} payload: {source}")]
    Marshal {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Network transport errors (connection, timeout, cancellation).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The homeserver rejected the login.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The homeserver rejected an authenticated request.
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// The session store failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// A success response carried a body that could not be parsed.
    #[error("failed to decode {what} response: {message}")]
    Decode { what: &'static str, message: String },

    /// Input validation errors (homeserver URL, room id, content URI, media kind).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by an auth or request error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth(err) => Some(err.status),
            Error::Request(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The caller cancelled the operation.
    #[error("request cancelled")]
    Cancelled,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// The login call was answered with a failure status.
#[derive(Debug, Error)]
#[error("login rejected with HTTP {status}{}", with_body(.body))]
pub struct AuthError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// An authenticated request was answered with a failure status.
#[derive(Debug, Error)]
#[error("unexpected HTTP {status}{}", with_body(.body))]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl RequestError {
    /// Check if the homeserver rejected the access token.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

fn with_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Session store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be parsed or serialized.
    #[error("malformed session data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Failure reported by a custom store.
    #[error("{0}")]
    Other(String),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid homeserver URL.
    #[error("invalid homeserver URL '{value}': {reason}")]
    HomeserverUrl { value: String, reason: String },

    /// Invalid room id.
    #[error("invalid room id '{value}': {reason}")]
    RoomId { value: String, reason: String },

    /// Invalid content URI.
    #[error("invalid content URI '{value}': {reason}")]
    ContentUri { value: String, reason: String },

    /// Unknown media kind.
    #[error("unknown media type '{value}' (expected file, image, audio or video)")]
    MediaType { value: String },

    /// Content type that cannot be sent as a header value.
    #[error("invalid content type '{value}'")]
    ContentType { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_includes_status_and_body() {
        let err = Error::from(RequestError {
            status: 403,
            body: r#"{"errcode":"M_FORBIDDEN"}"#.to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("M_FORBIDDEN"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn auth_error_without_body() {
        let err = AuthError {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "login rejected with HTTP 503");
    }

    #[test]
    fn storage_error_has_no_status() {
        let err = Error::from(StorageError::Other("disk full".to_string()));
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("disk full"));
    }
}
