//! mxsend - Matrix sending client
//!
//! This library provides an authenticated client for a Matrix homeserver that
//! can send text and media messages and upload media. All operations flow
//! through a [`Client`], which caches the access token, persists it through a
//! pluggable [`SessionStore`], and logs in again when the homeserver rejects a
//! stale token.
//!
//! # Example
//!
//! ```no_run
//! use mxsend::{Client, Credentials, HomeserverUrl, Media, MediaType, RoomId};
//!
//! # async fn example() -> Result<(), mxsend::Error> {
//! let server = HomeserverUrl::new("https://matrix.example.org")?;
//! let client = Client::login(Credentials::new(server, "alice", "password")).await?;
//!
//! let room = RoomId::new("!abcdef:example.org")?;
//! client.send_text(&room, "hello").await?;
//!
//! let uri = client.upload_file("image/png", std::fs::read("cat.png").unwrap()).await?;
//! client
//!     .send_media(&room, &Media::new(MediaType::Image, uri).with_caption("cat"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod message;
pub mod session;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Credentials};
pub use client::{Client, ClientConfig, with_cancellation};
pub use error::Error;
pub use message::{Media, MediaType};
pub use session::{FileSessionStore, InMemorySessionStore, Session, SessionStore};
pub use types::{ContentUri, HomeserverUrl, RoomId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
