//! Validated Matrix identifiers.
//!
//! These types enforce their format at construction time, so a value that
//! reaches a request path or payload is already known to be well formed.

mod content_uri;
mod homeserver_url;
mod room_id;

pub use content_uri::ContentUri;
pub use homeserver_url::HomeserverUrl;
pub use room_id::RoomId;
