//! Homeserver endpoint paths and wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Password login.
pub const LOGIN: &str = "/_matrix/client/v3/login";

/// Prefix for room-scoped endpoints.
pub const ROOMS: &str = "/_matrix/client/v3/rooms";

/// Media upload.
pub const UPLOAD: &str = "/_matrix/media/v3/upload";

/// Event type of every message this client sends.
pub const ROOM_MESSAGE: &str = "m.room.message";

/// Login type for user/password authentication.
pub const LOGIN_TYPE_PASSWORD: &str = "m.login.password";

/// Path of a message send with the given transaction id.
pub fn send_message_path(room: &str, txn_id: &str) -> String {
    format!("{}/{}/send/{}/{}", ROOMS, room, ROOM_MESSAGE, txn_id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "type")]
    pub login_type: &'static str,
    pub user: &'a str,
    pub password: &'a str,
}

/// Response from a message send.
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub event_id: String,
}

/// Response from media upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub content_uri: String,
}
