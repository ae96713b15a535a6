//! Room identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated Matrix room id, such as `!abcdef:example.org`.
///
/// The id is placed into request paths as-is, so characters that would
/// change the meaning of the path are rejected.
///
/// # Example
///
/// ```
/// use mxsend::RoomId;
///
/// let room = RoomId::new("!abcdef:example.org").unwrap();
/// assert_eq!(room.server_name(), Some("example.org"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Create a new room id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid room id.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the server name part, if the id carries one.
    pub fn server_name(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, server)| server)
    }

    /// Returns the full room id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let Some(localpart) = s.strip_prefix('!') else {
            return Err(InvalidInputError::RoomId {
                value: s.to_string(),
                reason: "must start with '!'".to_string(),
            }
            .into());
        };

        if localpart.is_empty() {
            return Err(InvalidInputError::RoomId {
                value: s.to_string(),
                reason: "must not be empty after '!'".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
        {
            return Err(InvalidInputError::RoomId {
                value: s.to_string(),
                reason: format!("contains forbidden character {:?}", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoomId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RoomId> for String {
    fn from(room: RoomId) -> Self {
        room.0
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_room_id() {
        let room = RoomId::new("!abc:x").unwrap();
        assert_eq!(room.as_str(), "!abc:x");
        assert_eq!(room.server_name(), Some("x"));
    }

    #[test]
    fn valid_room_id_without_server() {
        let room = RoomId::new("!31hneApxJ_1o-63DmFrpeqnkFfWppnzWso1JvH3ogLM").unwrap();
        assert_eq!(room.server_name(), None);
    }

    #[test]
    fn invalid_alias() {
        assert!(RoomId::new("#room:example.org").is_err());
    }

    #[test]
    fn invalid_empty() {
        assert!(RoomId::new("!").is_err());
        assert!(RoomId::new("").is_err());
    }

    #[test]
    fn invalid_path_characters() {
        assert!(RoomId::new("!abc/../x:y").is_err());
        assert!(RoomId::new("!abc?x=1").is_err());
        assert!(RoomId::new("!abc def:x").is_err());
        assert!(RoomId::new("!abc%2F..:x").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let room: RoomId = serde_json::from_str(r#""!abc:x""#).unwrap();
        assert_eq!(room.as_str(), "!abc:x");
        assert!(serde_json::from_str::<RoomId>(r#""abc""#).is_err());
    }
}
