//! Content URI type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

const SCHEME: &str = "mxc://";

/// An `mxc://` locator for media stored on a homeserver.
///
/// Returned by [`Client::upload_file`](crate::Client::upload_file) and
/// referenced by media messages.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentUri(String);

impl ContentUri {
    /// Create a new content URI from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an `mxc://` URI.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        match s.strip_prefix(SCHEME) {
            Some(rest) if !rest.is_empty() => Ok(Self(s)),
            Some(_) => Err(InvalidInputError::ContentUri {
                value: s,
                reason: "must not be empty after 'mxc://'".to_string(),
            }
            .into()),
            None => Err(InvalidInputError::ContentUri {
                value: s,
                reason: "must start with 'mxc://'".to_string(),
            }
            .into()),
        }
    }

    /// Returns the full URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContentUri {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentUri> for String {
    fn from(uri: ContentUri) -> Self {
        uri.0
    }
}

impl AsRef<str> for ContentUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
