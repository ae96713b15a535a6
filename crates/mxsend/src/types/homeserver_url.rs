//! Homeserver URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated homeserver base URL.
///
/// Both `https` and `http` are accepted for any host. Plain HTTP to a
/// non-loopback host logs a warning.
///
/// # Example
///
/// ```
/// use mxsend::HomeserverUrl;
///
/// let server = HomeserverUrl::new("https://matrix.example.org/").unwrap();
/// assert_eq!(
///     server.endpoint("/_matrix/client/v3/login"),
///     "https://matrix.example.org/_matrix/client/v3/login"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HomeserverUrl(Url);

impl HomeserverUrl {
    /// Create a new homeserver URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::HomeserverUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL of an API path on this homeserver.
    ///
    /// `path` is expected to start with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        // Url always renders an empty root path as "/"
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::HomeserverUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let Some(host) = url.host_str() else {
            return Err(InvalidInputError::HomeserverUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        };

        match url.scheme() {
            "https" => {}
            "http" => {
                let is_loopback = match url.host() {
                    Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
                    Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
                    _ => host == "localhost",
                };
                if !is_loopback {
                    warn!(%host, "Homeserver uses plain HTTP");
                }
            }
            _ => {
                return Err(InvalidInputError::HomeserverUrl {
                    value: original.to_string(),
                    reason: "scheme must be http or https".to_string(),
                }
                .into());
            }
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::HomeserverUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for HomeserverUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HomeserverUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for HomeserverUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for HomeserverUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HomeserverUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for HomeserverUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let server = HomeserverUrl::new("https://matrix.org").unwrap();
        assert_eq!(server.host(), Some("matrix.org"));
    }

    #[test]
    fn valid_localhost_http() {
        let server = HomeserverUrl::new("http://localhost:8008").unwrap();
        assert_eq!(server.host(), Some("localhost"));
        let server = HomeserverUrl::new("http://127.0.0.1:8008").unwrap();
        assert_eq!(server.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_construction() {
        let server = HomeserverUrl::new("https://matrix.org").unwrap();
        assert_eq!(
            server.endpoint("/_matrix/media/v3/upload"),
            "https://matrix.org/_matrix/media/v3/upload"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let server = HomeserverUrl::new("https://example.org/matrix/").unwrap();
        assert_eq!(
            server.endpoint("/_matrix/client/v3/login"),
            "https://example.org/matrix/_matrix/client/v3/login"
        );
    }

    #[test]
    fn valid_plain_http_any_host() {
        for s in [
            "http://synapse:8008",
            "http://192.168.1.10:8008",
            "http://127.0.0.2:8008",
            "http://matrix.org",
        ] {
            let server = HomeserverUrl::new(s).unwrap();
            assert_eq!(server.endpoint("/x"), format!("{}/x", s));
        }
    }

    #[test]
    fn invalid_relative_url() {
        assert!(HomeserverUrl::new("/_matrix/client").is_err());
    }

    #[test]
    fn invalid_query() {
        assert!(HomeserverUrl::new("https://matrix.org/?x=1").is_err());
    }

    #[test]
    fn invalid_scheme() {
        assert!(HomeserverUrl::new("file:///tmp/server").is_err());
    }
}
