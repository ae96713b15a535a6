//! Message kinds and outbound `m.room.message` payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::types::ContentUri;

const MSGTYPE_TEXT: &str = "m.text";
const FORMAT_HTML: &str = "org.matrix.custom.html";

/// The kind of a media message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "m.file")]
    File,
    #[serde(rename = "m.image")]
    Image,
    #[serde(rename = "m.audio")]
    Audio,
    #[serde(rename = "m.video")]
    Video,
}

impl MediaType {
    /// Returns the `msgtype` value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::File => "m.file",
            MediaType::Image => "m.image",
            MediaType::Audio => "m.audio",
            MediaType::Video => "m.video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both the wire form (`m.image`) and the short form (`image`).
impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("m.").unwrap_or(s) {
            "file" => Ok(MediaType::File),
            "image" => Ok(MediaType::Image),
            "audio" => Ok(MediaType::Audio),
            "video" => Ok(MediaType::Video),
            _ => Err(InvalidInputError::MediaType {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A media message referencing previously uploaded content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub kind: MediaType,
    pub caption: Option<String>,
    pub filename: Option<String>,
    pub uri: ContentUri,
}

impl Media {
    /// Create a media message without caption or filename.
    pub fn new(kind: MediaType, uri: ContentUri) -> Self {
        Self {
            kind,
            caption: None,
            filename: None,
            uri,
        }
    }

    /// Set the caption, sent as the message body.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the original filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Body of an `m.room.message` event. Empty fields are left out.
#[derive(Debug, Serialize)]
pub(crate) struct MessageContent<'a> {
    msgtype: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> MessageContent<'a> {
    pub(crate) fn text(body: &'a str) -> Self {
        Self {
            msgtype: MSGTYPE_TEXT,
            body: non_empty(body),
            format: None,
            formatted_body: None,
            filename: None,
            url: None,
        }
    }

    pub(crate) fn html(body: &'a str, html: &'a str) -> Self {
        let formatted_body = non_empty(html);
        Self {
            format: formatted_body.map(|_| FORMAT_HTML),
            formatted_body,
            ..Self::text(body)
        }
    }

    pub(crate) fn media(media: &'a Media) -> Self {
        Self {
            msgtype: media.kind.as_str(),
            body: media.caption.as_deref().and_then(non_empty),
            format: None,
            formatted_body: None,
            filename: media.filename.as_deref().and_then(non_empty),
            url: Some(media.uri.as_str()),
        }
    }

    pub(crate) fn msgtype(&self) -> &'static str {
        self.msgtype
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
