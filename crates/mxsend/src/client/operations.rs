//! Message sending and media upload.

use reqwest::Method;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::Client;
use super::endpoints::{SendMessageResponse, UPLOAD, UploadResponse, send_message_path};
use super::executor::AuthedRequest;
use crate::error::{Error, InvalidInputError};
use crate::message::{Media, MessageContent};
use crate::types::{ContentUri, RoomId};

impl Client {
    /// Send a plain text message.
    ///
    /// Returns the event id assigned by the homeserver, if it reported one.
    #[instrument(skip(self, text), fields(%room))]
    pub async fn send_text(&self, room: &RoomId, text: &str) -> Result<Option<String>, Error> {
        self.send_message(room, &MessageContent::text(text)).await
    }

    /// Send a text message with an HTML rendering.
    ///
    /// `plain` is the fallback body for clients that do not render HTML.
    #[instrument(skip(self, plain, html), fields(%room))]
    pub async fn send_html(
        &self,
        room: &RoomId,
        plain: &str,
        html: &str,
    ) -> Result<Option<String>, Error> {
        self.send_message(room, &MessageContent::html(plain, html))
            .await
    }

    /// Send a media message pointing at previously uploaded content.
    #[instrument(skip(self, media), fields(%room, kind = %media.kind, uri = %media.uri))]
    pub async fn send_media(&self, room: &RoomId, media: &Media) -> Result<Option<String>, Error> {
        self.send_message(room, &MessageContent::media(media)).await
    }

    /// Upload raw bytes and return the content URI the homeserver assigned.
    ///
    /// # Arguments
    ///
    /// * `content_type` - MIME type of `data`, e.g. `image/jpeg`
    /// * `data` - The file contents
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub async fn upload_file(&self, content_type: &str, data: Vec<u8>) -> Result<ContentUri, Error> {
        let content_type_value =
            HeaderValue::from_str(content_type).map_err(|_| InvalidInputError::ContentType {
                value: content_type.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type_value);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(data.len()));

        let request = AuthedRequest::new(Method::POST, UPLOAD, data).with_headers(headers);
        let response = self.execute(&request, true).await?;

        let body = response.bytes().await?;
        let upload: UploadResponse = serde_json::from_slice(&body).map_err(|e| Error::Decode {
            what: "upload",
            message: e.to_string(),
        })?;

        let uri = ContentUri::new(upload.content_uri).map_err(|e| Error::Decode {
            what: "upload",
            message: e.to_string(),
        })?;

        debug!(%uri, "Upload complete");
        Ok(uri)
    }

    async fn send_message(
        &self,
        room: &RoomId,
        content: &MessageContent<'_>,
    ) -> Result<Option<String>, Error> {
        let payload = serde_json::to_vec(content).map_err(|source| Error::Marshal {
            what: "message",
            source,
        })?;

        // Fixed for this logical send, so the auth retry replays the same event.
        let txn_id = Uuid::new_v4().to_string();
        debug!(msgtype = content.msgtype(), %txn_id, "Sending message");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = AuthedRequest::new(
            Method::PUT,
            send_message_path(room.as_str(), &txn_id),
            payload,
        )
        .with_headers(headers);

        let response = self.execute(&request, true).await?;

        // The body may be empty or lack an event_id.
        let event_id = response
            .json::<SendMessageResponse>()
            .await
            .ok()
            .map(|r| r.event_id);

        Ok(event_id)
    }
}
