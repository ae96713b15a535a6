//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mxsend::{Media, MediaType, RoomId};

use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// MIME type of the file (e.g., image/png)
    #[arg(long)]
    pub content_type: String,

    /// Also send the upload to this room as a media message
    #[arg(long)]
    pub send_to: Option<String>,

    /// Media kind used with --send-to: file (default), image, audio or video
    #[arg(long, requires = "send_to")]
    pub kind: Option<MediaType>,

    /// Caption used with --send-to
    #[arg(long, requires = "send_to")]
    pub caption: Option<String>,
}

pub async fn run(args: UploadArgs, conn: &Connection) -> Result<()> {
    let room = args
        .send_to
        .as_deref()
        .map(RoomId::new)
        .transpose()
        .context("Invalid room id")?;

    let data = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let client = conn.connect().await?;
    let uri = client
        .upload_file(&args.content_type, data)
        .await
        .context("Failed to upload file")?;

    println!("{}", uri);
    output::success("Uploaded");

    if let Some(room) = room {
        let mut media = Media::new(args.kind.unwrap_or(MediaType::File), uri);
        media.caption = args.caption;
        media.filename = args
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        client
            .send_media(&room, &media)
            .await
            .context("Failed to send media")?;
        output::success(&format!("Sent to {}", room));
    }

    Ok(())
}
