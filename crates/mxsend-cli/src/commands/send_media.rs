//! Send media command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mxsend::{ContentUri, Media, MediaType, RoomId};

use super::send_text::print_sent;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct SendMediaArgs {
    /// Room id (e.g., !abcdef:example.org)
    pub room: String,

    /// Content URI of the uploaded media (mxc://...)
    #[arg(long)]
    pub uri: String,

    /// Media kind: file, image, audio or video
    #[arg(long, default_value = "file")]
    pub kind: MediaType,

    /// Caption shown with the media
    #[arg(long)]
    pub caption: Option<String>,

    /// Original filename
    #[arg(long)]
    pub filename: Option<String>,
}

pub async fn run(args: SendMediaArgs, conn: &Connection) -> Result<()> {
    let room = RoomId::new(&args.room).context("Invalid room id")?;
    let uri = ContentUri::new(&args.uri).context("Invalid content URI")?;

    let mut media = Media::new(args.kind, uri);
    media.caption = args.caption;
    media.filename = args.filename;

    let client = conn.connect().await?;
    let event_id = client
        .send_media(&room, &media)
        .await
        .context("Failed to send media")?;

    print_sent(event_id.as_deref())
}
