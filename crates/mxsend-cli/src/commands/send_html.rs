//! Send HTML command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mxsend::RoomId;

use super::send_text::{print_sent, read_text};
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct SendHtmlArgs {
    /// Room id (e.g., !abcdef:example.org)
    pub room: String,

    /// Plain text fallback
    pub plain: String,

    /// HTML body (use - for stdin)
    pub html: String,
}

pub async fn run(args: SendHtmlArgs, conn: &Connection) -> Result<()> {
    let room = RoomId::new(&args.room).context("Invalid room id")?;
    let html = read_text(&args.html)?;

    let client = conn.connect().await?;
    let event_id = client
        .send_html(&room, &args.plain, &html)
        .await
        .context("Failed to send message")?;

    print_sent(event_id.as_deref())
}
