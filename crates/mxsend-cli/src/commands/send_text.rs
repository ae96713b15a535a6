//! Send text command implementation.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use mxsend::RoomId;

use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct SendTextArgs {
    /// Room id (e.g., !abcdef:example.org)
    pub room: String,

    /// Message text (use - for stdin)
    pub text: String,
}

pub async fn run(args: SendTextArgs, conn: &Connection) -> Result<()> {
    let room = RoomId::new(&args.room).context("Invalid room id")?;
    let text = read_text(&args.text)?;

    let client = conn.connect().await?;
    let event_id = client
        .send_text(&room, &text)
        .await
        .context("Failed to send message")?;

    print_sent(event_id.as_deref())
}

/// Returns `arg`, or all of stdin when `arg` is `-`.
pub(crate) fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf.trim_end_matches('\n').to_string())
}

pub(crate) fn print_sent(event_id: Option<&str>) -> Result<()> {
    output::json(&serde_json::json!({ "event_id": event_id }))?;
    output::success("Message sent");
    Ok(())
}
