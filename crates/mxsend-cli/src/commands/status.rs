//! Status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mxsend::SessionStore;

use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, conn: &Connection) -> Result<()> {
    let store = conn.store()?;
    let session = store.get().await.context("Failed to load session")?;

    if !session.is_authenticated() {
        anyhow::bail!("No active session. Run 'mxsend login' first.");
    }

    output::field("Session", &store.path().display().to_string());
    output::field("Device", session.device_id.as_deref().unwrap_or("-"));

    Ok(())
}
