//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mxsend::SessionStore;

use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct LoginArgs {}

pub async fn run(_args: LoginArgs, conn: &Connection) -> Result<()> {
    let store = conn.store()?;
    let had_session = store
        .get()
        .await
        .context("Failed to read stored session")?
        .is_authenticated();

    eprintln!("{}", "Logging in...".dimmed());
    let client = conn.connect().await?;

    // A restored session skipped the login; force one. The stored session is
    // only replaced once the new login succeeds.
    if had_session {
        client
            .refresh_if_stale(&client.access_token().await)
            .await
            .context("Login failed")?;
    }

    let session = store.get().await.context("Failed to read stored session")?;

    output::success("Logged in successfully");
    output::field("Server", client.server().as_str());
    output::field("User", client.user());
    if let Some(device_id) = &session.device_id {
        output::field("Device", device_id);
    }

    Ok(())
}
