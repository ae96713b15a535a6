//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, conn: &Connection) -> Result<()> {
    let store = conn.store()?;
    store.clear().await.context("Failed to remove session")?;

    output::success("Session removed");
    Ok(())
}
