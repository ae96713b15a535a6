//! Connection settings and session file location.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use mxsend::{Client, ClientConfig, Credentials, FileSessionStore, HomeserverUrl};

/// Global connection options shared by every command.
#[derive(Debug)]
pub struct Connection {
    pub server: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl Connection {
    /// Returns the session store for this invocation.
    pub fn store(&self) -> Result<FileSessionStore> {
        Ok(FileSessionStore::new(self.session_path()?))
    }

    /// Build a client, reusing the stored session if there is one.
    pub async fn connect(&self) -> Result<Client> {
        let credentials = self.credentials()?;
        let store = Arc::new(self.store()?);
        debug!(path = %store.path().display(), "Using session file");

        let config = ClientConfig::new(credentials).with_session_store(store);
        Client::new(config).await.context("Failed to connect")
    }

    fn credentials(&self) -> Result<Credentials> {
        let server = self
            .server
            .as_deref()
            .context("No homeserver given. Pass --server or set MXSEND_SERVER.")?;
        let user = self
            .user
            .as_deref()
            .context("No user given. Pass --user or set MXSEND_USER.")?;
        let password = self
            .password
            .as_deref()
            .context("No password given. Pass --password or set MXSEND_PASSWORD.")?;

        let server = HomeserverUrl::new(server).context("Invalid homeserver URL")?;
        Ok(Credentials::new(server, user, password))
    }

    fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        let dirs =
            ProjectDirs::from("", "", "mxsend").context("Could not determine data directory")?;
        Ok(dirs.data_dir().join("session.json"))
    }
}
