//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{login, logout, send_html, send_media, send_text, status, upload};

/// Send messages and media to a Matrix homeserver.
#[derive(Parser, Debug)]
#[command(name = "mxsend")]
#[command(author, version = env!("MXSEND_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Homeserver base URL
    #[arg(long, global = true, env = "MXSEND_SERVER")]
    pub server: Option<String>,

    /// User id or localpart to log in as
    #[arg(long, global = true, env = "MXSEND_USER")]
    pub user: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "MXSEND_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Session file (defaults to the platform data directory)
    #[arg(long, global = true, env = "MXSEND_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store a fresh session
    Login(login::LoginArgs),

    /// Remove the stored session
    Logout(logout::LogoutArgs),

    /// Show the stored session
    Status(status::StatusArgs),

    /// Send a plain text message
    SendText(send_text::SendTextArgs),

    /// Send a text message with an HTML rendering
    SendHtml(send_html::SendHtmlArgs),

    /// Send a media message for already uploaded content
    SendMedia(send_media::SendMediaArgs),

    /// Upload a file and print its content URI
    Upload(upload::UploadArgs),
}
