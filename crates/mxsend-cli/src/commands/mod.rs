//! Subcommand implementations.

pub mod login;
pub mod logout;
pub mod send_html;
pub mod send_media;
pub mod send_text;
pub mod status;
pub mod upload;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::session::Connection;

pub async fn handle(cli: Cli) -> Result<()> {
    let conn = Connection {
        server: cli.server,
        user: cli.user,
        password: cli.password,
        session_file: cli.session_file,
    };

    match cli.command {
        Commands::Login(args) => login::run(args, &conn).await,
        Commands::Logout(args) => logout::run(args, &conn).await,
        Commands::Status(args) => status::run(args, &conn).await,
        Commands::SendText(args) => send_text::run(args, &conn).await,
        Commands::SendHtml(args) => send_html::run(args, &conn).await,
        Commands::SendMedia(args) => send_media::run(args, &conn).await,
        Commands::Upload(args) => upload::run(args, &conn).await,
    }
}
