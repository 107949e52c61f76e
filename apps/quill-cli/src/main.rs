//! `quill`: drive the Quill API from a terminal.
//!
//! The session token persists between invocations in `QUILL_SESSION_FILE`
//! (default: the user config dir).

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use quill_client::{FileSessionStore, HttpBlogApi, Navigator, Store};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::Command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the Quill blog API")]
struct Cli {
    /// Base URL of the API, including the `/api` prefix.
    #[arg(long, env = "QUILL_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// Where the session token is kept.
    #[arg(long, env = "QUILL_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let session = Arc::new(FileSessionStore::new(
        cli.session_file
            .unwrap_or_else(FileSessionStore::default_path),
    ));
    let navigator = Navigator::default();
    let api = Arc::new(HttpBlogApi::new(
        cli.api_url.clone(),
        session.clone(),
        navigator.clone(),
    )?);
    let store = Store::new(api, session);

    tracing::debug!(api_url = %cli.api_url, "Running command");
    commands::run(cli.command, &store, &navigator).await
}
