//! albumsync-rs: mirrors a hosted media library into a local content tree.
//!
//! Every run fetches the folder hierarchy and a bulk photo listing, rebuilds
//! `<root>/<album>/index.json` plus the tag-derived `featured` collection,
//! then enriches each photo one at a time with its detail record (colors and
//! metadata) and writes it as `<root>/<album>/<name>.json`.

#![warn(clippy::all)]

mod catalog;
mod cli;
mod config;
mod model;
mod sync;
mod tree;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog::{AuthenticatedClient, CatalogFetcher};
use sync::SyncOrchestrator;
use tree::ContentTreeWriter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::debug!(?config, "Starting albumsync-rs");

    let http = reqwest::Client::builder()
        .user_agent(concat!("albumsync-rs/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let session = AuthenticatedClient::new(http, config.api_key.clone(), config.api_secret.clone());
    let endpoint = config.endpoint();
    tracing::info!(
        "Syncing {} into {}",
        endpoint.base(),
        config.directory.display()
    );
    let fetcher = CatalogFetcher::new(Box::new(session), endpoint);
    let writer = ContentTreeWriter::new(config.directory.clone());

    let mut orchestrator = SyncOrchestrator::new(fetcher, writer, config.sync_options());
    let result = orchestrator.run().await;
    tracing::debug!(state = ?orchestrator.state(), "Sync finished");
    result?;

    Ok(())
}
