//! CLI entry point.
//!
//! Wires the Drive adapter into the resolver/fetcher core, maps every
//! failure to a readable message and a non-zero exit status.

mod app;
mod config;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use drivedl_core::{Fetcher, Resolver, RetryPolicy, SearchQuery};
use drivedl_drive::{DriveClient, ServiceAccountKey};
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::progress::DownloadBar;

#[tokio::main]
async fn main() -> ExitCode {
    let args = App::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(args: App) -> anyhow::Result<()> {
    let config = Config::resolve(&args)?;

    let key = ServiceAccountKey::from_base64(&config.credentials_base64)
        .context("decoding service account credentials")?;
    let client = DriveClient::connect(&key)
        .await
        .context("authenticating with Drive")?;

    info!(filename = %args.filename, folder = %config.folder_id, "looking for file");

    let query = SearchQuery::new(&args.filename, &config.folder_id);
    let policy = RetryPolicy::new(args.max_attempts, Duration::from_secs(args.retry_delay));
    let handle = Resolver::new(&client)
        .list_on_miss(args.verbose)
        .resolve(&query, &policy)
        .await?;

    let output = args
        .output_path
        .unwrap_or_else(|| PathBuf::from(&args.filename));

    let bar = DownloadBar::new(&handle);
    let on_progress = bar.callback();
    Fetcher::new(&client)
        .fetch(&handle, &output, Some(&on_progress))
        .await?;
    bar.finish(&output);

    Ok(())
}
