//! quranc command-line entry point.
//!
//! Results go to stdout as JSON; logging goes to stderr so the two never mix.

use anyhow::{Context, Result};
use clap::Parser;
use quranc_client::{CachedClient, ClientConfig, QuranClient, ReqOptions};
use quranc_core::{AppConfig, CacheDb};
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = AppConfig::load_with(|config| cli.apply(config)).context("loading configuration")?;

    let http = QuranClient::new(ClientConfig::from(&config))?;
    let opts = ReqOptions { language_id: cli.language_id };

    match config.cache_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using response cache");
            let db = CacheDb::open(path)
                .await
                .with_context(|| format!("opening cache database {}", path.display()))?;
            let api = CachedClient::new(http, db).await.context("preparing cache buckets")?;
            commands::run(&api, &cli.command, opts, config.timeout()).await
        }
        None => commands::run(&http, &cli.command, opts, config.timeout()).await,
    }
}
