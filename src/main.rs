//! AI News Digest — Binary Entrypoint
//! Builds the digest message from the configured feed sources and prints it
//! to stdout. Delivery is a separate collaborator (`send_digest`), which
//! consumes exactly this output.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_news_digest::channels::{self, ChannelStore};
use ai_news_digest::config::DigestConfig;
use ai_news_digest::digest;
use ai_news_digest::fetch::Fetcher;

#[derive(Parser)]
#[command(name = "ai-news-digest")]
#[command(about = "Build the daily AI news digest message")]
struct Args {
    /// Path to the config JSON.
    #[arg(long, default_value = "ai_news_config.json")]
    config: PathBuf,
}

/// Logs go to stderr — stdout carries the digest message itself.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = DigestConfig::load_from_file(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    let fetcher = Fetcher::new()?;
    let mut store = ChannelStore::open(channels::cache_path_for(&args.config));

    let message = digest::build_message(&config, &fetcher, &mut store).await;
    if message.is_empty() {
        anyhow::bail!("digest message is empty");
    }
    println!("{message}");
    Ok(())
}
