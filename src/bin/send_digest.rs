//! Builds the digest in-process and delivers it to Telegram. Credentials
//! come from the environment and are checked before any network activity;
//! a hard failure exits non-zero without sending anything.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_news_digest::channels::{self, ChannelStore};
use ai_news_digest::config::DigestConfig;
use ai_news_digest::digest;
use ai_news_digest::fetch::Fetcher;
use ai_news_digest::notify::TelegramNotifier;

#[derive(Parser)]
#[command(name = "send-digest")]
#[command(about = "Build the AI news digest and send it to Telegram")]
struct Args {
    /// Path to the config JSON.
    #[arg(long, default_value = "ai_news_config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let notifier = TelegramNotifier::from_env()?;

    let config = DigestConfig::load_from_file(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    let fetcher = Fetcher::new()?;
    let mut store = ChannelStore::open(channels::cache_path_for(&args.config));

    let message = digest::build_message(&config, &fetcher, &mut store).await;
    if message.is_empty() {
        anyhow::bail!("digest message is empty");
    }

    notifier.send(&message).await?;
    println!("Digest sent.");
    Ok(())
}
