// src/fetch.rs
//! HTTP document fetcher. Sends a realistic client identity header since
//! some feed hosts block default library agents. No retry: a failed fetch
//! is "zero items from this source" at the call site.

use std::time::Duration;

use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (ai-news-bot)";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(secs))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and return the decoded body text. Non-2xx statuses are
    /// errors, same as transport failures.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.text().await?)
    }
}
