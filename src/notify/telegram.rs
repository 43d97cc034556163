use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Delivery collaborator: posts a rendered digest to a Telegram chat.
/// HTML parse mode matches the renderer's inline anchor markup; link
/// previews are disabled so a digest full of links stays compact.
#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            token,
            chat_id,
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Credentials from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`. Missing
    /// variables fail here, before any digest work happens.
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is missing")?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").context("TELEGRAM_CHAT_ID is missing")?;
        Ok(Self::new(token, chat_id))
    }

    pub async fn send(&self, message: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", message),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];

        self.client
            .post(&url)
            .timeout(self.timeout)
            .form(&params)
            .send()
            .await
            .context("telegram sendMessage request failed")?
            .error_for_status()
            .context("telegram sendMessage HTTP error")?;
        Ok(())
    }
}
