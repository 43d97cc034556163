// src/config.rs
//! Digest configuration, read once per run from a JSON document.
//!
//! Every key is optional; missing keys fall back to the defaults below, so
//! an empty `{}` is a valid (if quiet) configuration. Numeric limits are
//! unsigned, which makes the "non-negative" invariant a type-level fact.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

fn default_true() -> bool {
    true
}
fn default_max_items_per_tool() -> usize {
    2
}
fn default_max_popular_items() -> usize {
    3
}
fn default_max_youtube_items() -> usize {
    6
}
fn default_max_link_length() -> usize {
    60
}
fn default_max_summary_length() -> usize {
    140
}
fn default_max_total_chars() -> usize {
    3500
}
fn default_always_shown_tools() -> Vec<String> {
    ["Gemini", "ChatGPT", "Claude", "Google Antigravity"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_popular_anchor_tool() -> String {
    "Google Antigravity".to_string()
}

/// One named tool bucket and the keywords that route items into it.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    /// Search keywords for the Naver news-search RSS endpoint.
    #[serde(default)]
    pub naver_keywords: Vec<String>,

    /// Also query Google News for every Naver keyword.
    #[serde(default = "default_true")]
    pub use_google_news: bool,

    /// Tool buckets, rendered in this order.
    #[serde(default)]
    pub tools: Vec<ToolConfig>,

    /// Names routed into the "people" bucket.
    #[serde(default)]
    pub people: Vec<String>,

    /// Keywords routed into the "popular tools" bucket.
    #[serde(default)]
    pub popular_tools_keywords: Vec<String>,

    /// Additionally query an English-locale variant of the popular keywords
    /// and merge the results into the popular bucket.
    #[serde(default)]
    pub popular_use_english: bool,

    /// Video channel handles, resolved to channel ids via the cache.
    #[serde(default)]
    pub youtube_handles: Vec<String>,

    /// Direct video links rendered verbatim in their own section.
    #[serde(default)]
    pub youtube_links: Vec<String>,

    #[serde(default = "default_max_items_per_tool")]
    pub max_items_per_tool: usize,

    #[serde(default = "default_max_popular_items")]
    pub max_popular_items: usize,

    #[serde(default = "default_max_youtube_items")]
    pub max_youtube_items: usize,

    #[serde(default = "default_max_link_length")]
    pub max_link_length: usize,

    #[serde(default = "default_max_summary_length")]
    pub max_summary_length: usize,

    #[serde(default = "default_max_total_chars")]
    pub max_total_chars: usize,

    /// Tools whose section renders a placeholder line even when empty.
    /// Other tools with an empty bucket are omitted entirely.
    #[serde(default = "default_always_shown_tools")]
    pub always_shown_tools: Vec<String>,

    /// The popular-tools section renders immediately after this tool's
    /// section.
    #[serde(default = "default_popular_anchor_tool")]
    pub popular_anchor_tool: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            naver_keywords: Vec::new(),
            use_google_news: true,
            tools: Vec::new(),
            people: Vec::new(),
            popular_tools_keywords: Vec::new(),
            popular_use_english: false,
            youtube_handles: Vec::new(),
            youtube_links: Vec::new(),
            max_items_per_tool: default_max_items_per_tool(),
            max_popular_items: default_max_popular_items(),
            max_youtube_items: default_max_youtube_items(),
            max_link_length: default_max_link_length(),
            max_summary_length: default_max_summary_length(),
            max_total_chars: default_max_total_chars(),
            always_shown_tools: default_always_shown_tools(),
            popular_anchor_tool: default_popular_anchor_tool(),
        }
    }
}

impl DigestConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let cfg: DigestConfig = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Tool names key the buckets, so they must be unique.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::DuplicateTool(tool.name.clone()));
            }
        }
        Ok(())
    }
}
