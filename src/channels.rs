// src/channels.rs
//! Channel handle resolution with a persistent read-through cache.
//!
//! Handles are vanity names; the Atom video feed wants the stable `UC…`
//! channel id. Once resolved, a mapping never changes, so the cache is
//! append-only and written immediately after each new resolution — a crash
//! later in the run cannot lose prior successes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::fetch::Fetcher;

/// File-backed handle → channel id map.
#[derive(Debug)]
pub struct ChannelStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ChannelStore {
    /// Open the store at `path`, tolerating a missing or corrupt file.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn lookup(&self, handle: &str) -> Option<&str> {
        self.entries.get(handle).map(String::as_str)
    }

    /// Record a resolution and persist immediately. A persist failure is
    /// logged, not fatal — the mapping still serves the current run.
    pub fn store(&mut self, handle: &str, channel_id: &str) {
        self.entries
            .insert(handle.to_string(), channel_id.to_string());
        if let Err(err) = self.persist() {
            warn!(%err, "failed to persist channel cache");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.entries).map_err(io::Error::from)?;
        fs::write(&self.path, data)
    }
}

/// Cache file location, anchored next to the configuration file.
pub fn cache_path_for(config_path: &Path) -> PathBuf {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    base.join(".cache").join("channel_ids.json")
}

pub fn profile_url(handle: &str) -> String {
    format!("https://www.youtube.com/@{handle}")
}

/// Scrape a channel id out of a profile page. The embedded JSON blob is
/// tried first, then the canonical channel URL.
fn extract_channel_id(page: &str) -> Option<String> {
    static RE_JSON: OnceCell<Regex> = OnceCell::new();
    static RE_URL: OnceCell<Regex> = OnceCell::new();
    let re_json = RE_JSON
        .get_or_init(|| Regex::new(r#""channelId":"(UC[0-9A-Za-z_-]+)""#).expect("channel regex"));
    let re_url = RE_URL.get_or_init(|| {
        Regex::new(r"https://www\.youtube\.com/channel/(UC[0-9A-Za-z_-]+)")
            .expect("channel url regex")
    });

    re_json
        .captures(page)
        .or_else(|| re_url.captures(page))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve a handle to its channel id: cache first, then the public profile
/// page. A miss returns `Ok(None)` and is not cached, so a transiently
/// malformed page can succeed on a later run.
pub async fn resolve(
    fetcher: &Fetcher,
    store: &mut ChannelStore,
    handle: &str,
) -> Result<Option<String>, FetchError> {
    if let Some(id) = store.lookup(handle) {
        return Ok(Some(id.to_string()));
    }

    let page = fetcher.fetch_text(&profile_url(handle)).await?;
    match extract_channel_id(&page) {
        Some(id) => {
            debug!(handle, channel_id = %id, "resolved channel handle");
            store.store(handle, &id);
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_json_blob() {
        let page = r#"<script>var x = {"channelId":"UCabc_DEF-123"};</script>"#;
        assert_eq!(extract_channel_id(page).as_deref(), Some("UCabc_DEF-123"));
    }

    #[test]
    fn falls_back_to_canonical_url() {
        let page = r#"<link rel="canonical" href="https://www.youtube.com/channel/UCxyz789">"#;
        assert_eq!(extract_channel_id(page).as_deref(), Some("UCxyz789"));
    }

    #[test]
    fn json_blob_wins_over_url() {
        let page = concat!(
            r#""channelId":"UCfirst""#,
            r#" https://www.youtube.com/channel/UCsecond"#
        );
        assert_eq!(extract_channel_id(page).as_deref(), Some("UCfirst"));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(extract_channel_id("<html>nothing here</html>"), None);
    }

    #[test]
    fn cache_path_sits_next_to_config() {
        let p = cache_path_for(Path::new("/etc/digest/config.json"));
        assert_eq!(p, Path::new("/etc/digest/.cache/channel_ids.json"));
    }
}
