// src/ingest/mod.rs
pub mod atom;
pub mod rss;
pub mod sources;
pub mod types;

use std::collections::HashSet;

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::ingest::types::{FeedItem, NewsSource};

/// One feed dialect: turn a raw document into an ordered item sequence.
/// The caller picks the implementation by source type; there is no runtime
/// sniffing of the document.
pub trait FeedFormat {
    type Item;

    fn parse(&self, raw: &str) -> Result<Vec<Self::Item>, ParseError>;
}

/// Strip markup from a feed text field: replace HTML tags with spaces,
/// decode HTML entities, collapse whitespace runs, trim.
pub fn strip_tags(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)<[^>]+>").expect("tag regex"));
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));

    let out = re_tags.replace_all(s, " ");
    let out = html_escape::decode_html_entities(out.as_ref()).to_string();
    let out = re_ws.replace_all(&out, " ");
    out.trim().to_string()
}

/// Drop later items whose `(link, title)` pair matches an earlier one,
/// preserving first-seen order. Idempotent.
pub fn dedupe_items(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert((item.link.clone(), item.title.clone())) {
            out.push(item);
        }
    }
    out
}

/// Fetch every source in sequence. A failing source contributes zero items
/// and never aborts the run.
pub async fn collect_news(sources: &[Box<dyn NewsSource>]) -> Vec<FeedItem> {
    let mut all = Vec::new();
    for source in sources {
        match source.fetch_items().await {
            Ok(mut items) => {
                debug!(source = %source.name(), count = items.len(), "source fetched");
                all.append(&mut items);
            }
            Err(err) => {
                warn!(%err, source = %source.name(), "source fetch failed");
            }
        }
    }
    all
}
