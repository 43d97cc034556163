// src/ingest/types.rs
use anyhow::Result;
use async_trait::async_trait;

/// One normalized news entry. Dedup identity is the `(link, title)` pair —
/// not the description, since the same article can appear with slightly
/// different descriptions across sources.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Publication time in unix seconds, if the feed's `pubDate` parsed.
    pub published: Option<i64>,
}

/// The most recent upload of one resolved channel.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoItem {
    pub handle: String,
    pub title: String,
    pub link: String,
    pub published: Option<i64>,
}

#[async_trait]
pub trait NewsSource {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>>;
    fn name(&self) -> String;
}
