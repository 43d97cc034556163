// src/rank.rs
//! Publication-time ordering. RSS `pubDate` uses the RFC 822/2822 date
//! format; parse failures are non-fatal and yield "no timestamp", which
//! sorts as the oldest possible value instead of being dropped.

use time::format_description::well_known::Rfc2822;
use time::{OffsetDateTime, UtcOffset};

use crate::ingest::types::FeedItem;

/// Parse an RFC 822-style `pubDate` into unix seconds.
pub fn parse_pub_date(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    OffsetDateTime::parse(text, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
}

fn sort_key(item: &FeedItem) -> i64 {
    item.published.unwrap_or(i64::MIN)
}

/// Newest first, stable; items without a usable timestamp go last.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by_key(|item| std::cmp::Reverse(sort_key(item)));
}
