// src/digest.rs
//! End-to-end digest construction: configured sources → deduped, ranked,
//! classified buckets → rendered message. Everything network-facing here
//! degrades per source; by the time this module runs, configuration has
//! already been validated.

use tracing::{info, warn};

use crate::channels::{self, ChannelStore};
use crate::classify;
use crate::config::DigestConfig;
use crate::fetch::Fetcher;
use crate::ingest::atom::AtomFormat;
use crate::ingest::sources::{GoogleLocale, GoogleNewsSource, NaverSearchSource};
use crate::ingest::types::{NewsSource, VideoItem};
use crate::ingest::{self, FeedFormat};
use crate::rank;
use crate::render;

pub fn youtube_feed_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}")
}

/// News sources in render-relevant order: for each keyword, Naver first,
/// then (optionally) the Korean-locale Google News search.
fn news_sources(cfg: &DigestConfig, fetcher: &Fetcher) -> Vec<Box<dyn NewsSource>> {
    let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();
    for keyword in &cfg.naver_keywords {
        sources.push(Box::new(NaverSearchSource::new(fetcher.clone(), keyword)));
        if cfg.use_google_news {
            sources.push(Box::new(GoogleNewsSource::new(
                fetcher.clone(),
                keyword,
                GoogleLocale::KOREAN,
            )));
        }
    }
    sources
}

/// The most recent upload per resolved handle, in handle order. Unresolved
/// handles and failed fetches are skipped for this run.
pub async fn collect_videos(
    cfg: &DigestConfig,
    fetcher: &Fetcher,
    store: &mut ChannelStore,
) -> Vec<VideoItem> {
    let mut videos = Vec::new();
    for handle in &cfg.youtube_handles {
        let channel_id = match channels::resolve(fetcher, store, handle).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(%handle, "channel handle did not resolve");
                continue;
            }
            Err(err) => {
                warn!(%err, %handle, "channel profile fetch failed");
                continue;
            }
        };

        let body = match fetcher.fetch_text(&youtube_feed_url(&channel_id)).await {
            Ok(body) => body,
            Err(err) => {
                warn!(%err, %handle, "video feed fetch failed");
                continue;
            }
        };

        let entries = AtomFormat.parse(&body).unwrap_or_else(|err| {
            warn!(%err, %handle, "malformed video feed");
            Vec::new()
        });

        // Uploads feeds list the newest entry first.
        if let Some(entry) = entries.into_iter().next() {
            videos.push(VideoItem {
                handle: handle.clone(),
                title: entry.title,
                link: entry.link,
                published: entry.published,
            });
        }
    }
    videos
}

/// Build the digest message. The news pool is deduped and ranked once
/// globally, so buckets inherit newest-first order from classification.
pub async fn build_message(
    cfg: &DigestConfig,
    fetcher: &Fetcher,
    store: &mut ChannelStore,
) -> String {
    let sources = news_sources(cfg, fetcher);
    let mut items = ingest::dedupe_items(ingest::collect_news(&sources).await);
    rank::sort_newest_first(&mut items);
    info!(count = items.len(), "news items after dedup");

    let mut buckets = classify::classify(&items, cfg);

    // Optional English-locale supplement for the popular bucket. The merge
    // can reintroduce cross-source duplicates, so dedupe and re-rank.
    if cfg.popular_use_english && !cfg.popular_tools_keywords.is_empty() {
        let extra_sources: Vec<Box<dyn NewsSource>> = cfg
            .popular_tools_keywords
            .iter()
            .map(|kw| {
                Box::new(GoogleNewsSource::new(
                    fetcher.clone(),
                    kw,
                    GoogleLocale::ENGLISH,
                )) as Box<dyn NewsSource>
            })
            .collect();
        let extra = ingest::collect_news(&extra_sources).await;
        if !extra.is_empty() {
            buckets.popular.extend(extra);
            buckets.popular = ingest::dedupe_items(std::mem::take(&mut buckets.popular));
            rank::sort_newest_first(&mut buckets.popular);
        }
    }

    let videos = if cfg.youtube_handles.is_empty() {
        Vec::new()
    } else {
        collect_videos(cfg, fetcher, store).await
    };

    let today = chrono::Local::now().date_naive();
    render::render_digest(cfg, &buckets, &videos, today)
}
