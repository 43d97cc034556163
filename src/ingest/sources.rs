// src/ingest/sources.rs
//! Concrete news sources: the Naver news-search RSS endpoint and the Google
//! News search RSS endpoint. Both produce normalized `FeedItem`s; a
//! malformed response body degrades to zero items right here.

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::fetch::Fetcher;
use crate::ingest::rss::RssFormat;
use crate::ingest::types::{FeedItem, NewsSource};
use crate::ingest::FeedFormat;

/// Locale triple for the Google News search endpoint.
#[derive(Debug, Clone, Copy)]
pub struct GoogleLocale {
    pub hl: &'static str,
    pub gl: &'static str,
    pub ceid: &'static str,
}

impl GoogleLocale {
    pub const KOREAN: GoogleLocale = GoogleLocale {
        hl: "ko",
        gl: "KR",
        ceid: "KR:ko",
    };

    pub const ENGLISH: GoogleLocale = GoogleLocale {
        hl: "en",
        gl: "US",
        ceid: "US:en",
    };
}

pub fn naver_search_url(keyword: &str) -> String {
    format!(
        "https://newssearch.naver.com/search.naver?where=rss&query={}",
        urlencoding::encode(keyword)
    )
}

pub fn google_news_url(keyword: &str, locale: GoogleLocale) -> String {
    format!(
        "https://news.google.com/rss/search?q={}&hl={}&gl={}&ceid={}",
        urlencoding::encode(keyword),
        locale.hl,
        locale.gl,
        locale.ceid
    )
}

fn parse_or_empty(body: &str, source: &str) -> Vec<FeedItem> {
    RssFormat.parse(body).unwrap_or_else(|err| {
        warn!(%err, source, "malformed rss document");
        Vec::new()
    })
}

pub struct NaverSearchSource {
    fetcher: Fetcher,
    keyword: String,
}

impl NaverSearchSource {
    pub fn new(fetcher: Fetcher, keyword: impl Into<String>) -> Self {
        Self {
            fetcher,
            keyword: keyword.into(),
        }
    }
}

#[async_trait]
impl NewsSource for NaverSearchSource {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>> {
        let body = self
            .fetcher
            .fetch_text(&naver_search_url(&self.keyword))
            .await?;
        Ok(parse_or_empty(&body, &self.name()))
    }

    fn name(&self) -> String {
        format!("naver:{}", self.keyword)
    }
}

pub struct GoogleNewsSource {
    fetcher: Fetcher,
    keyword: String,
    locale: GoogleLocale,
}

impl GoogleNewsSource {
    pub fn new(fetcher: Fetcher, keyword: impl Into<String>, locale: GoogleLocale) -> Self {
        Self {
            fetcher,
            keyword: keyword.into(),
            locale,
        }
    }
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>> {
        let body = self
            .fetcher
            .fetch_text(&google_news_url(&self.keyword, self.locale))
            .await?;
        Ok(parse_or_empty(&body, &self.name()))
    }

    fn name(&self) -> String {
        format!("google:{}:{}", self.locale.hl, self.keyword)
    }
}
