// tests/ingest_pipeline.rs
use anyhow::Result;
use async_trait::async_trait;

use ai_news_digest::ingest::types::NewsSource;
use ai_news_digest::ingest::{collect_news, dedupe_items};
use ai_news_digest::FeedItem;

struct FixtureSource {
    name: &'static str,
    items: Vec<FeedItem>,
}

#[async_trait]
impl NewsSource for FixtureSource {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}

struct FailingSource;

#[async_trait]
impl NewsSource for FailingSource {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>> {
        anyhow::bail!("connection reset by peer")
    }

    fn name(&self) -> String {
        "failing".to_string()
    }
}

fn item(link: &str, title: &str) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: link.to_string(),
        description: String::new(),
        published: None,
    }
}

#[tokio::test]
async fn failing_source_contributes_zero_items() {
    let sources: Vec<Box<dyn NewsSource>> = vec![
        Box::new(FixtureSource {
            name: "one",
            items: vec![item("https://a/1", "First")],
        }),
        Box::new(FailingSource),
        Box::new(FixtureSource {
            name: "two",
            items: vec![item("https://a/2", "Second")],
        }),
    ];

    let all = collect_news(&sources).await;
    // the failure neither aborts the run nor disturbs source order
    let titles: Vec<_> = all.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[tokio::test]
async fn cross_source_duplicates_collapse_after_merge() {
    let shared = item("https://a/x", "Shared story");
    let sources: Vec<Box<dyn NewsSource>> = vec![
        Box::new(FixtureSource {
            name: "one",
            items: vec![shared.clone()],
        }),
        Box::new(FixtureSource {
            name: "two",
            items: vec![shared.clone(), item("https://a/y", "Unique story")],
        }),
    ];

    let all = dedupe_items(collect_news(&sources).await);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Shared story");
}

#[tokio::test]
async fn all_sources_failing_yields_an_empty_pool() {
    let sources: Vec<Box<dyn NewsSource>> =
        vec![Box::new(FailingSource), Box::new(FailingSource)];
    assert!(collect_news(&sources).await.is_empty());
}
