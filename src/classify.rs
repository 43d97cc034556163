// src/classify.rs
//! Keyword buckets. Matching is literal case-insensitive substring
//! containment over the item's title + description — no tokenization, no
//! word boundaries. Short or ambiguous keywords are the configuration
//! author's problem, not ours.

use std::collections::HashMap;

use crate::config::DigestConfig;
use crate::ingest::types::FeedItem;

/// Classified items. An item can appear in any number of buckets (fan-out,
/// not partition); within a bucket, items keep the order they arrived in.
#[derive(Debug, Default)]
pub struct Buckets {
    pub by_tool: HashMap<String, Vec<FeedItem>>,
    pub people: Vec<FeedItem>,
    pub popular: Vec<FeedItem>,
}

impl Buckets {
    pub fn tool(&self, name: &str) -> &[FeedItem] {
        self.by_tool.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn haystack(item: &FeedItem) -> String {
    format!("{} {}", item.title, item.description).to_lowercase()
}

fn matches_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text.contains(&kw.to_lowercase()))
}

pub fn classify(items: &[FeedItem], config: &DigestConfig) -> Buckets {
    let mut buckets = Buckets::default();
    for tool in &config.tools {
        buckets.by_tool.insert(tool.name.clone(), Vec::new());
    }

    for item in items {
        let text = haystack(item);

        for tool in &config.tools {
            if !tool.keywords.is_empty() && matches_any(&text, &tool.keywords) {
                if let Some(bucket) = buckets.by_tool.get_mut(&tool.name) {
                    bucket.push(item.clone());
                }
            }
        }

        if !config.people.is_empty() && matches_any(&text, &config.people) {
            buckets.people.push(item.clone());
        }

        if !config.popular_tools_keywords.is_empty()
            && matches_any(&text, &config.popular_tools_keywords)
        {
            buckets.popular.push(item.clone());
        }
    }

    buckets
}
