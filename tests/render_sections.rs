// tests/render_sections.rs
//! End-to-end scenarios over the pure pipeline stages: parse → dedupe →
//! classify → render.

use ai_news_digest::classify::{classify, Buckets};
use ai_news_digest::config::ToolConfig;
use ai_news_digest::ingest::rss::parse_items;
use ai_news_digest::ingest::dedupe_items;
use ai_news_digest::render::{
    render_digest, CHANNELS_LABEL, HEADER_LABEL, NO_NEWS_LINE, PEOPLE_LABEL, POPULAR_LABEL,
};
use ai_news_digest::{DigestConfig, FeedItem, VideoItem};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn item(n: u32, title: &str, desc: &str) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: format!("https://example.test/{n}"),
        description: desc.to_string(),
        published: Some(1_000 + i64::from(n)),
    }
}

#[test]
fn duplicate_rss_items_produce_a_single_bullet() {
    // the same article surfaced by two sources
    let raw = r#"<rss><channel>
        <item><title>Foo</title><link>https://a/x</link></item>
        <item><title>Foo</title><link>https://a/x</link></item>
    </channel></rss>"#;
    let items = dedupe_items(parse_items(raw).unwrap());

    let cfg = DigestConfig {
        tools: vec![ToolConfig {
            name: "FooTool".into(),
            keywords: vec!["foo".into()],
        }],
        ..DigestConfig::default()
    };
    let buckets = classify(&items, &cfg);
    let message = render_digest(&cfg, &buckets, &[], today());

    assert_eq!(message.matches("- Foo").count(), 1);
}

#[test]
fn unresolved_handles_leave_no_channel_section() {
    // resolution returned null for every handle → empty video list
    let cfg = DigestConfig {
        youtube_handles: vec!["chan1".into()],
        ..DigestConfig::default()
    };
    let message = render_digest(&cfg, &Buckets::default(), &[], today());
    assert!(!message.contains(CHANNELS_LABEL));
}

#[test]
fn empty_config_yields_just_the_header() {
    let cfg = DigestConfig::from_json("{}").unwrap();
    let message = render_digest(&cfg, &Buckets::default(), &[], today());
    assert_eq!(message, format!("{HEADER_LABEL} (2024-01-15)"));
}

#[test]
fn always_shown_tools_render_a_placeholder_when_empty() {
    let cfg = DigestConfig {
        tools: vec![
            ToolConfig {
                name: "Claude".into(),
                keywords: vec!["claude".into()],
            },
            ToolConfig {
                name: "NicheTool".into(),
                keywords: vec!["niche".into()],
            },
        ],
        ..DigestConfig::default()
    };
    let message = render_digest(&cfg, &classify(&[], &cfg), &[], today());
    assert!(message.contains("[Claude]"));
    assert!(message.contains(NO_NEWS_LINE));
    // empty bucket of a non-allow-listed tool is omitted entirely
    assert!(!message.contains("[NicheTool]"));
}

#[test]
fn popular_section_follows_the_anchor_tool() {
    let cfg = DigestConfig {
        tools: vec![
            ToolConfig {
                name: "First".into(),
                keywords: vec!["first".into()],
            },
            ToolConfig {
                name: "Anchor".into(),
                keywords: vec!["anchor".into()],
            },
        ],
        popular_tools_keywords: vec!["hot".into()],
        popular_anchor_tool: "Anchor".into(),
        always_shown_tools: vec!["First".into(), "Anchor".into()],
        ..DigestConfig::default()
    };
    let items = vec![item(1, "hot new tool", "")];
    let buckets = classify(&items, &cfg);
    let message = render_digest(&cfg, &buckets, &[], today());

    let anchor_at = message.find("[Anchor]").unwrap();
    let popular_at = message.find(POPULAR_LABEL).unwrap();
    let first_at = message.find("[First]").unwrap();
    assert!(first_at < anchor_at);
    assert!(anchor_at < popular_at);
    assert!(message.contains("- hot new tool"));
}

#[test]
fn people_section_appears_only_when_populated() {
    let cfg = DigestConfig {
        people: vec!["altman".into()],
        ..DigestConfig::default()
    };

    let quiet = render_digest(&cfg, &classify(&[], &cfg), &[], today());
    assert!(!quiet.contains(PEOPLE_LABEL));

    let items = vec![item(1, "Altman speaks", "")];
    let message = render_digest(&cfg, &classify(&items, &cfg), &[], today());
    assert!(message.contains(PEOPLE_LABEL));
    assert!(message.contains("- Altman speaks"));
}

#[test]
fn video_entries_cap_across_handles() {
    let cfg = DigestConfig {
        max_youtube_items: 2,
        ..DigestConfig::default()
    };
    let videos: Vec<VideoItem> = (0..4)
        .map(|n| VideoItem {
            handle: format!("chan{n}"),
            title: format!("upload {n}"),
            link: format!("https://www.youtube.com/watch?v={n}"),
            published: None,
        })
        .collect();
    let message = render_digest(&cfg, &Buckets::default(), &videos, today());
    assert!(message.contains("- chan0: upload 0"));
    assert!(message.contains("- chan1: upload 1"));
    assert!(!message.contains("chan2"));
}
