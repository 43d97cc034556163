// src/render.rs
//! Digest assembly: per-item summaries, HTML link markup, section layout,
//! and the global character budget.
//!
//! All truncation is character-based, not byte-based — labels and feed text
//! are CJK, so byte slicing would split codepoints.

use chrono::NaiveDate;

use crate::classify::Buckets;
use crate::config::DigestConfig;
use crate::ingest::types::{FeedItem, VideoItem};

// Labels are fixed for the target locale.
pub const HEADER_LABEL: &str = "AI 업데이트 알림";
pub const NO_NEWS_LINE: &str = "- 오늘 관련 한국어 소식 없음.";
pub const POPULAR_LABEL: &str = "[해외 인기 AI 툴]";
pub const PEOPLE_LABEL: &str = "[인물 기사]";
pub const CHANNELS_LABEL: &str = "[유튜브]";
pub const LINKS_LABEL: &str = "[YouTube Links]";
pub const ABBREVIATED_MARKER: &str = "(내용 일부 생략)";

const ELLIPSIS: &str = "...";

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

/// Cut to `limit` chars, reserving three for the ellipsis marker and
/// trimming trailing whitespace before it.
fn shorten(s: &str, limit: usize) -> String {
    if char_len(s) <= limit {
        return s.to_string();
    }
    let cut = truncate_chars(s, limit.saturating_sub(3));
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// One line of item text. Title and description fuse as `"title - desc"`
/// unless the title already appears verbatim in the description; otherwise
/// whichever of the two is non-empty wins.
pub fn make_summary(title: &str, description: &str, limit: usize) -> String {
    let summary = if !title.is_empty() && !description.is_empty() && !description.contains(title) {
        format!("{title} - {description}")
    } else if !title.is_empty() {
        title.to_string()
    } else {
        description.to_string()
    };
    shorten(summary.trim(), limit)
}

/// The URL as display text, shortened to `max_len` chars.
pub fn shorten_link(link: &str, max_len: usize) -> String {
    shorten(link.trim(), max_len)
}

/// Inline anchor markup. The href is escaped as a double-quoted attribute
/// (quotes included); the display text is escaped as plain text, which
/// does not need quote escaping.
pub fn format_link_html(link: &str, max_len: usize) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }
    let short = shorten_link(link, max_len);
    let href = html_escape::encode_double_quoted_attribute(link);
    let text = html_escape::encode_text(&short);
    format!(r#"<a href="{href}">{text}</a>"#)
}

fn push_item_lines(lines: &mut Vec<String>, item: &FeedItem, cfg: &DigestConfig) {
    let summary = make_summary(&item.title, &item.description, cfg.max_summary_length);
    lines.push(format!("- {summary}"));
    let link = format_link_html(&item.link, cfg.max_link_length);
    if !link.is_empty() {
        lines.push(format!("  {link}"));
    }
}

fn popular_section(buckets: &Buckets, cfg: &DigestConfig) -> String {
    let mut lines = vec![POPULAR_LABEL.to_string()];
    if buckets.popular.is_empty() {
        lines.push(NO_NEWS_LINE.to_string());
    } else {
        for item in buckets.popular.iter().take(cfg.max_popular_items) {
            push_item_lines(&mut lines, item, cfg);
        }
    }
    lines.join("\n")
}

/// Assemble the full digest message for `today`. Sections are joined with
/// blank lines; the global budget is applied once at the end.
pub fn render_digest(
    cfg: &DigestConfig,
    buckets: &Buckets,
    videos: &[VideoItem],
    today: NaiveDate,
) -> String {
    let mut sections: Vec<String> = Vec::new();
    sections.push(format!("{} ({})", HEADER_LABEL, today.format("%Y-%m-%d")));

    for tool in &cfg.tools {
        let bucket = buckets.tool(&tool.name);
        let items = &bucket[..bucket.len().min(cfg.max_items_per_tool)];
        let always_shown = cfg.always_shown_tools.iter().any(|n| n == &tool.name);
        if items.is_empty() && !always_shown {
            continue;
        }

        let mut lines = vec![format!("[{}]", tool.name)];
        if items.is_empty() {
            lines.push(NO_NEWS_LINE.to_string());
        } else {
            for item in items {
                push_item_lines(&mut lines, item, cfg);
            }
        }
        sections.push(lines.join("\n"));

        // The popular-tools section piggybacks on the configured anchor
        // tool's section.
        if tool.name == cfg.popular_anchor_tool {
            sections.push(popular_section(buckets, cfg));
        }
    }

    if !buckets.people.is_empty() {
        let mut lines = vec![PEOPLE_LABEL.to_string()];
        for item in buckets.people.iter().take(cfg.max_items_per_tool) {
            push_item_lines(&mut lines, item, cfg);
        }
        sections.push(lines.join("\n"));
    }

    if !videos.is_empty() {
        let mut lines = vec![CHANNELS_LABEL.to_string()];
        for video in videos.iter().take(cfg.max_youtube_items) {
            lines.push(format!("- {}: {}", video.handle, video.title.trim()));
            let link = format_link_html(&video.link, cfg.max_link_length);
            if !link.is_empty() {
                lines.push(format!("  {link}"));
            }
        }
        sections.push(lines.join("\n"));
    }

    if !cfg.youtube_links.is_empty() {
        let mut lines = vec![LINKS_LABEL.to_string()];
        for link in cfg.youtube_links.iter().take(cfg.max_youtube_items) {
            let formatted = format_link_html(link, cfg.max_link_length);
            if formatted.is_empty() {
                lines.push(format!("- {link}"));
            } else {
                lines.push(format!("- {formatted}"));
            }
        }
        sections.push(lines.join("\n"));
    }

    apply_budget(sections.join("\n\n").trim().to_string(), cfg.max_total_chars)
}

/// Hard cap, applied once after all sections are joined. It may cut a
/// section mid-line; that is accepted behavior given the defensive nature
/// of the limit.
fn apply_budget(message: String, max_chars: usize) -> String {
    if char_len(&message) <= max_chars {
        return message;
    }
    let cut = truncate_chars(&message, max_chars.saturating_sub(20));
    format!("{}\n\n{}", cut.trim_end(), ABBREVIATED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_title_dash_description() {
        assert_eq!(make_summary("Title", "Some description", 140), "Title - Some description");
    }

    #[test]
    fn summary_skips_description_containing_title() {
        assert_eq!(make_summary("Claude", "Claude is updated", 140), "Claude");
    }

    #[test]
    fn summary_falls_back_to_nonempty_field() {
        assert_eq!(make_summary("", "only description", 140), "only description");
        assert_eq!(make_summary("only title", "", 140), "only title");
    }

    #[test]
    fn long_summary_is_cut_to_the_limit_with_ellipsis() {
        let long = "x".repeat(200);
        let out = make_summary(&long, "", 140);
        assert_eq!(out.chars().count(), 140);
        assert!(out.ends_with("..."));
        assert!(long.starts_with(out.trim_end_matches("...")));
    }

    #[test]
    fn short_link_is_untouched() {
        assert_eq!(shorten_link("https://a/x", 60), "https://a/x");
    }

    #[test]
    fn href_and_display_text_are_escaped_independently() {
        let html = format_link_html("https://a/x?q=\"1\"&r=2", 60);
        assert!(html.contains(r#"href="https://a/x?q=&quot;1&quot;&amp;r=2""#));
        // display text escapes & but not quotes
        assert!(html.contains(r#">https://a/x?q="1"&amp;r=2<"#));
    }

    #[test]
    fn empty_link_renders_nothing() {
        assert_eq!(format_link_html("  ", 60), "");
    }
}
