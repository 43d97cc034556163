// src/ingest/rss.rs
//! RSS parser. Walks the document as a quick-xml event stream so `<item>`
//! elements are picked up at any nesting depth, and tolerates the
//! entity-encoded HTML payloads search feeds put inside `description`.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ParseError;
use crate::ingest::types::FeedItem;
use crate::ingest::{strip_tags, FeedFormat};
use crate::rank;

pub struct RssFormat;

impl FeedFormat for RssFormat {
    type Item = FeedItem;

    fn parse(&self, raw: &str) -> Result<Vec<FeedItem>, ParseError> {
        parse_items(raw)
    }
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

#[derive(Default)]
struct RawItem {
    title: String,
    link: String,
    description: String,
    pub_date: String,
}

impl RawItem {
    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Link => self.link = value,
            Field::Description => self.description = value,
            Field::PubDate => self.pub_date = value,
        }
    }

    fn finish(self) -> FeedItem {
        FeedItem {
            title: strip_tags(&self.title),
            link: self.link.trim().to_string(),
            description: strip_tags(&self.description),
            published: rank::parse_pub_date(self.pub_date.trim()),
        }
    }
}

fn field_for(name: &[u8]) -> Option<Field> {
    match name {
        b"title" => Some(Field::Title),
        b"link" => Some(Field::Link),
        b"description" => Some(Field::Description),
        b"pubDate" => Some(Field::PubDate),
        _ => None,
    }
}

/// Parse RSS `<item>` elements into normalized items. Missing fields stay
/// empty. A malformed document is an error here; callers degrade it to an
/// empty sequence.
pub fn parse_items(raw: &str) -> Result<Vec<FeedItem>, ParseError> {
    let mut reader = Reader::from_str(raw);
    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if current.is_none() {
                    if name.as_ref() == b"item" {
                        current = Some(RawItem::default());
                    }
                } else {
                    field = field_for(name.as_ref());
                    text.clear();
                }
            }
            Event::Text(t) => {
                if current.is_some() && field.is_some() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if current.is_some() && field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item.finish());
                    }
                } else if let Some(item) = current.as_mut() {
                    if let Some(f) = field.take() {
                        item.set(f, std::mem::take(&mut text));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>search feed</title>
    <item>
      <title>Claude 4 &amp; friends</title>
      <link> https://example.test/a </link>
      <description><![CDATA[<b>Anthropic</b> ships &quot;Claude&quot; update]]></description>
      <pubDate>Mon, 15 Jan 2024 12:00:00 +0900</pubDate>
    </item>
    <item>
      <title>No date</title>
      <link>https://example.test/b</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_with_stripped_fields() {
        let items = parse_items(FIXTURE).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Claude 4 & friends");
        assert_eq!(items[0].link, "https://example.test/a");
        assert_eq!(items[0].description, "Anthropic ships \"Claude\" update");
        assert!(items[0].published.is_some());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let items = parse_items(FIXTURE).unwrap();
        assert_eq!(items[1].description, "");
        assert_eq!(items[1].published, None);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_items("<rss><channel><item><title>x</wrong></item></channel></rss>").is_err());
    }

    #[test]
    fn no_items_yields_empty_sequence() {
        let items = parse_items("<rss><channel></channel></rss>").unwrap();
        assert!(items.is_empty());
    }
}
