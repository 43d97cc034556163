// src/ingest/atom.rs
//! Atom parser, used only for video feeds. Extracts `<entry>` title, the
//! `href` of the `rel="alternate"` link, and `published`. Atom fields are
//! assumed pre-clean, so no tag-stripping here.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ParseError;
use crate::ingest::FeedFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomEntry {
    pub title: String,
    pub link: String,
    pub published: Option<i64>,
}

pub struct AtomFormat;

impl FeedFormat for AtomFormat {
    type Item = AtomEntry;

    fn parse(&self, raw: &str) -> Result<Vec<AtomEntry>, ParseError> {
        parse_entries(raw)
    }
}

fn parse_published(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    OffsetDateTime::parse(text, &Rfc3339)
        .ok()
        .map(|dt| dt.unix_timestamp())
}

/// The alternate-link href, if this `<link>` element carries one.
fn alternate_href(e: &BytesStart) -> Option<String> {
    let mut rel = None;
    let mut href = None;
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"rel" => rel = attr.unescape_value().ok().map(|v| v.into_owned()),
            b"href" => href = attr.unescape_value().ok().map(|v| v.into_owned()),
            _ => {}
        }
    }
    if rel.as_deref() == Some("alternate") {
        href
    } else {
        None
    }
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Published,
}

/// Parse Atom `<entry>` elements in document order (video feeds list the
/// newest upload first). Malformed input is an error here; callers degrade
/// it to an empty sequence.
pub fn parse_entries(raw: &str) -> Result<Vec<AtomEntry>, ParseError> {
    let mut reader = Reader::from_str(raw);
    let mut entries = Vec::new();
    let mut current: Option<AtomEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut raw_published = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"entry" if current.is_none() => current = Some(AtomEntry::default()),
                    b"title" if current.is_some() => {
                        field = Some(Field::Title);
                        text.clear();
                    }
                    b"published" if current.is_some() => {
                        field = Some(Field::Published);
                        text.clear();
                    }
                    b"link" => {
                        if let Some(entry) = current.as_mut() {
                            if let Some(href) = alternate_href(&e) {
                                entry.link = href.trim().to_string();
                            }
                        }
                    }
                    _ => field = None,
                }
            }
            Event::Empty(e) => {
                if let (Some(entry), b"link") = (current.as_mut(), e.local_name().as_ref()) {
                    if let Some(href) = alternate_href(&e) {
                        entry.link = href.trim().to_string();
                    }
                }
            }
            Event::Text(t) => {
                if current.is_some() && field.is_some() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(mut entry) = current.take() {
                        entry.published = parse_published(raw_published.trim());
                        raw_published.clear();
                        entries.push(entry);
                    }
                }
                _ => {
                    if let Some(entry) = current.as_mut() {
                        match field.take() {
                            Some(Field::Title) => entry.title = text.trim().to_string(),
                            Some(Field::Published) => {
                                raw_published = std::mem::take(&mut text);
                            }
                            None => {}
                        }
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}
