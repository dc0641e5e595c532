//! In-page outline extraction.
//!
//! The outline is the table of contents shown next to an article: every level 2 to 4 heading
//! in the body, in document order, with an anchor id derived from the heading text.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::split_frontmatter;

/// One heading in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Anchor id, unique within the document.
    pub id: String,
    /// Heading text with inline markup removed.
    pub title: String,
    /// Heading level (2-4).
    pub level: u8,
}

/// Extracts the outline from a document's raw content.
///
/// A leading front-matter block is skipped so its delimiters are not mistaken for setext
/// headings.
pub fn extract_outline(content: &str) -> Vec<OutlineEntry> {
    let body = split_frontmatter(content).map_or(content, |(_, body)| body);

    let mut entries = Vec::new();
    let mut ids = AnchorIds::default();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = heading_level_to_u8(level);
                if (2..=4).contains(&level) {
                    current = Some((level, String::new()));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut title)) = current {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current.take() {
                    let title = title.trim().to_string();
                    entries.push(OutlineEntry {
                        id: ids.next(&title),
                        title,
                        level,
                    });
                }
            }
            _ => {}
        }
    }

    entries
}

/// Derives the base anchor id for a heading.
///
/// Lowercases the text, replaces every run of characters outside `[a-z0-9]` with a single
/// hyphen, and trims hyphens from both ends.
pub fn outline_id(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !id.is_empty() {
                id.push('-');
            }
            pending_hyphen = false;
            id.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    id
}

/// Hands out unique anchor ids within one document.
#[derive(Debug, Default)]
struct AnchorIds {
    /// How many times each base id has been handed out.
    counts: HashMap<String, usize>,
}

impl AnchorIds {
    /// Returns the id for `title`, suffixed with `-N` if the base id was seen before.
    fn next(&mut self, title: &str) -> String {
        let base = outline_id(title);
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{}-{}", base, *count - 1)
        }
    }
}

/// Converts a pulldown_cmark HeadingLevel to a u8 (1-6).
fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
