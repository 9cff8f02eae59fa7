//! Table of contents from a Markdown body.
//!
//! Collects `##`–`####` headings in document order. Anchor ids follow the
//! GitHub slug rules the site's heading renderer uses, so links line up
//! with the rendered page.

use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 2 through 4.
    pub level: u8,
    pub text: String,
    /// Anchor id, unique within the document.
    pub id: String,
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Headings of levels 2–4 with de-duplicated anchor ids.
pub fn table_of_contents(body: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new_ext(body, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level_number(level), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, text)) = current.take() else {
                    continue;
                };
                let text = text.trim().to_string();
                if !(2..=4).contains(&level) || text.is_empty() {
                    continue;
                }
                let id = unique_id(&mut used, slugify(&text));
                entries.push(TocEntry { level, text, id });
            }
            _ => {}
        }
    }

    entries
}

/// GitHub-style heading slug: lowercase, punctuation dropped, spaces to `-`.
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    match used.get(&base).copied() {
        None => {
            used.insert(base.clone(), 0);
            base
        }
        Some(count) => {
            let next = count + 1;
            used.insert(base.clone(), next);
            let id = format!("{}-{}", base, next);
            used.insert(id.clone(), 0);
            id
        }
    }
}
