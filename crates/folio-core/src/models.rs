//! Core data models shared by every Folio component.
//!
//! A [`DocumentRecord`] is the atomic content unit: one compiled MDX or
//! Markdown file with its front matter resolved. Records are immutable once
//! loaded; every derived structure (hierarchy, sidebar, navigation, search
//! results) is rebuilt from a slice of them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Rank assigned to anything the ordering configuration does not mention.
pub const DEFAULT_RANK: u32 = 999;

/// Final slug segment that marks the landing document of a section.
pub const OVERVIEW_SEGMENT: &str = "overview";

/// Which content collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Docs,
    Blog,
}

impl Collection {
    /// Directory name under the content root, also the URL prefix.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Docs => "docs",
            Collection::Blog => "blog",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "docs" => Some(Collection::Docs),
            "blog" => Some(Collection::Blog),
            _ => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A compiled content document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub collection: Collection,
    /// `/`-delimited path, unique within the collection.
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Stable link target, e.g. `/docs/guide/setup`.
    pub url: String,
    pub order: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    /// Raw source text (front matter removed).
    pub body: String,
}

impl DocumentRecord {
    /// Minimal record; optional fields start empty.
    pub fn new(collection: Collection, slug: &str, title: &str, url: &str) -> Self {
        Self {
            collection,
            slug: slug.to_string(),
            title: title.to_string(),
            description: None,
            url: url.to_string(),
            order: None,
            published_at: None,
            updated_at: None,
            tags: Vec::new(),
            author: None,
            body: String::new(),
        }
    }

    /// Non-empty slug segments. Empty segments from doubled or trailing
    /// slashes are dropped.
    pub fn segments(&self) -> Vec<&str> {
        slug_segments(&self.slug)
    }

    /// First slug segment.
    pub fn section(&self) -> Option<&str> {
        self.slug.split('/').find(|s| !s.is_empty())
    }

    /// The document's own name (last segment).
    pub fn leaf_name(&self) -> Option<&str> {
        self.slug.rsplit('/').find(|s| !s.is_empty())
    }

    pub fn is_overview(&self) -> bool {
        self.leaf_name() == Some(OVERVIEW_SEGMENT)
    }

    /// Navigation context: slug minus its final segment.
    pub fn context(&self) -> String {
        let segs = self.segments();
        match segs.split_last() {
            Some((_, parent)) => parent.join("/"),
            None => String::new(),
        }
    }

    /// Order value, or [`DEFAULT_RANK`] when unset.
    pub fn effective_order(&self) -> u32 {
        self.order.unwrap_or(DEFAULT_RANK)
    }

    /// Last time the document changed: `updated_at`, else `published_at`.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.published_at)
    }
}

/// Split a slug into its non-empty segments.
pub fn slug_segments(slug: &str) -> Vec<&str> {
    slug.split('/').filter(|s| !s.is_empty()).collect()
}

/// A link target for prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

impl From<&DocumentRecord> for NavLink {
    fn from(doc: &DocumentRecord) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
        }
    }
}

/// Previous/next pair for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// Sort blog-style records newest first by publish date.
///
/// Records without a publish date go last, in slug order.
pub fn sort_by_recent(docs: &mut [DocumentRecord]) {
    docs.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Content fingerprint of a document set.
///
/// Covers every field that affects ordering, navigation or search, so two
/// sets with equal fingerprints produce identical derived structures.
pub fn fingerprint(docs: &[DocumentRecord]) -> String {
    let mut hasher = Sha256::new();
    for doc in docs {
        for field in [
            doc.collection.dir_name(),
            doc.slug.as_str(),
            doc.title.as_str(),
            doc.url.as_str(),
            doc.description.as_deref().unwrap_or(""),
            doc.body.as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(doc.effective_order().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
