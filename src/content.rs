//! Content loader: walks the content root and compiles Markdown/MDX files
//! into [`DocumentRecord`]s.
//!
//! Layout under `[content].root`:
//!
//! ```text
//! content/
//! ├── docs/            → Collection::Docs, url /docs/...
//! │   └── guide/setup.mdx
//! └── blog/            → Collection::Blog, url /blog/...
//!     └── hello-world.md
//! ```
//!
//! Each file must open with a YAML front matter block. A file that cannot
//! be compiled is logged and skipped; it never aborts the load.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use walkdir::WalkDir;

use folio_core::models::{sort_by_recent, Collection, DocumentRecord};

use crate::config::ContentConfig;
use crate::progress::{LoadProgressEvent, LoadProgressReporter};

/// Why a single content file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    Io(String),
    MissingFrontMatter,
    Yaml(String),
    MissingTitle,
    BadDate { field: &'static str, value: String },
    EmptySlug,
    DuplicateSlug(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "read failed: {}", e),
            ContentError::MissingFrontMatter => write!(f, "missing front matter block"),
            ContentError::Yaml(e) => write!(f, "front matter is not valid YAML: {}", e),
            ContentError::MissingTitle => write!(f, "front matter has no title"),
            ContentError::BadDate { field, value } => {
                write!(f, "{} is not a date (YYYY-MM-DD or RFC 3339): {}", field, value)
            }
            ContentError::EmptySlug => write!(f, "path yields an empty slug"),
            ContentError::DuplicateSlug(slug) => write!(f, "duplicate slug: {}", slug),
        }
    }
}

impl std::error::Error for ContentError {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    updated_at: Option<String>,
    order: Option<u32>,
    author: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// A file the loader could not compile.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: String,
    pub error: ContentError,
}

/// Every compiled record, split by collection.
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    /// Sorted by slug.
    pub docs: Vec<DocumentRecord>,
    /// Newest first.
    pub blog: Vec<DocumentRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl LoadedContent {
    pub fn collection(&self, collection: Collection) -> &[DocumentRecord] {
        match collection {
            Collection::Docs => &self.docs,
            Collection::Blog => &self.blog,
        }
    }

    /// Look a record up by slug; surrounding slashes are ignored.
    pub fn find(&self, collection: Collection, slug: &str) -> Option<&DocumentRecord> {
        let slug = slug.trim_matches('/');
        self.collection(collection).iter().find(|d| d.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.docs.len() + self.blog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walk `config.root` and compile every matching file.
pub fn load_content(
    config: &ContentConfig,
    progress: &dyn LoadProgressReporter,
) -> Result<LoadedContent> {
    let root = &config.root;
    if !root.exists() {
        bail!("Content root does not exist: {}", root.display());
    }

    progress.report(LoadProgressEvent::Discovering {
        root: root.display().to_string(),
    });

    let include_set = build_globset(&config.include_globs)?;
    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut candidates: Vec<(String, Collection)> = Vec::new();
    let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        let top = rel_str.split('/').next().unwrap_or_default();
        match Collection::from_dir_name(top) {
            Some(collection) => candidates.push((rel_str, collection)),
            None => tracing::debug!(path = %rel_str, "outside docs/ and blog/, ignored"),
        }
    }

    // Sort for deterministic ordering
    candidates.sort();

    let total = candidates.len() as u64;
    let mut loaded = LoadedContent::default();
    let mut seen: HashSet<(Collection, String)> = HashSet::new();

    for (i, (rel_str, collection)) in candidates.iter().enumerate() {
        let result = std::fs::read_to_string(root.join(rel_str))
            .map_err(|e| ContentError::Io(e.to_string()))
            .and_then(|source| parse_document(*collection, rel_str, &source));

        let result = result.and_then(|doc| {
            if seen.insert((doc.collection, doc.slug.clone())) {
                Ok(doc)
            } else {
                Err(ContentError::DuplicateSlug(doc.slug))
            }
        });

        match result {
            Ok(doc) => match doc.collection {
                Collection::Docs => loaded.docs.push(doc),
                Collection::Blog => loaded.blog.push(doc),
            },
            Err(error) => {
                tracing::warn!(path = %rel_str, %error, "skipping content file");
                loaded.skipped.push(SkippedFile {
                    path: rel_str.clone(),
                    error,
                });
            }
        }

        let n = i as u64 + 1;
        if n % 100 == 0 || n == total {
            progress.report(LoadProgressEvent::Parsing { n, total });
        }
    }

    loaded.docs.sort_by(|a, b| a.slug.cmp(&b.slug));
    sort_by_recent(&mut loaded.blog);

    progress.report(LoadProgressEvent::Done {
        loaded: loaded.len() as u64,
        skipped: loaded.skipped.len() as u64,
    });
    tracing::info!(
        docs = loaded.docs.len(),
        blog = loaded.blog.len(),
        skipped = loaded.skipped.len(),
        "content loaded"
    );

    Ok(loaded)
}

/// Compile one file. `relative_path` is relative to the content root and
/// starts with the collection directory.
pub fn parse_document(
    collection: Collection,
    relative_path: &str,
    source: &str,
) -> Result<DocumentRecord, ContentError> {
    let (yaml, body) = split_front_matter(source).ok_or(ContentError::MissingFrontMatter)?;
    let front: FrontMatter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| ContentError::Yaml(e.to_string()))?
    };

    let title = front
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ContentError::MissingTitle)?;

    let flattened = flattened_path(relative_path);
    let slug = flattened
        .strip_prefix(collection.dir_name())
        .unwrap_or(&flattened)
        .trim_matches('/')
        .to_string();
    if slug.split('/').all(|s| s.is_empty()) {
        return Err(ContentError::EmptySlug);
    }

    let mut doc = DocumentRecord::new(collection, &slug, &title, &format!("/{}", flattened));
    doc.description = front.description.filter(|d| !d.trim().is_empty());
    doc.order = front.order;
    doc.published_at = front
        .published_at
        .as_deref()
        .map(|v| parse_date("publishedAt", v))
        .transpose()?;
    doc.updated_at = front
        .updated_at
        .as_deref()
        .map(|v| parse_date("updatedAt", v))
        .transpose()?;
    doc.tags = front.tags;
    doc.author = front.author;
    doc.body = body.to_string();
    Ok(doc)
}

/// Split a leading `---` YAML block from the body.
fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source
        .strip_prefix("---\r\n")
        .or_else(|| source.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// `docs/guide/setup.mdx` → `docs/guide/setup`; `docs/guide/index.md` → `docs/guide`.
pub fn flattened_path(relative_path: &str) -> String {
    let without_ext = match relative_path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => stem,
        _ => relative_path,
    };
    let flattened = without_ext.strip_suffix("/index").unwrap_or(without_ext);
    flattened.trim_matches('/').to_string()
}

fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, ContentError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| ContentError::BadDate {
            field,
            value: value.to_string(),
        })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
