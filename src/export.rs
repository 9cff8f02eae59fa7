//! Export the search index as JSON for static site search.
//!
//! Produces one JSON file holding every docs page and blog post with the
//! fields the browser-side search needs, so a statically exported site can
//! run the same scoring without a server.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use folio_core::models::{fingerprint, DocumentRecord};
use folio_core::navigation::Navigator;
use folio_core::readtime::read_time_minutes;

use crate::config::Config;
use crate::content::LoadedContent;

#[derive(Debug, Serialize)]
pub struct ExportData {
    /// Content hash; unchanged content exports the same value.
    pub fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub docs: Vec<ExportEntry>,
    pub blog: Vec<ExportEntry>,
}

#[derive(Debug, Serialize)]
pub struct ExportEntry {
    pub title: String,
    pub url: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub read_time: usize,
}

impl From<&DocumentRecord> for ExportEntry {
    fn from(doc: &DocumentRecord) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
            slug: doc.slug.clone(),
            description: doc.description.clone(),
            content: doc.body.clone(),
            tags: doc.tags.clone(),
            read_time: read_time_minutes(&doc.body),
        }
    }
}

/// Docs in sidebar order, blog newest first.
pub fn build_index(config: &Config, content: &LoadedContent) -> ExportData {
    let navigator = Navigator::new(&content.docs, &config.ordering, Default::default());
    let docs = navigator
        .sequence()
        .iter()
        .map(|d| ExportEntry::from(*d))
        .collect();
    let blog = content.blog.iter().map(ExportEntry::from).collect();

    let mut all = content.docs.clone();
    all.extend(content.blog.iter().cloned());

    ExportData {
        fingerprint: fingerprint(&all),
        generated_at: Utc::now(),
        docs,
        blog,
    }
}

/// Export the index as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(config: &Config, content: &LoadedContent, output: Option<&Path>) -> Result<()> {
    let data = build_index(config, content);
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!(
                "Exported {} docs, {} blog posts to {}",
                data.docs.len(),
                data.blog.len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
