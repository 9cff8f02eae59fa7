//! `folio get`: everything the page template needs for one document.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::models::{Collection, PrevNext};
use folio_core::navigation::Navigator;
use folio_core::readtime::read_time_minutes;
use folio_core::toc::{table_of_contents, TocEntry};

use crate::config::Config;
use crate::content::LoadedContent;

/// A document with its derived page data.
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub collection: Collection,
    pub slug: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub read_time: usize,
    pub toc: Vec<TocEntry>,
    /// Docs only; blog posts have no sequential navigation.
    pub navigation: Option<PrevNext>,
    pub body: String,
}

pub fn get_document(
    config: &Config,
    content: &LoadedContent,
    collection: Collection,
    slug: &str,
) -> Result<DocumentView> {
    let doc = content
        .find(collection, slug)
        .ok_or_else(|| anyhow!("No {} document with slug '{}'", collection, slug))?;

    let navigation = match collection {
        Collection::Docs => {
            let policy = config.navigation.policy()?;
            let navigator = Navigator::new(&content.docs, &config.ordering, policy);
            Some(navigator.prev_next(&doc.slug))
        }
        Collection::Blog => None,
    };

    Ok(DocumentView {
        collection,
        slug: doc.slug.clone(),
        title: doc.title.clone(),
        url: doc.url.clone(),
        description: doc.description.clone(),
        author: doc.author.clone(),
        tags: doc.tags.clone(),
        published_at: doc.published_at,
        updated_at: doc.updated_at,
        read_time: read_time_minutes(&doc.body),
        toc: table_of_contents(&doc.body),
        navigation,
        body: doc.body.clone(),
    })
}

fn format_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// CLI entry point: calls get_document and prints to stdout.
pub fn run_get(
    config: &Config,
    content: &LoadedContent,
    collection: Collection,
    slug: &str,
    json: bool,
) -> Result<()> {
    let view = get_document(config, content, collection, slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("--- Document ---");
    println!("title:        {}", view.title);
    println!("collection:   {}", view.collection);
    println!("slug:         {}", view.slug);
    println!("url:          {}", view.url);
    if let Some(ref description) = view.description {
        println!("description:  {}", description);
    }
    if let Some(ref author) = view.author {
        println!("author:       {}", author);
    }
    if !view.tags.is_empty() {
        println!("tags:         {}", view.tags.join(", "));
    }
    println!("published:    {}", format_date(view.published_at));
    println!("updated:      {}", format_date(view.updated_at));
    println!("read time:    {} min", view.read_time);
    println!();

    if !view.toc.is_empty() {
        println!("--- Contents ({}) ---", view.toc.len());
        for entry in &view.toc {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(2)));
            println!("{}{}  #{}", indent, entry.text, entry.id);
        }
        println!();
    }

    if let Some(ref nav) = view.navigation {
        println!("--- Navigation ---");
        match nav.previous {
            Some(ref link) => println!("previous:     {}  {}", link.title, link.url),
            None => println!("previous:     -"),
        }
        match nav.next {
            Some(ref link) => println!("next:         {}  {}", link.title, link.url),
            None => println!("next:         -"),
        }
        println!();
    }

    println!("--- Body ---");
    println!("{}", view.body);

    Ok(())
}
