//! `folio search`: run the relevance engine over one collection and print
//! ranked hits.

use anyhow::{bail, Result};

use folio_core::models::Collection;
use folio_core::search::{search, SearchResult};

use crate::config::Config;
use crate::content::LoadedContent;

/// Search `collection`, honouring `[search]` with an optional limit override.
pub fn search_collection(
    config: &Config,
    content: &LoadedContent,
    query: &str,
    collection: Collection,
    limit: Option<usize>,
) -> Result<Vec<SearchResult>> {
    let mut params = config.search.params();
    if let Some(limit) = limit {
        if limit == 0 {
            bail!("--limit must be >= 1");
        }
        params.limit = limit;
    }
    Ok(search(query, content.collection(collection), &params))
}

/// CLI entry point: search and print to stdout.
pub fn run_search(
    config: &Config,
    content: &LoadedContent,
    query: &str,
    collection: Collection,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let results = search_collection(config, content, query, collection, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, result.score, result.title);
        println!("    url: {}", result.url);
        if let Some(ref description) = result.description {
            println!("    description: {}", description);
        }
        if let Some(ref snippet) = result.snippet {
            println!("    excerpt: \"{}\"", snippet);
        }
        println!();
    }

    Ok(())
}
