//! `folio nav`: previous/next links for one docs page.

use anyhow::{anyhow, Result};

use folio_core::models::{Collection, PrevNext};
use folio_core::navigation::{NavPolicy, Navigator};

use crate::config::Config;
use crate::content::LoadedContent;

/// Resolve prev/next for a docs slug. `policy` overrides `[navigation]`.
pub fn resolve(
    config: &Config,
    content: &LoadedContent,
    slug: &str,
    policy: Option<NavPolicy>,
) -> Result<PrevNext> {
    let policy = match policy {
        Some(p) => p,
        None => config.navigation.policy()?,
    };
    let doc = content
        .find(Collection::Docs, slug)
        .ok_or_else(|| anyhow!("No docs document with slug '{}'", slug))?;

    let navigator = Navigator::new(&content.docs, &config.ordering, policy);
    tracing::debug!(slug = %doc.slug, policy = policy.as_str(), "resolving prev/next");
    Ok(navigator.prev_next(&doc.slug))
}

pub fn run_nav(
    config: &Config,
    content: &LoadedContent,
    slug: &str,
    policy: Option<NavPolicy>,
    json: bool,
) -> Result<()> {
    let pair = resolve(config, content, slug, policy)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pair)?);
        return Ok(());
    }

    match pair.previous {
        Some(link) => println!("previous  {}  {}", link.title, link.url),
        None => println!("previous  -"),
    }
    match pair.next {
        Some(link) => println!("next      {}  {}", link.title, link.url),
        None => println!("next      -"),
    }
    Ok(())
}
