//! `folio tree`: render the docs sidebar.
//!
//! Expand/collapse comes from the current location plus the overrides
//! stored in the session state file.

use anyhow::Result;
use clap::ValueEnum;

use folio_core::hierarchy::build_hierarchy;
use folio_core::sidebar::{open_all, render_html, render_sidebar, render_text, SidebarItem};
use folio_core::state::SidebarState;

use crate::config::Config;
use crate::content::LoadedContent;
use crate::state_store::FileStateStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Text,
    Html,
    Json,
}

/// Build sidebar items for `current_url` with `state`'s overrides applied.
pub fn sidebar_items(
    config: &Config,
    content: &LoadedContent,
    current_url: &str,
    state: &SidebarState,
) -> Vec<SidebarItem> {
    let hierarchy = build_hierarchy(&content.docs, &config.ordering);
    for skipped in &hierarchy.skipped {
        tracing::warn!(slug = %skipped.slug, reason = %skipped.reason, "left out of sidebar");
    }
    render_sidebar(&hierarchy, current_url, &state.overrides)
}

pub fn run_tree(
    config: &Config,
    content: &LoadedContent,
    current_url: Option<&str>,
    format: TreeFormat,
    expand_all: bool,
) -> Result<()> {
    let store = FileStateStore::open(&config.state.path);
    let state = SidebarState::load(&store);

    let mut items = sidebar_items(config, content, current_url.unwrap_or(""), &state);
    if expand_all {
        open_all(&mut items);
    }

    match format {
        TreeFormat::Text => {
            if items.is_empty() {
                println!("No docs.");
            } else {
                print!("{}", render_text(&items));
            }
        }
        TreeFormat::Html => print!("{}", render_html(&items)),
        TreeFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
    }
    Ok(())
}
