//! `folio state`: inspect and change the persisted sidebar session state.

use anyhow::Result;

use folio_core::state::SidebarState;

use crate::config::Config;
use crate::state_store::FileStateStore;

/// One change to apply to the stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    ToggleSidebar,
    Open(String),
    Close(String),
    Clear(String),
    Width(u32),
}

/// Apply `change` and save. Returns the new state.
pub fn apply(config: &Config, change: StateChange) -> Result<SidebarState> {
    let mut store = FileStateStore::open(&config.state.path);
    let mut state = SidebarState::load(&store);

    match change {
        StateChange::ToggleSidebar => state.toggle_sidebar(),
        StateChange::Open(key) => state.set_node_open(key.trim_matches('/'), true),
        StateChange::Close(key) => state.set_node_open(key.trim_matches('/'), false),
        StateChange::Clear(key) => state.clear_node(key.trim_matches('/')),
        StateChange::Width(px) => state.set_width(px),
    }

    state.save(&mut store)?;
    tracing::debug!(path = %store.path().display(), "sidebar state saved");
    Ok(state)
}

pub fn run_show(config: &Config) -> Result<()> {
    let store = FileStateStore::open(&config.state.path);
    print_state(&SidebarState::load(&store), config);
    Ok(())
}

pub fn run_change(config: &Config, change: StateChange) -> Result<()> {
    let state = apply(config, change)?;
    print_state(&state, config);
    Ok(())
}

pub fn run_reset(config: &Config) -> Result<()> {
    let mut store = FileStateStore::open(&config.state.path);
    store.reset()?;
    println!("Sidebar state reset.");
    Ok(())
}

fn print_state(state: &SidebarState, config: &Config) {
    println!("state file:  {}", config.state.path.display());
    println!("sidebar:     {}", if state.open { "open" } else { "closed" });
    println!("width:       {}px", state.width);
    if state.overrides.is_empty() {
        println!("overrides:   none");
    } else {
        println!("overrides:");
        for (key, open) in &state.overrides {
            println!("  {:<40} {}", key, if *open { "open" } else { "closed" });
        }
    }
}
