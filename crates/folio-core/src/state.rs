//! Sidebar session state behind a key-value persistence port.
//!
//! State is loaded once at start-up and written back after each change.
//! The backing store is injected: [`MemoryStateStore`] here, a JSON file in
//! the application crate, browser storage in a WASM host.
//!
//! Whether a node is *active* is never stored; it is derived from the
//! current location. Only explicit user toggles live in
//! [`SidebarState::overrides`].

use std::collections::BTreeMap;

use anyhow::Result;

pub const KEY_OPEN: &str = "docs-sidebar-open";
pub const KEY_WIDTH: &str = "docs-sidebar-width";
pub const KEY_OVERRIDES: &str = "docs-sidebar-overrides";

pub const DEFAULT_WIDTH: u32 = 256;
pub const MIN_WIDTH: u32 = 180;
pub const MAX_WIDTH: u32 = 480;

/// String key-value persistence.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Write several values as one change. Stores that persist on every
    /// `set` should override this to write once.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Process-local store for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    values: BTreeMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Sidebar visibility, width, and per-node open/closed overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    pub open: bool,
    pub width: u32,
    /// Node key (`category` or `category/sub/...`) → forced open/closed.
    pub overrides: BTreeMap<String, bool>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            open: true,
            width: DEFAULT_WIDTH,
            overrides: BTreeMap::new(),
        }
    }
}

impl SidebarState {
    /// Read state from `store`; missing or unreadable values use defaults.
    pub fn load<S: StateStore + ?Sized>(store: &S) -> Self {
        let mut state = Self::default();
        if let Some(open) = store.get(KEY_OPEN) {
            state.open = open != "false";
        }
        if let Some(width) = store.get(KEY_WIDTH).and_then(|w| w.parse::<u32>().ok()) {
            state.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        }
        if let Some(raw) = store.get(KEY_OVERRIDES) {
            match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
                Ok(overrides) => state.overrides = overrides,
                Err(e) => tracing::debug!(error = %e, "ignoring unreadable sidebar overrides"),
            }
        }
        state
    }

    /// Write every field to `store` in a single batch.
    pub fn save<S: StateStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let entries = [
            (KEY_OPEN, self.open.to_string()),
            (KEY_WIDTH, self.width.to_string()),
            (KEY_OVERRIDES, serde_json::to_string(&self.overrides)?),
        ];
        store.set_many(&entries)
    }

    pub fn toggle_sidebar(&mut self) {
        self.open = !self.open;
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    /// Force a node open or closed regardless of the current location.
    pub fn set_node_open(&mut self, key: &str, open: bool) {
        self.overrides.insert(key.to_string(), open);
    }

    /// Flip a node relative to how it is currently shown.
    pub fn toggle_node(&mut self, key: &str, currently_open: bool) {
        self.set_node_open(key, !currently_open);
    }

    /// Drop a node's override so it follows the current location again.
    pub fn clear_node(&mut self, key: &str) {
        self.overrides.remove(key);
    }

    pub fn override_for(&self, key: &str) -> Option<bool> {
        self.overrides.get(key).copied()
    }
}
