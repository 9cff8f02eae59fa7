//! # Folio
//!
//! Content core for a statically exported docs and blog site.
//!
//! Folio compiles a tree of Markdown/MDX files with YAML front matter into
//! typed document records, orders them through a static ordering table,
//! renders the docs sidebar, resolves previous/next links, and runs the
//! relevance search the site's search bar uses. The pure logic lives in
//! [`folio_core`]; this crate adds configuration, filesystem loading, the
//! export format, and the `folio` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌───────────────────────┐
//! │  content/   │──▶│    Loader     │──▶│ folio-core            │
//! │ docs/ blog/ │   │ front matter │   │ hierarchy · sidebar   │
//! └─────────────┘   └──────────────┘   │ navigation · search   │
//!                                      └──────────┬────────────┘
//!                                 ┌───────────────┤
//!                                 ▼               ▼
//!                            ┌─────────┐    ┌────────────┐
//!                            │   CLI   │    │ JSON index │
//!                            │ (folio) │    │  (export)  │
//!                            └─────────┘    └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! folio stats                          # what was loaded
//! folio tree --current /docs/guide/setup
//! folio nav guide/setup
//! folio search "docker" --limit 5
//! folio export --output ./public/search-index.json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`content`] | Filesystem walk and front matter compilation |
//! | [`progress`] | Load progress on stderr |
//! | [`stats`] | Content statistics |
//! | [`tree`] | Sidebar rendering command |
//! | [`nav`] | Previous/next command |
//! | [`search`] | Search command |
//! | [`get`] | Single-document view |
//! | [`export`] | Static search index |
//! | [`state_store`] | JSON-file sidebar state |
//! | [`state_cmd`] | Sidebar state command |

pub mod config;
pub mod content;
pub mod export;
pub mod get;
pub mod nav;
pub mod progress;
pub mod search;
pub mod state_cmd;
pub mod state_store;
pub mod stats;
pub mod tree;
