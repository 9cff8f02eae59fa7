//! # Folio Core
//!
//! Shared, WASM-safe logic for Folio: document models, the ordering
//! resolver, hierarchy builder, sidebar renderer, sequential navigator,
//! and the relevance search engine.
//!
//! This crate does no filesystem I/O and spawns nothing. Every function is
//! a synchronous computation over an in-memory slice of
//! [`models::DocumentRecord`]s, so it compiles to both native targets and
//! `wasm32-unknown-unknown`.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Document records, navigation links, fingerprints |
//! | [`ordering`] | Section/subsection rank lookups |
//! | [`hierarchy`] | Per-category document tree and its flattened order |
//! | [`sidebar`] | Expand/collapse and link rendering |
//! | [`navigation`] | Previous/next pairs |
//! | [`search`] | Weighted field scoring and snippets |
//! | [`readtime`] | Reading-time estimate |
//! | [`toc`] | Heading table of contents |
//! | [`state`] | Sidebar session state behind a storage port |

pub mod hierarchy;
pub mod models;
pub mod navigation;
pub mod ordering;
pub mod readtime;
pub mod search;
pub mod sidebar;
pub mod state;
pub mod toc;

pub use hierarchy::build_hierarchy;
pub use navigation::prev_next;
pub use readtime::read_time_minutes;
pub use search::search;
pub use sidebar::render_sidebar;
pub use toc::table_of_contents;
