//! `folio.toml` configuration.
//!
//! Every table is optional; a missing table takes its defaults, and the
//! `[ordering]` defaults reproduce the site's built-in section order.

use anyhow::{bail, Context, Result};
use folio_core::navigation::NavPolicy;
use folio_core::ordering::OrderingConfig;
use folio_core::search::SearchParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub ordering: OrderingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("./content")
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.mdx".to_string(), "**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_snippet_before")]
    pub snippet_before: usize,
    #[serde(default = "default_snippet_after")]
    pub snippet_after: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            snippet_before: default_snippet_before(),
            snippet_after: default_snippet_after(),
        }
    }
}

fn default_limit() -> usize {
    10
}
fn default_snippet_before() -> usize {
    60
}
fn default_snippet_after() -> usize {
    80
}

impl SearchConfig {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            limit: self.limit,
            snippet_before: self.snippet_before,
            snippet_after: self.snippet_after,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationConfig {
    #[serde(default = "default_policy")]
    pub policy: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
        }
    }
}

fn default_policy() -> String {
    NavPolicy::default().as_str().to_string()
}

impl NavigationConfig {
    pub fn policy(&self) -> Result<NavPolicy> {
        self.policy.parse()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./.folio/state.json")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    /// Default destination for `folio export`; stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Defaults for every table, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.limit < 1 {
            bail!("search.limit must be >= 1");
        }
        self.navigation
            .policy()
            .context("Invalid navigation.policy")?;
        self.ordering
            .validate()
            .context("Invalid [ordering] table")?;
        if self.content.include_globs.is_empty() {
            bail!("content.include_globs must list at least one pattern");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::minimal())
    }
}
