//! Ordering resolver: static section/subsection rank tables.
//!
//! Every sibling comparison in Folio goes through this module so that the
//! sidebar, the prev/next navigator and anything else that lists documents
//! agree on one order.
//!
//! # Rank resolution
//!
//! | Lookup | Source |
//! |--------|--------|
//! | [`section_rank`](OrderingConfig::section_rank) | index in `sections` |
//! | [`subsection_rank`](OrderingConfig::subsection_rank) without parent | index in `subsections[section]` |
//! | [`subsection_rank`](OrderingConfig::subsection_rank) with parent | `nested` keys, then `subsections[section]` |
//!
//! Anything unlisted gets [`DEFAULT_RANK`] and sorts after listed entries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::models::{DocumentRecord, DEFAULT_RANK};

/// Static ordering tables, read-only after load.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OrderingConfig {
    /// Top-level section order.
    #[serde(default)]
    pub sections: Vec<String>,
    /// Section name → subsection order.
    #[serde(default)]
    pub subsections: BTreeMap<String, Vec<String>>,
    /// `section.sub[.sub...]` → order of the next level down.
    #[serde(default)]
    pub nested: BTreeMap<String, Vec<String>>,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        let subsections = BTreeMap::from([
            (
                "guide".to_string(),
                to_strings(&[
                    "overview",
                    "getting-started",
                    "adding-content",
                    "features",
                    "customization",
                    "deployment",
                ]),
            ),
            (
                "knowledge-base".to_string(),
                to_strings(&[
                    "overview",
                    "foundations",
                    "platforms",
                    "projects",
                    "architectures",
                    "cicd",
                    "cloud",
                    "toolbox",
                    "notes-and-deep-dives",
                ]),
            ),
        ]);
        Self {
            sections: to_strings(&["guide", "knowledge-base"]),
            subsections,
            nested: BTreeMap::new(),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn position(names: &[String], name: &str) -> Option<u32> {
    names.iter().position(|n| n == name).map(|i| i as u32)
}

impl OrderingConfig {
    /// Empty tables: every rank resolves to [`DEFAULT_RANK`].
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
            subsections: BTreeMap::new(),
            nested: BTreeMap::new(),
        }
    }

    /// Reject names that could never match a slug segment.
    pub fn validate(&self) -> Result<()> {
        for name in &self.sections {
            check_segment("ordering.sections", name)?;
        }
        for (section, names) in &self.subsections {
            check_segment("ordering.subsections", section)?;
            for name in names {
                check_segment(&format!("ordering.subsections.{}", section), name)?;
            }
        }
        for (key, names) in &self.nested {
            if !key.contains('.') {
                bail!(
                    "ordering.nested key '{}' must look like 'section.subsection'",
                    key
                );
            }
            for name in names {
                check_segment(&format!("ordering.nested.\"{}\"", key), name)?;
            }
        }
        Ok(())
    }

    /// Rank of a top-level section.
    pub fn section_rank(&self, section: &str) -> u32 {
        position(&self.sections, section).unwrap_or(DEFAULT_RANK)
    }

    /// Rank of `subsection` among its siblings.
    ///
    /// With a `parent_path` (segments below the section, `/` or `.`
    /// separated, an optional leading section segment is ignored) the nested
    /// table is tried first, in this order:
    ///
    /// 1. `section.<full parent path>`
    /// 2. `section.<last parent segment>`
    /// 3. `section.<each shorter ancestor prefix>`, longest first
    ///
    /// A key that exists but does not list `subsection` is a miss. After the
    /// nested table the flat `subsections[section]` list is consulted, then
    /// [`DEFAULT_RANK`].
    pub fn subsection_rank(&self, section: &str, subsection: &str, parent_path: Option<&str>) -> u32 {
        if let Some(parent) = parent_path {
            let mut parts: Vec<&str> = parent
                .split(['/', '.'])
                .filter(|s| !s.is_empty())
                .collect();
            if parts.first() == Some(&section) {
                parts.remove(0);
            }
            for key in nested_keys(section, &parts) {
                let hit = self
                    .nested
                    .get(&key)
                    .and_then(|names| position(names, subsection));
                if let Some(rank) = hit {
                    return rank;
                }
            }
        }

        self.subsections
            .get(section)
            .and_then(|names| position(names, subsection))
            .unwrap_or(DEFAULT_RANK)
    }

    /// Compare two sibling node names: rank, then name.
    pub fn compare_subsections(
        &self,
        section: &str,
        parent_path: Option<&str>,
        a: &str,
        b: &str,
    ) -> Ordering {
        self.subsection_rank(section, a, parent_path)
            .cmp(&self.subsection_rank(section, b, parent_path))
            .then_with(|| compare_names(a, b))
    }

    /// Compare two categories: rank, then name.
    pub fn compare_sections(&self, a: &str, b: &str) -> Ordering {
        self.section_rank(a)
            .cmp(&self.section_rank(b))
            .then_with(|| compare_names(a, b))
    }
}

fn check_segment(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{} contains an empty name", field);
    }
    if name.contains('/') || name.contains('.') {
        bail!("{} entry '{}' must be a single path segment", field, name);
    }
    Ok(())
}

/// Candidate nested keys for a parent path, in lookup order.
fn nested_keys(section: &str, parts: &[&str]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    if parts.is_empty() {
        return keys;
    }
    let mut push = |suffix: String| {
        let key = format!("{}.{}", section, suffix);
        if !keys.contains(&key) {
            keys.push(key);
        }
    };
    push(parts.join("."));
    if let Some(last) = parts.last() {
        push(last.to_string());
    }
    for len in (1..parts.len()).rev() {
        push(parts[..len].join("."));
    }
    keys
}

/// Alphabetical comparison, case-insensitive first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sibling document order: `order` ascending, overview first, then title.
pub fn compare_documents(a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    a.effective_order()
        .cmp(&b.effective_order())
        .then_with(|| b.is_overview().cmp(&a.is_overview()))
        .then_with(|| compare_names(&a.title, &b.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collection;

    fn doc(slug: &str, title: &str, order: Option<u32>) -> DocumentRecord {
        let mut d = DocumentRecord::new(Collection::Docs, slug, title, &format!("/docs/{}", slug));
        d.order = order;
        d
    }

    fn nested_config() -> OrderingConfig {
        let mut cfg = OrderingConfig::empty();
        cfg.subsections
            .insert("S".to_string(), to_strings(&["W", "X"]));
        cfg.nested
            .insert("S.A.B".to_string(), to_strings(&["X"]));
        cfg.nested
            .insert("S.B".to_string(), to_strings(&["Y", "Z", "X"]));
        cfg.nested
            .insert("S.A".to_string(), to_strings(&["Q", "Q2", "Q3", "X"]));
        cfg
    }

    #[test]
    fn test_section_rank() {
        let cfg = OrderingConfig::default();
        assert_eq!(cfg.section_rank("guide"), 0);
        assert_eq!(cfg.section_rank("knowledge-base"), 1);
        assert_eq!(cfg.section_rank("misc"), DEFAULT_RANK);
    }

    #[test]
    fn test_subsection_rank_flat() {
        let cfg = OrderingConfig::default();
        assert_eq!(cfg.subsection_rank("guide", "features", None), 3);
        assert_eq!(cfg.subsection_rank("guide", "nope", None), DEFAULT_RANK);
        assert_eq!(cfg.subsection_rank("nope", "features", None), DEFAULT_RANK);
    }

    #[test]
    fn test_rank_fallback_full_key_first() {
        let cfg = nested_config();
        assert_eq!(cfg.subsection_rank("S", "X", Some("S/A/B")), 0);
    }

    #[test]
    fn test_rank_fallback_last_segment() {
        let mut cfg = nested_config();
        cfg.nested.remove("S.A.B");
        assert_eq!(cfg.subsection_rank("S", "X", Some("S/A/B")), 2);
    }

    #[test]
    fn test_rank_fallback_ancestor_prefix() {
        let mut cfg = nested_config();
        cfg.nested.remove("S.A.B");
        cfg.nested.remove("S.B");
        assert_eq!(cfg.subsection_rank("S", "X", Some("S/A/B")), 3);
    }

    #[test]
    fn test_rank_fallback_flat_list() {
        let mut cfg = nested_config();
        cfg.nested.clear();
        assert_eq!(cfg.subsection_rank("S", "X", Some("S/A/B")), 1);
    }

    #[test]
    fn test_rank_fallback_sentinel() {
        let mut cfg = nested_config();
        cfg.nested.clear();
        cfg.subsections.clear();
        assert_eq!(cfg.subsection_rank("S", "X", Some("S/A/B")), DEFAULT_RANK);
    }

    #[test]
    fn test_nested_key_without_entry_is_a_miss() {
        let mut cfg = nested_config();
        // S.A.B exists but does not list "W": fall through to the flat table.
        cfg.nested.remove("S.A");
        assert_eq!(cfg.subsection_rank("S", "W", Some("A.B")), 0);
    }

    #[test]
    fn test_nested_ignored_without_parent() {
        let cfg = nested_config();
        assert_eq!(cfg.subsection_rank("S", "X", None), 1);
    }

    #[test]
    fn test_sentinel_order_sorts_last() {
        let ordered = doc("g/zeta", "Zeta", Some(5));
        let unordered = doc("g/alpha", "Alpha", None);
        assert_eq!(compare_documents(&ordered, &unordered), Ordering::Less);
    }

    #[test]
    fn test_overview_priority_on_equal_order() {
        let overview = doc("g/overview", "Zzz", None);
        let other = doc("g/intro", "Aaa", None);
        assert_eq!(compare_documents(&overview, &other), Ordering::Less);

        let overview = doc("g/overview", "Zzz", Some(2));
        let other = doc("g/intro", "Aaa", Some(2));
        assert_eq!(compare_documents(&overview, &other), Ordering::Less);
    }

    #[test]
    fn test_title_breaks_remaining_ties() {
        let a = doc("g/b", "apple", Some(1));
        let b = doc("g/a", "Banana", Some(1));
        assert_eq!(compare_documents(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_validate_rejects_dotted_names() {
        let mut cfg = OrderingConfig::default();
        cfg.sections.push("bad.name".to_string());
        assert!(cfg.validate().is_err());

        let mut cfg = OrderingConfig::default();
        cfg.nested.insert("nodot".to_string(), vec![]);
        assert!(cfg.validate().is_err());

        assert!(OrderingConfig::default().validate().is_ok());
    }
}
