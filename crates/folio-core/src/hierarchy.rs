//! Hierarchy builder: groups a flat document list into per-category trees.
//!
//! # Placement
//!
//! For a slug `s0/s1/.../sn`, `s0` is the category and `s1..s(n-1)` is the
//! structural path; the last segment is the document's own name and is never
//! a node key.
//!
//! | Record | Bucket |
//! |--------|--------|
//! | single segment (`guide`) | category `root_documents` |
//! | `overview` directly under the category (`guide/overview`) | category `root_documents` |
//! | anything else, nested overviews included | `docs_here` of its terminal node |
//!
//! Below the category there is no landing bucket: a nested overview only
//! wins an `order` tie inside `docs_here`.
//!
//! # Render order
//!
//! Every node lists its root documents, then its child subsections
//! (recursively), then its same-level documents. [`HierarchyNode::walk`] and
//! [`Hierarchy::flatten`] follow the same order, which is the total order the
//! navigator uses.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::DocumentRecord;
use crate::ordering::{compare_documents, OrderingConfig};

/// One node of a category tree.
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyNode<'a> {
    /// Segment name (the category name at the top).
    pub name: String,
    /// Segments from the category down to this node, category excluded.
    pub path: Vec<String>,
    /// Child subsections, sorted.
    pub children: Vec<HierarchyNode<'a>>,
    /// Landing documents; only a category node has any.
    pub root_documents: Vec<&'a DocumentRecord>,
    /// Documents whose path terminates at this node.
    pub docs_here: Vec<&'a DocumentRecord>,
}

impl<'a> HierarchyNode<'a> {
    /// Documents of this subtree in render order.
    pub fn walk(&self) -> Vec<&'a DocumentRecord> {
        let mut out = Vec::new();
        self.walk_into(&mut out);
        out
    }

    fn walk_into(&self, out: &mut Vec<&'a DocumentRecord>) {
        out.extend(self.root_documents.iter().copied());
        for child in &self.children {
            child.walk_into(out);
        }
        out.extend(self.docs_here.iter().copied());
    }

    /// Whether any document in this subtree links to `url`.
    pub fn contains_url(&self, url: &str) -> bool {
        self.root_documents.iter().any(|d| d.url == url)
            || self.docs_here.iter().any(|d| d.url == url)
            || self.children.iter().any(|c| c.contains_url(url))
    }

    pub fn document_count(&self) -> usize {
        self.root_documents.len()
            + self.docs_here.len()
            + self.children.iter().map(|c| c.document_count()).sum::<usize>()
    }

    pub fn child(&self, name: &str) -> Option<&HierarchyNode<'a>> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A top-level section with its tree.
#[derive(Debug, Clone, Serialize)]
pub struct Category<'a> {
    pub name: String,
    pub rank: u32,
    pub node: HierarchyNode<'a>,
}

/// A record left out of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub slug: String,
    pub reason: String,
}

/// Sorted category trees for one collection.
#[derive(Debug, Clone, Serialize)]
pub struct Hierarchy<'a> {
    pub categories: Vec<Category<'a>>,
    /// Records that could not be placed; logging them is up to the caller.
    pub skipped: Vec<SkippedRecord>,
}

impl<'a> Hierarchy<'a> {
    /// Every placed document in total order.
    pub fn flatten(&self) -> Vec<&'a DocumentRecord> {
        self.categories
            .iter()
            .flat_map(|c| c.node.walk())
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category<'a>> {
        self.categories.iter().find(|c| c.name == name)
    }
}

#[derive(Default)]
struct NodeBuilder<'a> {
    children: BTreeMap<String, NodeBuilder<'a>>,
    root_documents: Vec<&'a DocumentRecord>,
    docs_here: Vec<&'a DocumentRecord>,
}

impl<'a> NodeBuilder<'a> {
    fn insert(&mut self, structural: &[&str], doc: &'a DocumentRecord, is_root: bool) {
        match structural.split_first() {
            Some((head, rest)) => self
                .children
                .entry(head.to_string())
                .or_default()
                .insert(rest, doc, is_root),
            None if is_root => self.root_documents.push(doc),
            None => self.docs_here.push(doc),
        }
    }

    fn finish(
        self,
        name: &str,
        path: Vec<String>,
        category: &str,
        ordering: &OrderingConfig,
    ) -> HierarchyNode<'a> {
        let parent_path = if path.is_empty() {
            None
        } else {
            Some(path.join("/"))
        };

        let mut names: Vec<String> = self.children.keys().cloned().collect();
        names.sort_by(|a, b| ordering.compare_subsections(category, parent_path.as_deref(), a, b));

        let mut builders = self.children;
        let children = names
            .into_iter()
            .filter_map(|child_name| {
                let builder = builders.remove(&child_name)?;
                let mut child_path = path.clone();
                child_path.push(child_name.clone());
                Some(builder.finish(&child_name, child_path, category, ordering))
            })
            .collect();

        let mut root_documents = self.root_documents;
        root_documents.sort_by(|a, b| compare_documents(a, b));
        let mut docs_here = self.docs_here;
        docs_here.sort_by(|a, b| compare_documents(a, b));

        HierarchyNode {
            name: name.to_string(),
            path,
            children,
            root_documents,
            docs_here,
        }
    }
}

/// Build the sorted category trees for one collection.
///
/// Records with no usable slug segments, or whose slug repeats an earlier
/// record's, are reported in [`Hierarchy::skipped`] instead of placed.
pub fn build_hierarchy<'a>(documents: &'a [DocumentRecord], ordering: &OrderingConfig) -> Hierarchy<'a> {
    let mut roots: BTreeMap<String, NodeBuilder<'a>> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for doc in documents {
        let segments = doc.segments();
        let Some((category, rest)) = segments.split_first() else {
            skipped.push(SkippedRecord {
                slug: doc.slug.clone(),
                reason: "slug has no path segments".to_string(),
            });
            continue;
        };

        let normalized = segments.join("/");
        if !seen.insert(normalized.clone()) {
            skipped.push(SkippedRecord {
                slug: doc.slug.clone(),
                reason: format!("duplicate slug '{}'", normalized),
            });
            continue;
        }

        let root = roots.entry(category.to_string()).or_default();
        match rest.split_last() {
            None => root.insert(&[], doc, true),
            Some((_, structural)) => {
                root.insert(structural, doc, structural.is_empty() && doc.is_overview())
            }
        }
    }

    let mut names: Vec<String> = roots.keys().cloned().collect();
    names.sort_by(|a, b| ordering.compare_sections(a, b));

    let categories: Vec<Category<'a>> = names
        .into_iter()
        .filter_map(|name| {
            let builder = roots.remove(&name)?;
            let node = builder.finish(&name, Vec::new(), &name, ordering);
            Some(Category {
                rank: ordering.section_rank(&name),
                name,
                node,
            })
        })
        .collect();

    tracing::debug!(
        categories = categories.len(),
        skipped = skipped.len(),
        "built document hierarchy"
    );

    Hierarchy {
        categories,
        skipped,
    }
}
