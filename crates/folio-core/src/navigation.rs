//! Sequential navigator: previous/next links between documents.
//!
//! Both policies start from the hierarchy's total order
//! ([`Hierarchy::flatten`](crate::hierarchy::Hierarchy::flatten)), so prev/next
//! always agrees with what the sidebar shows.
//!
//! | Policy | Neighbours |
//! |--------|------------|
//! | [`NavPolicy::GlobalFlatten`] | immediate predecessor/successor in the flattened sequence |
//! | [`NavPolicy::ContextScoped`] | nearest document with the same parent path; otherwise the nearest sibling context at the same depth, stopping at anything shallower or outside the enclosing node |
//!
//! The default is [`NavPolicy::GlobalFlatten`], which is what the site's
//! page template uses today.

use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::hierarchy::build_hierarchy;
use crate::models::{slug_segments, DocumentRecord, NavLink, PrevNext};
use crate::ordering::OrderingConfig;

/// Which prev/next policy to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavPolicy {
    #[default]
    #[serde(rename = "global")]
    GlobalFlatten,
    #[serde(rename = "context")]
    ContextScoped,
}

impl NavPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavPolicy::GlobalFlatten => "global",
            NavPolicy::ContextScoped => "context",
        }
    }
}

impl FromStr for NavPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(NavPolicy::GlobalFlatten),
            "context" => Ok(NavPolicy::ContextScoped),
            other => bail!("Unknown navigation policy: '{}'. Use global or context.", other),
        }
    }
}

/// Prev/next resolver over one collection.
///
/// Building flattens the hierarchy once; lookups are then linear scans of
/// the sequence. Reuse one navigator when resolving many documents.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    sequence: Vec<&'a DocumentRecord>,
    policy: NavPolicy,
}

impl<'a> Navigator<'a> {
    pub fn new(documents: &'a [DocumentRecord], ordering: &OrderingConfig, policy: NavPolicy) -> Self {
        let sequence = build_hierarchy(documents, ordering).flatten();
        Self { sequence, policy }
    }

    /// Documents in navigation order.
    pub fn sequence(&self) -> &[&'a DocumentRecord] {
        &self.sequence
    }

    pub fn policy(&self) -> NavPolicy {
        self.policy
    }

    /// Neighbours of `current_slug`; both `None` when the slug is unknown.
    pub fn prev_next(&self, current_slug: &str) -> PrevNext {
        let wanted = slug_segments(current_slug);
        if wanted.is_empty() {
            return PrevNext::default();
        }
        let Some(index) = self.sequence.iter().position(|d| d.segments() == wanted) else {
            return PrevNext::default();
        };

        let (previous, next) = match self.policy {
            NavPolicy::GlobalFlatten => (
                index.checked_sub(1).map(|i| self.sequence[i]),
                self.sequence.get(index + 1).copied(),
            ),
            NavPolicy::ContextScoped => self.context_neighbours(index),
        };

        PrevNext {
            previous: previous.map(NavLink::from),
            next: next.map(NavLink::from),
        }
    }

    fn context_neighbours(
        &self,
        index: usize,
    ) -> (Option<&'a DocumentRecord>, Option<&'a DocumentRecord>) {
        let current = self.sequence[index];
        let context = current.context();
        let segments = current.segments();
        // Sibling contexts share everything above the current context.
        let enclosing = &segments[..segments.len().saturating_sub(2)];
        let depth = context_depth(current);

        let before = &self.sequence[..index];
        let after = &self.sequence[index + 1..];

        let previous = before
            .iter()
            .rev()
            .find(|d| d.context() == context)
            .copied()
            .or_else(|| walk_same_depth(before.iter().rev().copied(), enclosing, depth));
        let next = after
            .iter()
            .find(|d| d.context() == context)
            .copied()
            .or_else(|| walk_same_depth(after.iter().copied(), enclosing, depth));

        (previous, next)
    }
}

fn context_depth(doc: &DocumentRecord) -> usize {
    doc.segments().len().saturating_sub(1)
}

/// First document at `depth` under `enclosing`, skipping deeper ones.
///
/// A shallower document, or one outside `enclosing`, ends the walk: the
/// sequence has left the node that holds the sibling contexts.
fn walk_same_depth<'a, I>(docs: I, enclosing: &[&str], depth: usize) -> Option<&'a DocumentRecord>
where
    I: Iterator<Item = &'a DocumentRecord>,
{
    for doc in docs {
        if !doc.segments().starts_with(enclosing) {
            return None;
        }
        let d = context_depth(doc);
        if d < depth {
            return None;
        }
        if d == depth {
            return Some(doc);
        }
    }
    None
}

/// One-shot prev/next lookup.
pub fn prev_next(
    current_slug: &str,
    documents: &[DocumentRecord],
    ordering: &OrderingConfig,
    policy: NavPolicy,
) -> PrevNext {
    Navigator::new(documents, ordering, policy).prev_next(current_slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collection;

    fn doc(slug: &str, order: Option<u32>) -> DocumentRecord {
        let mut d = DocumentRecord::new(Collection::Docs, slug, slug, &format!("/docs/{}", slug));
        d.order = order;
        d
    }

    fn five_docs() -> Vec<DocumentRecord> {
        vec![
            doc("guide/e", Some(5)),
            doc("guide/a", Some(1)),
            doc("guide/c", Some(3)),
            doc("guide/b", Some(2)),
            doc("guide/d", Some(4)),
        ]
    }

    fn title(link: &Option<NavLink>) -> Option<&str> {
        link.as_ref().map(|l| l.title.as_str())
    }

    /// Context tree used by the context-scoped tests.
    ///
    /// Flattened: kb/overview, kb/cloud/aws, kb/cloud/gcp,
    /// kb/platforms/docker, kb/platforms/k8s, kb/notes
    fn context_docs() -> Vec<DocumentRecord> {
        let mut cfg_order = vec![
            doc("kb/overview", Some(0)),
            doc("kb/notes", Some(1)),
            doc("kb/cloud/aws", Some(1)),
            doc("kb/cloud/gcp", Some(2)),
            doc("kb/platforms/docker", Some(1)),
            doc("kb/platforms/k8s", Some(2)),
        ];
        cfg_order.reverse();
        cfg_order
    }

    #[test]
    fn test_default_policy_is_global_flatten() {
        assert_eq!(NavPolicy::default(), NavPolicy::GlobalFlatten);
    }

    #[test]
    fn test_global_boundaries() {
        let docs = five_docs();
        let cfg = OrderingConfig::default();

        let first = prev_next("guide/a", &docs, &cfg, NavPolicy::GlobalFlatten);
        assert_eq!(first.previous, None);
        assert_eq!(title(&first.next), Some("guide/b"));

        let last = prev_next("guide/e", &docs, &cfg, NavPolicy::GlobalFlatten);
        assert_eq!(title(&last.previous), Some("guide/d"));
        assert_eq!(last.next, None);

        let middle = prev_next("guide/c", &docs, &cfg, NavPolicy::GlobalFlatten);
        assert_eq!(title(&middle.previous), Some("guide/b"));
        assert_eq!(title(&middle.next), Some("guide/d"));
        assert_eq!(middle.next.as_ref().unwrap().url, "/docs/guide/d");
    }

    #[test]
    fn test_unknown_slug_has_no_neighbours() {
        let docs = five_docs();
        let cfg = OrderingConfig::default();
        for policy in [NavPolicy::GlobalFlatten, NavPolicy::ContextScoped] {
            assert_eq!(prev_next("guide/missing", &docs, &cfg, policy), PrevNext::default());
            assert_eq!(prev_next("", &docs, &cfg, policy), PrevNext::default());
        }
    }

    #[test]
    fn test_single_document_has_no_neighbours() {
        let docs = vec![doc("guide/only", None)];
        let cfg = OrderingConfig::default();
        for policy in [NavPolicy::GlobalFlatten, NavPolicy::ContextScoped] {
            assert_eq!(prev_next("guide/only", &docs, &cfg, policy), PrevNext::default());
        }
    }

    #[test]
    fn test_global_crosses_categories() {
        let docs = vec![
            doc("knowledge-base/overview", Some(0)),
            doc("guide/setup", Some(1)),
        ];
        let cfg = OrderingConfig::default();
        let nav = prev_next("guide/setup", &docs, &cfg, NavPolicy::GlobalFlatten);
        assert_eq!(title(&nav.next), Some("knowledge-base/overview"));
    }

    #[test]
    fn test_context_same_parent_neighbours() {
        let docs = context_docs();
        let cfg = OrderingConfig::empty();
        let nav = Navigator::new(&docs, &cfg, NavPolicy::ContextScoped);

        let order: Vec<&str> = nav.sequence().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "kb/overview",
                "kb/cloud/aws",
                "kb/cloud/gcp",
                "kb/platforms/docker",
                "kb/platforms/k8s",
                "kb/notes"
            ]
        );

        let aws = nav.prev_next("kb/cloud/aws");
        assert_eq!(title(&aws.next), Some("kb/cloud/gcp"));
    }

    #[test]
    fn test_context_crosses_to_sibling_context_at_same_depth() {
        let docs = context_docs();
        let nav = Navigator::new(&docs, &OrderingConfig::empty(), NavPolicy::ContextScoped);

        let gcp = nav.prev_next("kb/cloud/gcp");
        assert_eq!(title(&gcp.previous), Some("kb/cloud/aws"));
        assert_eq!(title(&gcp.next), Some("kb/platforms/docker"));

        let docker = nav.prev_next("kb/platforms/docker");
        assert_eq!(title(&docker.previous), Some("kb/cloud/gcp"));
        assert_eq!(title(&docker.next), Some("kb/platforms/k8s"));
    }

    #[test]
    fn test_context_stops_at_shallower_document() {
        let docs = context_docs();
        let nav = Navigator::new(&docs, &OrderingConfig::empty(), NavPolicy::ContextScoped);

        // kb/overview sits one level up, right before the first cloud doc.
        let aws = nav.prev_next("kb/cloud/aws");
        assert_eq!(aws.previous, None);

        // kb/notes follows the last platforms doc and is shallower.
        let k8s = nav.prev_next("kb/platforms/k8s");
        assert_eq!(k8s.next, None);
    }

    #[test]
    fn test_context_same_parent_skips_deeper_documents() {
        let docs = context_docs();
        let nav = Navigator::new(&docs, &OrderingConfig::empty(), NavPolicy::ContextScoped);

        let notes = nav.prev_next("kb/notes");
        assert_eq!(title(&notes.previous), Some("kb/overview"));
        assert_eq!(notes.next, None);

        let overview = nav.prev_next("kb/overview");
        assert_eq!(title(&overview.next), Some("kb/notes"));
    }

    #[test]
    fn test_context_does_not_cross_categories() {
        let docs = vec![
            doc("guide/advanced/tips", None),
            doc("knowledge-base/cloud/aws", None),
        ];
        let nav = Navigator::new(&docs, &OrderingConfig::default(), NavPolicy::ContextScoped);

        assert_eq!(nav.prev_next("guide/advanced/tips"), PrevNext::default());
        assert_eq!(nav.prev_next("knowledge-base/cloud/aws"), PrevNext::default());

        // The global policy still links across the boundary.
        let global = prev_next(
            "guide/advanced/tips",
            &docs,
            &OrderingConfig::default(),
            NavPolicy::GlobalFlatten,
        );
        assert_eq!(title(&global.next), Some("knowledge-base/cloud/aws"));
    }

    #[test]
    fn test_context_stays_inside_enclosing_subsection() {
        // cloud/aws and platforms/docker are depth-3 contexts under different
        // depth-2 nodes; the walk must not jump between them.
        let docs = vec![
            doc("kb/cloud/aws/setup", None),
            doc("kb/platforms/docker/setup", None),
        ];
        let nav = Navigator::new(&docs, &OrderingConfig::empty(), NavPolicy::ContextScoped);
        assert_eq!(nav.prev_next("kb/cloud/aws/setup").next, None);
        assert_eq!(nav.prev_next("kb/platforms/docker/setup").previous, None);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("global".parse::<NavPolicy>().unwrap(), NavPolicy::GlobalFlatten);
        assert_eq!("context".parse::<NavPolicy>().unwrap(), NavPolicy::ContextScoped);
        assert!("sideways".parse::<NavPolicy>().is_err());
    }
}
