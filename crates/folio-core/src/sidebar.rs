//! Sidebar renderer: turns a [`Hierarchy`] into link items for display.
//!
//! A node is *active* when its subtree holds the document at the current
//! location. A node is *open* when the user forced it open, or when it is
//! active and the user has not forced it closed. Both are recomputed on
//! every render; nothing about the current location is stored.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::hierarchy::{Hierarchy, HierarchyNode};
use crate::models::{DocumentRecord, NavLink};

/// One rendered sidebar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SidebarItem {
    Section {
        /// Override key: category, or `category/sub/...`.
        key: String,
        label: String,
        /// Landing page for the section title, if the node has an overview.
        link: Option<NavLink>,
        active: bool,
        open: bool,
        children: Vec<SidebarItem>,
    },
    Link {
        title: String,
        url: String,
        active: bool,
    },
}

impl SidebarItem {
    pub fn is_active(&self) -> bool {
        match self {
            SidebarItem::Section { active, .. } | SidebarItem::Link { active, .. } => *active,
        }
    }
}

/// Render every category of `hierarchy` for the page at `current_url`.
pub fn render_sidebar(
    hierarchy: &Hierarchy<'_>,
    current_url: &str,
    overrides: &BTreeMap<String, bool>,
) -> Vec<SidebarItem> {
    hierarchy
        .categories
        .iter()
        .map(|category| render_node(&category.name, &category.node, current_url, overrides))
        .collect()
}

fn render_node(
    category: &str,
    node: &HierarchyNode<'_>,
    current_url: &str,
    overrides: &BTreeMap<String, bool>,
) -> SidebarItem {
    let key = if node.path.is_empty() {
        category.to_string()
    } else {
        format!("{}/{}", category, node.path.join("/"))
    };
    let active = node.contains_url(current_url);
    let open = overrides.get(&key).copied().unwrap_or(active);
    let link = node
        .root_documents
        .iter()
        .chain(node.docs_here.iter())
        .find(|d| d.is_overview())
        .map(|d| NavLink::from(*d));

    let mut children = Vec::new();
    children.extend(node.root_documents.iter().map(|d| link_item(d, current_url)));
    children.extend(
        node.children
            .iter()
            .map(|child| render_node(category, child, current_url, overrides)),
    );
    children.extend(node.docs_here.iter().map(|d| link_item(d, current_url)));

    SidebarItem::Section {
        key,
        label: display_label(&node.name),
        link,
        active,
        open,
        children,
    }
}

fn link_item(doc: &DocumentRecord, current_url: &str) -> SidebarItem {
    SidebarItem::Link {
        title: doc.title.clone(),
        url: doc.url.clone(),
        active: doc.url == current_url,
    }
}

/// `knowledge-base` → `Knowledge Base`.
pub fn display_label(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Force every section open.
pub fn open_all(items: &mut [SidebarItem]) {
    for item in items {
        if let SidebarItem::Section { open, children, .. } = item {
            *open = true;
            open_all(children);
        }
    }
}

/// Indented outline. `▾`/`▸` mark open/closed sections, `*` the active
/// path; closed sections hide their children.
pub fn render_text(items: &[SidebarItem]) -> String {
    let mut out = String::new();
    write_text(items, 0, &mut out);
    out
}

fn write_text(items: &[SidebarItem], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in items {
        match item {
            SidebarItem::Section {
                label,
                active,
                open,
                children,
                ..
            } => {
                let marker = if *open { '▾' } else { '▸' };
                let _ = writeln!(out, "{}{} {}{}", indent, marker, label, active_mark(*active));
                if *open {
                    write_text(children, depth + 1, out);
                }
            }
            SidebarItem::Link { title, url, active } => {
                let _ = writeln!(out, "{}  {}{}  {}", indent, title, active_mark(*active), url);
            }
        }
    }
}

fn active_mark(active: bool) -> &'static str {
    if active {
        " *"
    } else {
        ""
    }
}

/// Nested `<ul>` markup. Closed sections keep their children but mark the
/// list `hidden` so a client script can expand it without a re-render.
pub fn render_html(items: &[SidebarItem]) -> String {
    let mut out = String::from("<nav class=\"docs-sidebar\">\n");
    write_html(items, 1, &mut out);
    out.push_str("</nav>\n");
    out
}

fn write_html(items: &[SidebarItem], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{}<ul>", indent);
    for item in items {
        match item {
            SidebarItem::Section {
                key,
                label,
                link,
                active,
                open,
                children,
            } => {
                let mut classes = vec!["section"];
                classes.push(if *open { "open" } else { "closed" });
                if *active {
                    classes.push("active");
                }
                let _ = writeln!(
                    out,
                    "{}  <li class=\"{}\" data-key=\"{}\">",
                    indent,
                    classes.join(" "),
                    escape_html(key)
                );
                match link {
                    Some(l) => {
                        let _ = writeln!(
                            out,
                            "{}    <a href=\"{}\">{}</a>",
                            indent,
                            escape_html(&l.url),
                            escape_html(label)
                        );
                    }
                    None => {
                        let _ = writeln!(out, "{}    <span>{}</span>", indent, escape_html(label));
                    }
                }
                if !*open {
                    let _ = writeln!(out, "{}    <div hidden>", indent);
                }
                write_html(children, depth + 2, out);
                if !*open {
                    let _ = writeln!(out, "{}    </div>", indent);
                }
                let _ = writeln!(out, "{}  </li>", indent);
            }
            SidebarItem::Link { title, url, active } => {
                let class = if *active { " class=\"active\"" } else { "" };
                let _ = writeln!(
                    out,
                    "{}  <li><a href=\"{}\"{}>{}</a></li>",
                    indent,
                    escape_html(url),
                    class,
                    escape_html(title)
                );
            }
        }
    }
    let _ = writeln!(out, "{}</ul>", indent);
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
