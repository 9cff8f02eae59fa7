//! Client-side relevance search over an in-memory document set.
//!
//! The engine is a pure function of `(query, documents)`; debouncing and
//! keyboard handling belong to whatever UI calls it.
//!
//! # Scoring
//!
//! | Condition | Points |
//! |-----------|--------|
//! | title equals query | 120 |
//! | title starts with query | 80 |
//! | title contains query | 60 |
//! | description contains query | +25 |
//! | slug contains query | +20 |
//! | body contains query | +30 |
//!
//! Title tiers are exclusive (highest applicable only); the other bonuses
//! add on top. Matching is case-insensitive. Documents scoring zero are
//! dropped, the rest are stably sorted by descending score and truncated to
//! [`SearchParams::limit`].

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::DocumentRecord;

pub const SCORE_TITLE_EXACT: u32 = 120;
pub const SCORE_TITLE_PREFIX: u32 = 80;
pub const SCORE_TITLE_CONTAINS: u32 = 60;
pub const SCORE_DESCRIPTION: u32 = 25;
pub const SCORE_SLUG: u32 = 20;
pub const SCORE_BODY: u32 = 30;

/// Marker added where a snippet was cut.
pub const ELLIPSIS: &str = "…";

/// Result cap and snippet window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum results returned.
    pub limit: usize,
    /// Characters kept before the first body match.
    pub snippet_before: usize,
    /// Characters kept after the end of the first body match.
    pub snippet_after: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: 10,
            snippet_before: 60,
            snippet_after: 80,
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body excerpt around the first match, original case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub score: u32,
}

/// Rank `documents` against `query`.
pub fn search(query: &str, documents: &[DocumentRecord], params: &SearchParams) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() || params.limit == 0 {
        return Vec::new();
    }
    let needle = fold_case(query);

    let mut results: Vec<SearchResult> = documents
        .iter()
        .filter_map(|doc| score_document(&needle, doc, params))
        .collect();

    // Vec::sort_by is stable: ties keep input order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(params.limit);
    results
}

fn score_document(needle: &str, doc: &DocumentRecord, params: &SearchParams) -> Option<SearchResult> {
    let title = fold_case(&doc.title);
    let mut score = if title == needle {
        SCORE_TITLE_EXACT
    } else if title.starts_with(needle) {
        SCORE_TITLE_PREFIX
    } else if title.contains(needle) {
        SCORE_TITLE_CONTAINS
    } else {
        0
    };

    if doc
        .description
        .as_deref()
        .is_some_and(|d| fold_case(d).contains(needle))
    {
        score += SCORE_DESCRIPTION;
    }
    if fold_case(&doc.slug).contains(needle) {
        score += SCORE_SLUG;
    }

    let body = fold_case(&doc.body);
    let snippet = body.find(needle).map(|byte_idx| {
        score += SCORE_BODY;
        let char_idx = body[..byte_idx].chars().count();
        extract_snippet(
            &doc.body,
            char_idx,
            needle.chars().count(),
            params.snippet_before,
            params.snippet_after,
        )
    });

    if score == 0 {
        return None;
    }

    Some(SearchResult {
        title: doc.title.clone(),
        url: doc.url.clone(),
        slug: doc.slug.clone(),
        description: doc.description.clone(),
        snippet,
        score,
    })
}

/// Lowercase one character at a time so character positions line up with
/// the original text.
pub fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

/// Window of `body` around a match, whitespace collapsed, ellipsis-marked
/// on whichever side was cut. Positions are in characters.
pub fn extract_snippet(
    body: &str,
    match_start: usize,
    match_len: usize,
    before: usize,
    after: usize,
) -> String {
    let chars: Vec<char> = body.chars().collect();
    let start = match_start.saturating_sub(before).min(chars.len());
    let end = (match_start + match_len + after).min(chars.len());

    let window: String = chars[start..end].iter().collect();
    let mut snippet = whitespace_run().replace_all(&window, " ").into_owned();

    if start > 0 {
        snippet = format!("{} {}", ELLIPSIS, snippet);
    }
    if end < chars.len() {
        snippet = format!("{} {}", snippet, ELLIPSIS);
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collection;

    fn doc(slug: &str, title: &str) -> DocumentRecord {
        DocumentRecord::new(Collection::Docs, slug, title, &format!("/docs/{}", slug))
    }

    fn titles(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_title_tiers_rank_in_order() {
        let mut desc_only = doc("misc/a", "Containers");
        desc_only.description = Some("All about docker".to_string());
        let mut body_only = doc("misc/b", "Runtime notes");
        body_only.body = "We run docker on every host.".to_string();

        let docs = vec![
            body_only,
            doc("x/one", "Using Docker Daily"),
            desc_only,
            doc("x/two", "Docker Compose Guide"),
            doc("x/three", "Docker"),
        ];
        let results = search("docker", &docs, &SearchParams::default());
        assert_eq!(
            titles(&results),
            vec![
                "Docker",
                "Docker Compose Guide",
                "Using Docker Daily",
                "Runtime notes",
                "Containers"
            ]
        );
        assert_eq!(results[0].score, SCORE_TITLE_EXACT);
        assert_eq!(results[1].score, SCORE_TITLE_PREFIX);
        assert_eq!(results[2].score, SCORE_TITLE_CONTAINS);
        assert!(results[2].score > results[3].score);
        assert!(results[2].score > results[4].score);
    }

    #[test]
    fn test_bonuses_are_additive() {
        let mut d = doc("docker/intro", "Docker");
        d.description = Some("Docker basics".to_string());
        d.body = "Install docker first.".to_string();
        let results = search("DOCKER", &[d], &SearchParams::default());
        assert_eq!(
            results[0].score,
            SCORE_TITLE_EXACT + SCORE_DESCRIPTION + SCORE_SLUG + SCORE_BODY
        );
    }

    #[test]
    fn test_non_matching_documents_are_dropped() {
        let docs = vec![doc("a/b", "Alpha"), doc("c/d", "Gamma")];
        assert!(search("zebra", &docs, &SearchParams::default()).is_empty());
    }

    #[test]
    fn test_result_cap_keeps_input_order_for_ties() {
        let docs: Vec<DocumentRecord> = (0..15)
            .map(|i| {
                let mut d = doc(&format!("notes/n{:02}", i), &format!("Note {}", i));
                d.body = "mentions kubernetes once".to_string();
                d
            })
            .collect();
        let results = search("kubernetes", &docs, &SearchParams::default());
        assert_eq!(results.len(), 10);
        let expected: Vec<String> = (0..10).map(|i| format!("notes/n{:02}", i)).collect();
        let got: Vec<String> = results.iter().map(|r| r.slug.clone()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let docs = vec![doc("a/b", "Alpha")];
        assert!(search("", &docs, &SearchParams::default()).is_empty());
        assert!(search("   ", &docs, &SearchParams::default()).is_empty());
        assert!(search("\t\n", &docs, &SearchParams::default()).is_empty());
    }

    #[test]
    fn test_padded_query_is_trimmed_to_exact_title_match() {
        // Surrounding whitespace is dropped before matching, so a padded
        // query scores as the bare word would.
        let docs = vec![doc("a/b", "Alpha")];
        let padded = search("  alpha ", &docs, &SearchParams::default());
        let bare = search("alpha", &docs, &SearchParams::default());
        assert_eq!(padded[0].score, SCORE_TITLE_EXACT);
        assert_eq!(padded, bare);
    }

    #[test]
    fn test_snippet_truncated_both_sides() {
        let mut d = doc("animals/fox", "Animals");
        d.body = format!(
            "{}the quick brown fox jumps over{}",
            "lorem ipsum ".repeat(20),
            " dolor sit".repeat(20)
        );
        let results = search("fox", &[d], &SearchParams::default());
        let snippet = results[0].snippet.as_deref().unwrap();
        assert!(snippet.contains("fox"));
        assert!(snippet.starts_with("… "));
        assert!(snippet.ends_with(" …"));
    }

    #[test]
    fn test_snippet_not_marked_when_whole_body_fits() {
        let mut d = doc("animals/fox", "Animals");
        d.body = "the quick brown fox jumps over".to_string();
        let results = search("FOX", &[d], &SearchParams::default());
        assert_eq!(
            results[0].snippet.as_deref(),
            Some("the quick brown fox jumps over")
        );
    }

    #[test]
    fn test_snippet_collapses_whitespace_and_keeps_case() {
        let mut d = doc("a/b", "Title");
        d.body = "Line one\n\n   The   Quick\tFox".to_string();
        let results = search("quick", &[d], &SearchParams::default());
        assert_eq!(
            results[0].snippet.as_deref(),
            Some("Line one The Quick Fox")
        );
    }

    #[test]
    fn test_snippet_window_sizes() {
        let body = format!("{}MATCH{}", "a".repeat(100), "b".repeat(100));
        let snippet = extract_snippet(&body, 100, 5, 60, 80);
        let inner = snippet
            .trim_start_matches("… ")
            .trim_end_matches(" …");
        assert_eq!(inner.chars().count(), 60 + 5 + 80);
        assert!(inner.starts_with(&"a".repeat(60)));
    }

    #[test]
    fn test_non_ascii_positions_line_up() {
        let mut d = doc("a/b", "Übersicht");
        d.body = "Größe und Überblick über Straße".to_string();
        let results = search("ÜBERBLICK", &[d], &SearchParams::default());
        assert_eq!(results[0].score, SCORE_BODY);
        assert!(results[0].snippet.as_deref().unwrap().contains("Überblick"));
    }

    #[test]
    fn test_zero_limit_returns_nothing() {
        let docs = vec![doc("a/b", "Alpha")];
        let params = SearchParams {
            limit: 0,
            ..SearchParams::default()
        };
        assert!(search("alpha", &docs, &params).is_empty());
    }
}
