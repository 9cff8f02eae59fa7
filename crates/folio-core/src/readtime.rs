//! Reading-time estimate for a document body.

use std::sync::OnceLock;

use regex::Regex;

/// Average reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

struct Patterns {
    fenced_code: Regex,
    inline_code: Regex,
    link: Regex,
    markup: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        fenced_code: Regex::new(r"(?s)```.*?```").expect("fenced code pattern"),
        inline_code: Regex::new(r"`[^`]+`").expect("inline code pattern"),
        link: Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern"),
        markup: Regex::new(r"[#*_~`]").expect("markup pattern"),
    })
}

/// Words of prose in a Markdown body: code is dropped, links count by
/// their text only.
pub fn word_count(content: &str) -> usize {
    let p = patterns();
    let text = p.fenced_code.replace_all(content, "");
    let text = p.inline_code.replace_all(&text, "");
    let text = p.link.replace_all(&text, "$1");
    let text = p.markup.replace_all(&text, "");
    text.split_whitespace().count()
}

/// Estimated minutes to read `content`.
///
/// Empty content is 0; anything else is at least 1.
pub fn read_time_minutes(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    word_count(content).div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(read_time_minutes(""), 0);
    }

    #[test]
    fn test_short_content_is_one_minute() {
        assert_eq!(read_time_minutes("Hello there."), 1);
        assert_eq!(read_time_minutes("```\nonly code\n```"), 1);
    }

    #[test]
    fn test_rounds_up() {
        let body = "word ".repeat(201);
        assert_eq!(read_time_minutes(&body), 2);
        let body = "word ".repeat(400);
        assert_eq!(read_time_minutes(&body), 2);
    }

    #[test]
    fn test_code_and_links_are_not_words() {
        let body = "Read [the docs](https://example.com/a/b) then run `cargo build`.\n\n```rust\nfn main() {}\n```\n## Done";
        // Read, the, docs, then, run, ., Done
        assert_eq!(word_count(body), 7);
    }
}
