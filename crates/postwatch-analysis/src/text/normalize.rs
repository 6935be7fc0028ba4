//! Post text normalizer.
//!
//! Steps run in a fixed order: lowercase, strip URL-like tokens, drop
//! characters outside `[a-z0-9\s.,!?]`, collapse whitespace. URLs go first
//! so their punctuation never survives into the filtered text.

use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\.\S+").expect("static URL pattern"));

static RE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s.,!?]").expect("static character class"));

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

/// Normalize raw post text. Missing text normalizes to the empty string.
pub fn normalize_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let lowered = text.to_lowercase();
    let without_urls = RE_URL.replace_all(&lowered, "");
    let filtered = RE_DISALLOWED.replace_all(&without_urls, "");
    RE_WHITESPACE.replace_all(&filtered, " ").trim().to_string()
}

/// Whitespace-separated token count; 0 for the empty string.
pub fn word_count(normalized: &str) -> u32 {
    normalized.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn lowercases_and_keeps_allowed_punctuation() {
        assert_eq!(
            normalize_text(Some("BREAKING News, Today! Really?")),
            "breaking news, today! really?"
        );
    }

    #[test]
    fn strips_urls_before_filtering() {
        assert_eq!(
            normalize_text(Some("Read this http://fake.example/x?y=1 now www.bad.site/page ok")),
            "read this now ok"
        );
    }

    #[test]
    fn removes_apostrophes_hyphens_and_symbols() {
        assert_eq!(
            normalize_text(Some("They don't want you to see the cover-up #truth")),
            "they dont want you to see the coverup truth"
        );
    }

    #[test]
    fn drops_non_ascii_letters_and_collapses_whitespace() {
        assert_eq!(
            normalize_text(Some("  Can’t   wait —\tto go\n back!  ")),
            "cant wait to go back!"
        );
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count("shocking secret government cure!"), 4);
        assert_eq!(word_count("one"), 1);
    }
}
