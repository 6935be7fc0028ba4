//! Suspicious keyword scoring.
//!
//! The score is the number of distinct vocabulary entries that occur at
//! least once as a substring of the normalized text. Repeats do not add.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use postwatch_core::constants::SUSPICIOUS_KEYWORDS;
use std::sync::LazyLock;

static DEFAULT_MATCHER: LazyLock<KeywordMatcher> =
    LazyLock::new(|| KeywordMatcher::new(&SUSPICIOUS_KEYWORDS));

/// Multi-pattern substring matcher over a fixed keyword vocabulary.
pub struct KeywordMatcher {
    automaton: AhoCorasick,
    len: usize,
}

impl KeywordMatcher {
    /// Build a matcher for `keywords`.
    ///
    /// # Panics
    /// Only if the automaton exceeds aho-corasick's size limits, which a
    /// short keyword list cannot reach.
    pub fn new(keywords: &[&str]) -> Self {
        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(keywords)
            .expect("keyword automaton fits in memory");
        Self {
            automaton,
            len: keywords.len(),
        }
    }

    /// Count distinct keywords present anywhere in `text`, overlaps included.
    pub fn count_distinct(&self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let mut seen = vec![false; self.len];
        let mut count = 0;
        for m in self.automaton.find_overlapping_iter(text) {
            let id = m.pattern().as_usize();
            if !seen[id] {
                seen[id] = true;
                count += 1;
            }
        }
        count
    }
}

/// Count distinct suspicious keywords in already-normalized text.
pub fn count_suspicious_keywords(normalized: &str) -> u32 {
    DEFAULT_MATCHER.count_distinct(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize_text;

    #[test]
    fn counts_distinct_not_occurrences() {
        assert_eq!(count_suspicious_keywords("breaking breaking breaking secret"), 2);
    }

    #[test]
    fn case_does_not_matter() {
        assert_eq!(count_suspicious_keywords("BREAKING and Secret"), 2);
    }

    #[test]
    fn scenario_text_scores_four() {
        let normalized = normalize_text(Some("SHOCKING secret government cure!"));
        assert_eq!(count_suspicious_keywords(&normalized), 4);
    }

    #[test]
    fn substring_semantics_match_inside_words() {
        // "secure" contains "cure"; "secretly" contains "secret".
        assert_eq!(count_suspicious_keywords("secure"), 1);
        assert_eq!(count_suspicious_keywords("secretly"), 1);
    }

    #[test]
    fn multi_word_phrases_match() {
        assert_eq!(count_suspicious_keywords("wake up people! click now"), 2);
    }

    #[test]
    fn punctuated_phrases_never_match_normalized_text() {
        let normalized = normalize_text(Some("They don't want you to know about the cover-up"));
        assert_eq!(count_suspicious_keywords(&normalized), 0);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(count_suspicious_keywords(""), 0);
    }

    #[test]
    fn overlapping_keywords_each_count() {
        let matcher = KeywordMatcher::new(&["must see", "see"]);
        assert_eq!(matcher.count_distinct("you must see this"), 2);
    }
}
