//! Built-in annotator: a fixed gazetteer plus date and number patterns.
//!
//! Overlapping candidates resolve leftmost first, then longest, then by
//! source priority (gazetteer, temporal, percent, cardinal).

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use postwatch_core::errors::EntityError;
use regex::Regex;
use std::sync::LazyLock;

use super::annotator::{EntityAnnotator, EntitySpan};

/// Matched case-sensitively so "who", "un" and "max" stay ordinary words.
const CASE_SENSITIVE: &[(&str, &str)] = &[
    ("NASA", "ORG"),
    ("WHO", "ORG"),
    ("UN", "ORG"),
    ("BBC", "ORG"),
    ("CNN", "ORG"),
    ("FDA", "ORG"),
    ("CDC", "ORG"),
    ("Max", "PERSON"),
];

/// Names matched case-insensitively.
const NAMES: &[(&str, &str)] = &[
    ("ABC Company", "ORG"),
    ("Big Pharma", "ORG"),
    ("Reuters", "ORG"),
    ("Forbes", "ORG"),
    ("Bloomberg", "ORG"),
    ("The Guardian", "ORG"),
    ("New York Times", "ORG"),
    ("Wikipedia", "ORG"),
    ("National Geographic", "ORG"),
    ("Bill Gates", "PERSON"),
    ("Japan", "GPE"),
    ("China", "GPE"),
    ("United States", "GPE"),
    ("Earth", "LOC"),
    ("COVID-19", "DISEASE"),
];

static RE_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").ok());

static RE_DATE_WORDS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:today|yesterday|tomorrow|this weekend|this week|next week)\b").ok()
});

static RE_TIME_WORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:tonight|last night|this morning)\b").ok());

static RE_PERCENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?%").ok());

static RE_CARDINAL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\d+\b").ok());

#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    end: usize,
    label: &'static str,
    priority: u8,
}

/// Gazetteer and pattern annotator. Cheap to construct, no external model.
pub struct GazetteerAnnotator {
    exact: AhoCorasick,
    names: AhoCorasick,
}

impl GazetteerAnnotator {
    /// Build the automata.
    pub fn try_new() -> Result<Self, EntityError> {
        let build = |patterns: &[(&str, &str)], case_insensitive: bool| {
            AhoCorasickBuilder::new()
                .ascii_case_insensitive(case_insensitive)
                .match_kind(MatchKind::LeftmostLongest)
                .build(patterns.iter().map(|(p, _)| p))
                .map_err(|e| EntityError::Unavailable {
                    annotator: "gazetteer".to_string(),
                    message: e.to_string(),
                })
        };
        Ok(Self {
            exact: build(CASE_SENSITIVE, false)?,
            names: build(NAMES, true)?,
        })
    }

    fn gazetteer_candidates(&self, text: &str, out: &mut Vec<Candidate>) {
        for (automaton, table) in [(&self.exact, CASE_SENSITIVE), (&self.names, NAMES)] {
            for m in automaton.find_iter(text) {
                if is_word_bounded(text, m.start(), m.end()) {
                    out.push(Candidate {
                        start: m.start(),
                        end: m.end(),
                        label: table[m.pattern().as_usize()].1,
                        priority: 0,
                    });
                }
            }
        }
    }
}

impl EntityAnnotator for GazetteerAnnotator {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn annotate(&self, text: &str) -> Result<Vec<EntitySpan>, EntityError> {
        let mut candidates = Vec::new();
        self.gazetteer_candidates(text, &mut candidates);

        for (pattern, label, priority) in [
            (&RE_YEAR, "DATE", 1),
            (&RE_DATE_WORDS, "DATE", 1),
            (&RE_TIME_WORDS, "TIME", 1),
            (&RE_PERCENT, "PERCENT", 2),
            (&RE_CARDINAL, "CARDINAL", 3),
        ] {
            let Some(re) = pattern.as_ref() else {
                return Err(EntityError::Unavailable {
                    annotator: "gazetteer".to_string(),
                    message: format!("{label} pattern failed to compile"),
                });
            };
            for m in re.find_iter(text) {
                candidates.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    label,
                    priority,
                });
            }
        }

        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then((b.end - b.start).cmp(&(a.end - a.start)))
                .then(a.priority.cmp(&b.priority))
        });

        let mut spans = Vec::new();
        let mut covered_until = 0;
        for c in candidates {
            if c.start < covered_until {
                continue;
            }
            covered_until = c.end;
            spans.push(EntitySpan::new(&text[c.start..c.end], c.label));
        }
        Ok(spans)
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
