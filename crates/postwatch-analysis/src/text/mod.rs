//! Text cleanup and keyword scoring for post content.

pub mod keywords;
pub mod normalize;

pub use keywords::{count_suspicious_keywords, KeywordMatcher};
pub use normalize::{normalize_text, word_count};
