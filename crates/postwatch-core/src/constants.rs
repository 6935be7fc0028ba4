//! Fixed vocabularies, sentinels, and column orders.
//!
//! Changing anything here changes output files, so downstream consumers
//! must be updated in lockstep.

/// Sentinel stored in `source_link` when a post carries no link.
pub const UNKNOWN_LINK: &str = "UNKNOWN";

/// Entity column value when no annotator is configured.
pub const ENTITIES_UNAVAILABLE: &str = "N/A";

/// Entity column value when the annotator found nothing or the text is missing.
pub const ENTITIES_NONE: &str = "NONE";

/// Keywords counted against the normalized post text.
///
/// Matching is a plain substring test on normalized text. Entries containing
/// an apostrophe or hyphen can never match, because normalization strips
/// those characters; they stay in the list so counts remain comparable with
/// previously produced tables.
pub const SUSPICIOUS_KEYWORDS: [&str; 20] = [
    "breaking",
    "shocking",
    "secret",
    "banned",
    "miracle",
    "urgent",
    "exposed",
    "revealed",
    "hidden",
    "cure",
    "conspiracy",
    "government",
    "cover-up",
    "they don't want you",
    "must see",
    "click now",
    "you won't believe",
    "doctors hate",
    "wake up",
    "share before",
];

/// Columns that must be present in a raw input table.
pub const REQUIRED_RAW_COLUMNS: [&str; 8] = [
    "post_id",
    "user_id",
    "timestamp",
    "post_content",
    "num_shares",
    "num_reactions",
    "source_link",
    "sentiment_score",
];

/// Columns that must be present in a cleaned (engineered) table.
pub const REQUIRED_CLEANED_COLUMNS: [&str; 16] = [
    "post_id",
    "user_id",
    "timestamp",
    "post_content",
    "num_shares",
    "num_reactions",
    "source_link",
    "sentiment_score",
    "post_content_normalized",
    "word_count",
    "contains_link",
    "emotion_intensity",
    "hour_of_day",
    "engagement_rate",
    "suspicious_keyword_count",
    "day_of_week",
];

/// Column order of a raw table written by the generator.
pub const RAW_COLUMNS: [&str; 9] = [
    "post_id",
    "user_id",
    "timestamp",
    "post_content",
    "num_shares",
    "num_reactions",
    "source_link",
    "sentiment_score",
    "flagged",
];

/// Column order of the cleaned table. Matches `EngineeredPost` field order.
pub const CLEANED_COLUMNS: [&str; 17] = [
    "post_id",
    "user_id",
    "timestamp",
    "post_content",
    "num_shares",
    "num_reactions",
    "source_link",
    "sentiment_score",
    "flagged",
    "post_content_normalized",
    "word_count",
    "contains_link",
    "emotion_intensity",
    "hour_of_day",
    "engagement_rate",
    "suspicious_keyword_count",
    "day_of_week",
];

/// Column order of the labeled output table.
pub const LABELED_COLUMNS: [&str; 13] = [
    "post_id",
    "user_id",
    "timestamp",
    "post_content",
    "num_shares",
    "num_reactions",
    "source_link",
    "sentiment_score",
    "suspicious_keyword_count",
    "engagement_rate",
    "is_anomaly",
    "is_misinformation",
    "entities",
];

/// Timestamp format used when writing tables. `%.f` writes nothing for
/// whole seconds and keeps the fraction of a repaired median.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Features fed to the outlier model, in matrix column order.
pub const DETECTOR_FEATURES: [&str; 5] = [
    "engagement_rate",
    "emotion_intensity",
    "suspicious_keyword_count",
    "sentiment_score",
    "word_count",
];
