//! Per-row repair and feature derivation.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use postwatch_core::constants::UNKNOWN_LINK;
use postwatch_core::types::{parse_timestamp, EngineeredPost, RawPost};
use tracing::{debug, info, warn};

use super::timestamps::{median_timestamp, weekday_name};
use crate::text::{count_suspicious_keywords, normalize_text, word_count};

/// How many cells of each kind were repaired in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairStats {
    pub timestamps_repaired: usize,
    pub sentiment_filled: usize,
    pub links_filled: usize,
    pub counts_filled: usize,
}

impl RepairStats {
    pub fn total(&self) -> usize {
        self.timestamps_repaired + self.sentiment_filled + self.links_filled + self.counts_filled
    }
}

/// Output of [`engineer_posts`]: one engineered post per input row, in input order.
#[derive(Debug, Clone)]
pub struct EngineeredBatch {
    pub posts: Vec<EngineeredPost>,
    pub repairs: RepairStats,
    /// Median of the parseable timestamps; `None` when nothing parsed.
    pub median_timestamp: Option<NaiveDateTime>,
}

/// Repair and engineer a full batch of raw posts.
///
/// The timestamp median is computed once over every parseable timestamp in
/// the batch and used for all rows whose timestamp is missing or invalid.
/// If no timestamp parses at all, the Unix epoch is used instead.
pub fn engineer_posts(raw: Vec<RawPost>) -> EngineeredBatch {
    let parsed: Vec<Option<NaiveDateTime>> = raw
        .iter()
        .map(|r| r.timestamp.as_deref().and_then(parse_timestamp))
        .collect();

    let valid: Vec<NaiveDateTime> = parsed.iter().flatten().copied().collect();
    let invalid = parsed.len() - valid.len();
    let median = median_timestamp(&valid);
    let fallback = match median {
        Some(m) => m,
        None => {
            if !raw.is_empty() {
                warn!(rows = raw.len(), "no parseable timestamps in batch, using Unix epoch");
            }
            DateTime::<Utc>::UNIX_EPOCH.naive_utc()
        }
    };
    if invalid > 0 {
        warn!(
            rows = invalid,
            replacement = %fallback,
            "replacing unparseable timestamps with batch median"
        );
    }

    let mut repairs = RepairStats {
        timestamps_repaired: invalid,
        ..RepairStats::default()
    };

    let posts: Vec<EngineeredPost> = raw
        .into_iter()
        .zip(parsed)
        .map(|(row, ts)| engineer_row(row, ts.unwrap_or(fallback), &mut repairs))
        .collect();

    debug!(?repairs, "repair summary");
    info!(rows = posts.len(), repaired_cells = repairs.total(), "feature engineering complete");

    EngineeredBatch {
        posts,
        repairs,
        median_timestamp: median,
    }
}

fn engineer_row(row: RawPost, timestamp: NaiveDateTime, repairs: &mut RepairStats) -> EngineeredPost {
    let source_link = match row.source_link {
        Some(link) => link,
        None => {
            repairs.links_filled += 1;
            UNKNOWN_LINK.to_string()
        }
    };
    let sentiment_score = row.sentiment_score.unwrap_or_else(|| {
        repairs.sentiment_filled += 1;
        0.0
    });
    let num_shares = row.num_shares.unwrap_or_else(|| {
        repairs.counts_filled += 1;
        0
    });
    let num_reactions = row.num_reactions.unwrap_or_else(|| {
        repairs.counts_filled += 1;
        0
    });

    let normalized = normalize_text(row.post_content.as_deref());
    let words = word_count(&normalized);
    let keywords = count_suspicious_keywords(&normalized);

    EngineeredPost {
        post_id: row.post_id,
        user_id: row.user_id,
        timestamp,
        post_content: row.post_content,
        num_shares,
        num_reactions,
        contains_link: source_link != UNKNOWN_LINK,
        source_link,
        sentiment_score,
        flagged: row.flagged,
        post_content_normalized: normalized,
        word_count: words,
        emotion_intensity: sentiment_score.abs(),
        hour_of_day: timestamp.hour(),
        engagement_rate: num_shares.saturating_add(num_reactions),
        suspicious_keyword_count: keywords,
        day_of_week: weekday_name(&timestamp).to_string(),
    }
}
