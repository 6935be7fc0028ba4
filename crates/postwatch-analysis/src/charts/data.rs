//! Aggregates behind the four summary charts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use postwatch_core::constants::UNKNOWN_LINK;
use postwatch_core::types::LabeledPost;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Placeholder shown when no flagged post carries a link.
pub const NO_LINKED_SOURCES: &str = "No suspicious domains with links";

/// Number of sources listed in the top-sources chart.
pub const TOP_SOURCES: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub legitimate: usize,
    pub misinformation: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub misinformation: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

/// Top linked sources among flagged posts, or a placeholder message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopSources {
    Ranked { sources: Vec<SourceCount> },
    Empty { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub classification: ClassificationCounts,
    pub sentiment: SentimentCounts,
    pub daily: Vec<DailyCount>,
    pub top_sources: TopSources,
}

/// Sentiment bucket of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    /// Positive above 0.2, negative below -0.2, else neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.2 {
            Self::Positive
        } else if score < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl SentimentCounts {
    fn record(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Neutral => self.neutral += 1,
            SentimentCategory::Negative => self.negative += 1,
        }
    }
}

pub fn build_chart_data(posts: &[LabeledPost]) -> ChartData {
    let mut classification = ClassificationCounts::default();
    let mut sentiment = SentimentCounts::default();
    let mut daily: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    let mut sources: FxHashMap<&str, usize> = FxHashMap::default();

    for labeled in posts {
        let post = &labeled.post;
        if labeled.is_misinformation {
            classification.misinformation += 1;
        } else {
            classification.legitimate += 1;
        }

        sentiment.record(SentimentCategory::from_score(post.sentiment_score));

        let day = daily.entry(post.timestamp.date()).or_default();
        day.1 += 1;
        if labeled.is_misinformation {
            day.0 += 1;
            if post.source_link != UNKNOWN_LINK {
                *sources.entry(post.source_link.as_str()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<SourceCount> = sources
        .into_iter()
        .map(|(source, count)| SourceCount {
            source: source.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    ranked.truncate(TOP_SOURCES);

    let top_sources = if ranked.is_empty() {
        TopSources::Empty {
            message: NO_LINKED_SOURCES.to_string(),
        }
    } else {
        TopSources::Ranked { sources: ranked }
    };

    ChartData {
        classification,
        sentiment,
        daily: daily
            .into_iter()
            .map(|(date, (misinformation, total))| DailyCount {
                date,
                misinformation,
                total,
            })
            .collect(),
        top_sources,
    }
}
