//! Synthetic raw tables with a ground-truth `flagged` column.
//!
//! Legitimate rows come first (`POST_0001` upward), misinformation rows
//! after them, then the whole table is shuffled. The reference instant is
//! passed in so output depends only on the parameters.

use chrono::{Duration, NaiveDateTime, SubsecRound};
use postwatch_core::config::SynthConfig;
use postwatch_core::constants::UNKNOWN_LINK;
use postwatch_core::types::{format_timestamp, RawPost};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::templates::{
    HASHTAG_SUFFIX, LEGITIMATE_DOMAINS, LEGITIMATE_POSTS, MISINFORMATION_POSTS, SUSPICIOUS_DOMAINS,
};

const USER_POOL: u32 = 150;
const WINDOW_DAYS: i64 = 30;

/// Generator parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthParams {
    pub rows: usize,
    /// Share of misinformation rows, clamped to [0, 1].
    pub misinfo_ratio: f64,
    pub seed: u64,
    /// Timestamps fall in the 30 days before this instant.
    pub now: NaiveDateTime,
}

impl SynthParams {
    /// `now` is truncated to whole seconds.
    pub fn from_config(config: &SynthConfig, now: NaiveDateTime) -> Self {
        Self {
            rows: config.effective_rows(),
            misinfo_ratio: config.effective_misinfo_ratio(),
            seed: config.effective_seed(),
            now: now.trunc_subsecs(0),
        }
    }

    /// `floor(rows * ratio)`.
    pub fn misinfo_rows(&self) -> usize {
        (self.rows as f64 * self.misinfo_ratio.clamp(0.0, 1.0)).floor() as usize
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn random_timestamp(rng: &mut StdRng, now: NaiveDateTime) -> String {
    let offset = Duration::days(rng.random_range(0..=WINDOW_DAYS))
        + Duration::hours(rng.random_range(0..=23))
        + Duration::minutes(rng.random_range(0..=59))
        + Duration::seconds(rng.random_range(0..=59));
    format_timestamp(&(now - Duration::days(WINDOW_DAYS) + offset))
}

fn user_id(rng: &mut StdRng) -> String {
    format!("user_{:03}", rng.random_range(1..=USER_POOL))
}

fn legitimate_post(rng: &mut StdRng, id: usize, now: NaiveDateTime) -> RawPost {
    let mut content = pick(rng, &LEGITIMATE_POSTS).to_string();
    if rng.random_bool(0.3) {
        content.push_str(HASHTAG_SUFFIX);
    }
    let user_id = user_id(rng);
    let timestamp = random_timestamp(rng, now);
    let num_shares = rng.random_range(0..=50);
    let num_reactions = rng.random_range(5..=100);
    let source_link = if rng.random_bool(0.4) {
        pick(rng, &LEGITIMATE_DOMAINS)
    } else {
        UNKNOWN_LINK
    };
    RawPost {
        post_id: format!("POST_{id:04}"),
        user_id,
        timestamp: Some(timestamp),
        post_content: Some(content),
        num_shares: Some(num_shares),
        num_reactions: Some(num_reactions),
        source_link: Some(source_link.to_string()),
        sentiment_score: Some(round2(rng.random_range(0.1..=0.9))),
        flagged: Some(false),
    }
}

fn misinformation_post(rng: &mut StdRng, id: usize, now: NaiveDateTime) -> RawPost {
    let template = pick(rng, &MISINFORMATION_POSTS);
    let content = if rng.random_bool(0.5) {
        template.to_uppercase()
    } else {
        template.to_string()
    };
    let user_id = user_id(rng);
    let timestamp = random_timestamp(rng, now);
    let num_shares = rng.random_range(100..=1000);
    let num_reactions = rng.random_range(200..=800);
    let source_link = if rng.random_bool(0.7) {
        pick(rng, &SUSPICIOUS_DOMAINS)
    } else {
        UNKNOWN_LINK
    };
    RawPost {
        post_id: format!("POST_{id:04}"),
        user_id,
        timestamp: Some(timestamp),
        post_content: Some(content),
        num_shares: Some(num_shares),
        num_reactions: Some(num_reactions),
        source_link: Some(source_link.to_string()),
        sentiment_score: Some(round2(rng.random_range(-0.9..=-0.2))),
        flagged: Some(true),
    }
}

/// Generate `params.rows` posts, shuffled. Same params, same table.
pub fn generate_posts(params: &SynthParams) -> Vec<RawPost> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let misinfo = params.misinfo_rows();
    let legit = params.rows - misinfo;

    let mut posts = Vec::with_capacity(params.rows);
    for i in 0..legit {
        posts.push(legitimate_post(&mut rng, i + 1, params.now));
    }
    for i in 0..misinfo {
        posts.push(misinformation_post(&mut rng, legit + i + 1, params.now));
    }
    posts.shuffle(&mut rng);

    info!(
        rows = posts.len(),
        legitimate = legit,
        misinformation = misinfo,
        seed = params.seed,
        "generated synthetic posts"
    );
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use postwatch_core::types::parse_timestamp;
    use rustc_hash::FxHashSet;

    fn params(rows: usize, ratio: f64) -> SynthParams {
        SynthParams {
            rows,
            misinfo_ratio: ratio,
            seed: 42,
            now: parse_timestamp("2024-06-30 12:00:00").unwrap(),
        }
    }

    #[test]
    fn produces_requested_split() {
        let posts = generate_posts(&params(300, 0.15));
        assert_eq!(posts.len(), 300);
        let misinfo = posts.iter().filter(|p| p.flagged == Some(true)).count();
        assert_eq!(misinfo, 45);
    }

    #[test]
    fn config_reference_time_has_whole_seconds() {
        let now = parse_timestamp("2024-06-30 12:00:00.734").unwrap();
        let p = SynthParams::from_config(&SynthConfig::default(), now);
        assert_eq!(p.now, parse_timestamp("2024-06-30 12:00:00").unwrap());
        assert!(generate_posts(&p)
            .iter()
            .all(|post| !post.timestamp.as_deref().unwrap_or_default().contains('.')));
    }

    #[test]
    fn ratio_is_floored() {
        assert_eq!(params(10, 0.15).misinfo_rows(), 1);
        assert_eq!(params(10, 0.0).misinfo_rows(), 0);
        assert_eq!(params(10, 1.0).misinfo_rows(), 10);
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(generate_posts(&params(50, 0.2)), generate_posts(&params(50, 0.2)));
        let mut other = params(50, 0.2);
        other.seed = 7;
        assert_ne!(generate_posts(&params(50, 0.2)), generate_posts(&other));
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let posts = generate_posts(&params(120, 0.25));
        let ids: FxHashSet<&str> = posts.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids.len(), 120);
        assert!(ids.contains("POST_0001"));
        assert!(ids.contains("POST_0120"));
    }

    #[test]
    fn values_stay_in_class_ranges() {
        let p = params(200, 0.3);
        let start = p.now - Duration::days(WINDOW_DAYS);
        let end = p.now + Duration::days(1);
        for post in generate_posts(&p) {
            let ts = parse_timestamp(post.timestamp.as_deref().unwrap()).unwrap();
            assert!(ts >= start && ts < end);
            let sentiment = post.sentiment_score.unwrap();
            let shares = post.num_shares.unwrap();
            let reactions = post.num_reactions.unwrap();
            let link = post.source_link.as_deref().unwrap();
            if post.flagged == Some(true) {
                assert!((-0.9..=-0.2).contains(&sentiment));
                assert!((100..=1000).contains(&shares));
                assert!((200..=800).contains(&reactions));
                assert!(link == UNKNOWN_LINK || SUSPICIOUS_DOMAINS.contains(&link));
            } else {
                assert!((0.1..=0.9).contains(&sentiment));
                assert!(shares <= 50);
                assert!((5..=100).contains(&reactions));
                assert!(link == UNKNOWN_LINK || LEGITIMATE_DOMAINS.contains(&link));
            }
            let user: u32 = post.user_id["user_".len()..].parse().unwrap();
            assert!((1..=USER_POOL).contains(&user));
        }
    }
}
