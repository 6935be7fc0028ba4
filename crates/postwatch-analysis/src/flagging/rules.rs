//! Rule-based misinformation checks.
//!
//! Each rule sees the post, its outlier verdict, and statistics of the
//! whole batch. Batch statistics are recomputed for every batch.

use postwatch_core::config::RulesConfig;
use postwatch_core::types::EngineeredPost;

use crate::outliers::quantile;

/// Type alias for rule check functions.
pub type RuleCheckFn = Box<dyn Fn(&EngineeredPost, bool, &BatchContext) -> bool + Send + Sync>;

/// A rule that marks a post as misinformation.
pub struct MisinfoRule {
    /// Rule identifier.
    pub id: &'static str,
    /// Human-readable description.
    pub description: String,
    /// Returns true if the post should be flagged.
    pub check: RuleCheckFn,
}

impl std::fmt::Debug for MisinfoRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MisinfoRule")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Batch statistics provided to rule checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchContext {
    /// Engagement value a post must strictly exceed to count as viral.
    pub engagement_threshold: f64,
    /// Number of posts in the batch.
    pub count: usize,
}

impl BatchContext {
    /// Compute context from a batch, using `engagement_quantile` (0..=1).
    pub fn from_posts(posts: &[EngineeredPost], engagement_quantile: f64) -> Self {
        let engagement: Vec<f64> = posts.iter().map(|p| p.engagement_rate as f64).collect();
        Self {
            engagement_threshold: quantile(&engagement, engagement_quantile),
            count: posts.len(),
        }
    }
}

/// Flag every post the outlier model classified as an outlier.
pub fn anomaly_rule() -> MisinfoRule {
    MisinfoRule {
        id: "anomaly",
        description: "Classified as an outlier by the isolation forest".to_string(),
        check: Box::new(|_post, is_anomaly, _ctx| is_anomaly),
    }
}

/// Flag posts with at least `threshold` distinct suspicious keywords.
pub fn keyword_rule(threshold: u32) -> MisinfoRule {
    MisinfoRule {
        id: "keyword_threshold",
        description: format!("At least {threshold} distinct suspicious keywords"),
        check: Box::new(move |post, _is_anomaly, _ctx| post.suspicious_keyword_count >= threshold),
    }
}

/// Flag negative posts whose engagement is above the batch threshold.
pub fn viral_negative_rule() -> MisinfoRule {
    MisinfoRule {
        id: "viral_negative",
        description: "Engagement above the batch quantile with negative sentiment".to_string(),
        check: Box::new(|post, _is_anomaly, ctx| {
            post.engagement_rate as f64 > ctx.engagement_threshold && post.sentiment_score < 0.0
        }),
    }
}

/// The standard rule set: anomaly, keyword threshold, viral negative.
pub fn default_rules(config: &RulesConfig) -> Vec<MisinfoRule> {
    vec![
        anomaly_rule(),
        keyword_rule(config.effective_keyword_threshold()),
        viral_negative_rule(),
    ]
}
