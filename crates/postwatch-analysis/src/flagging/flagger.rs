//! Scale features, run the outlier model, apply the rules.

use postwatch_core::config::RulesConfig;
use postwatch_core::errors::DetectionError;
use postwatch_core::types::EngineeredPost;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::rules::{default_rules, BatchContext, MisinfoRule};
use crate::outliers::{AnomalyScore, FeatureMatrix, IsolationForest, IsolationForestConfig, StandardScaler};

/// Verdicts for a batch, index-aligned with the input posts.
#[derive(Debug, Clone, Default)]
pub struct FlagOutcome {
    pub scores: Vec<AnomalyScore>,
    pub is_anomaly: Vec<bool>,
    pub is_misinformation: Vec<bool>,
    /// Rule ids that fired for each post.
    pub triggers: Vec<Vec<&'static str>>,
    /// Number of posts each rule fired for.
    pub rule_hits: FxHashMap<&'static str, usize>,
    pub context: Option<BatchContext>,
}

impl FlagOutcome {
    pub fn anomaly_count(&self) -> usize {
        self.is_anomaly.iter().filter(|&&a| a).count()
    }

    pub fn misinformation_count(&self) -> usize {
        self.is_misinformation.iter().filter(|&&m| m).count()
    }
}

/// Detector input, one row per post, columns in `DETECTOR_FEATURES` order:
/// engagement rate, emotion intensity, keyword count, sentiment, word count.
/// Non-finite values are replaced with 0.
pub fn detector_matrix(posts: &[EngineeredPost]) -> FeatureMatrix {
    posts
        .iter()
        .map(|p| {
            [
                p.engagement_rate as f64,
                p.emotion_intensity,
                f64::from(p.suspicious_keyword_count),
                p.sentiment_score,
                f64::from(p.word_count),
            ]
            .into_iter()
            .map(|v| if v.is_finite() { v } else { 0.0 })
            .collect()
        })
        .collect()
}

/// Flag a batch with the standard rule set.
pub fn flag_posts(
    posts: &[EngineeredPost],
    detector: &IsolationForestConfig,
    rules: &RulesConfig,
) -> Result<FlagOutcome, DetectionError> {
    flag_posts_with_rules(
        posts,
        detector,
        &default_rules(rules),
        rules.effective_engagement_quantile(),
    )
}

/// Flag a batch with an explicit rule set.
pub fn flag_posts_with_rules(
    posts: &[EngineeredPost],
    detector: &IsolationForestConfig,
    rules: &[MisinfoRule],
    engagement_quantile: f64,
) -> Result<FlagOutcome, DetectionError> {
    if !(0.0..=1.0).contains(&engagement_quantile) {
        return Err(DetectionError::InvalidParameter {
            name: "engagement_quantile",
            message: format!("{engagement_quantile} is outside [0.0, 1.0]"),
        });
    }
    detector.validate()?;

    let raw = detector_matrix(posts);
    let scaled = StandardScaler::fit_transform(&raw)?;
    let scores = IsolationForest::fit_predict(&scaled, detector)?;
    let is_anomaly: Vec<bool> = scores.iter().map(|s| s.is_outlier).collect();

    let ctx = BatchContext::from_posts(posts, engagement_quantile);
    debug!(
        engagement_threshold = ctx.engagement_threshold,
        quantile = engagement_quantile,
        "batch rule context"
    );

    let mut rule_hits: FxHashMap<&'static str, usize> = FxHashMap::default();
    let mut triggers = Vec::with_capacity(posts.len());
    let mut is_misinformation = Vec::with_capacity(posts.len());
    for (post, &anomalous) in posts.iter().zip(&is_anomaly) {
        let fired: Vec<&'static str> = rules
            .iter()
            .filter(|rule| (rule.check)(post, anomalous, &ctx))
            .map(|rule| rule.id)
            .collect();
        for &id in &fired {
            *rule_hits.entry(id).or_default() += 1;
        }
        is_misinformation.push(!fired.is_empty());
        triggers.push(fired);
    }

    let outcome = FlagOutcome {
        scores,
        is_anomaly,
        is_misinformation,
        triggers,
        rule_hits,
        context: Some(ctx),
    };
    info!(
        rows = posts.len(),
        anomalies = outcome.anomaly_count(),
        misinformation = outcome.misinformation_count(),
        "flagging complete"
    );
    Ok(outcome)
}
