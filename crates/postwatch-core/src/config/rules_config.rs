//! Rule flagger configuration.

use serde::{Deserialize, Serialize};

/// Thresholds for the explicit misinformation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Keyword count at or above which a post is flagged. Default: 3.
    pub keyword_threshold: Option<u32>,
    /// Engagement quantile a negative post must exceed. Default: 0.90.
    pub engagement_quantile: Option<f64>,
}

impl RulesConfig {
    pub fn effective_keyword_threshold(&self) -> u32 {
        self.keyword_threshold.unwrap_or(3)
    }

    pub fn effective_engagement_quantile(&self) -> f64 {
        self.engagement_quantile.unwrap_or(0.90)
    }
}
