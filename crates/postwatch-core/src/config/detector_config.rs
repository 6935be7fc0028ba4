//! Outlier detector configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the isolation-based outlier detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectorConfig {
    /// Expected share of outliers in a batch. Default: 0.15.
    pub contamination: Option<f64>,
    /// Number of trees in the ensemble. Default: 100.
    pub n_estimators: Option<usize>,
    /// Subsample size per tree. Default: min(256, rows).
    pub max_samples: Option<usize>,
    /// Seed for subsampling and split selection. Default: 42.
    pub seed: Option<u64>,
}

impl DetectorConfig {
    pub fn effective_contamination(&self) -> f64 {
        self.contamination.unwrap_or(0.15)
    }

    pub fn effective_n_estimators(&self) -> usize {
        self.n_estimators.unwrap_or(100)
    }

    /// Returns the subsample size for a batch of `rows` rows.
    pub fn effective_max_samples(&self, rows: usize) -> usize {
        self.max_samples.unwrap_or(256).min(rows)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
