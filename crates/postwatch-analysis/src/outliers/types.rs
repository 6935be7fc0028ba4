//! Core types for outlier detection.

use serde::{Deserialize, Serialize};

/// Row-major feature matrix: one inner vector per post.
pub type FeatureMatrix = Vec<Vec<f64>>;

/// Isolation forest result for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyScore {
    /// Index into the original matrix.
    pub index: usize,
    /// Anomaly score in (0, 1]; values near 1 are easy to isolate.
    pub score: f64,
    /// Signed distance to the contamination threshold; negative means outlier.
    pub decision: f64,
    pub is_outlier: bool,
}
