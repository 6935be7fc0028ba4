//! Outlier toolkit: batch statistics, feature scaling, and an isolation
//! forest. Every statistic is computed from the batch it is applied to.

pub mod isolation_forest;
pub mod percentile;
pub mod scaler;
pub mod types;

pub use isolation_forest::{IsolationForest, IsolationForestConfig};
pub use percentile::{percentile, quantile};
pub use scaler::StandardScaler;
pub use types::{AnomalyScore, FeatureMatrix};

use postwatch_core::errors::DetectionError;

/// Check that every row of `matrix` has the same width. Returns that width.
pub fn matrix_width(matrix: &[Vec<f64>]) -> Result<usize, DetectionError> {
    let Some(first) = matrix.first() else {
        return Ok(0);
    };
    let expected = first.len();
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != expected {
            return Err(DetectionError::RaggedMatrix {
                row,
                found: values.len(),
                expected,
            });
        }
    }
    Ok(expected)
}
