//! Detection errors.

use super::error_code::{self, PostwatchErrorCode};

/// Errors raised by the outlier model or the rule flagger.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Invalid detector parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Feature matrix is ragged: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl PostwatchErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
