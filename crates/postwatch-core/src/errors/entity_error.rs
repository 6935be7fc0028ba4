//! Entity annotator errors. Never fatal: the enrichment step degrades to a sentinel.

use super::error_code::{self, PostwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("Annotator {annotator} unavailable: {message}")]
    Unavailable { annotator: String, message: String },

    #[error("Annotator {annotator} failed: {message}")]
    AnnotationFailed { annotator: String, message: String },

    #[error("Unknown annotator '{0}'")]
    UnknownAnnotator(String),
}

impl PostwatchErrorCode for EntityError {
    fn error_code(&self) -> &'static str {
        error_code::ENTITY_ERROR
    }
}
