//! Output errors.

use super::error_code::{self, PostwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to serialize {what}: {message}")]
    Serialization { what: String, message: String },
}

impl PostwatchErrorCode for OutputError {
    fn error_code(&self) -> &'static str {
        error_code::OUTPUT_ERROR
    }
}
