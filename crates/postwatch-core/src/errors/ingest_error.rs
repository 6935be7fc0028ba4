//! Input table errors. All of these abort the run before any output exists.

use super::error_code::{self, PostwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Input file not readable: {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Input {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("Malformed record in {path} at line {line}: {message}")]
    MalformedRecord {
        path: String,
        line: u64,
        message: String,
    },
}

impl PostwatchErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            _ => error_code::INGEST_ERROR,
        }
    }
}
