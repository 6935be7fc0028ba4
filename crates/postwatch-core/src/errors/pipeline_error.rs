//! Pipeline errors.

use super::error_code::PostwatchErrorCode;
use super::{ConfigError, DetectionError, EntityError, IngestError, OutputError};

/// Errors that can occur during a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl PostwatchErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Ingest(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
            Self::Entity(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
        }
    }
}
