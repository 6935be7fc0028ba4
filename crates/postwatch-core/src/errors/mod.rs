//! Error handling for postwatch.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod detection_error;
pub mod entity_error;
pub mod error_code;
pub mod ingest_error;
pub mod output_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use entity_error::EntityError;
pub use error_code::PostwatchErrorCode;
pub use ingest_error::IngestError;
pub use output_error::OutputError;
pub use pipeline_error::PipelineError;
