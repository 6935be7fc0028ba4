//! Core types, errors, config, tracing, and constants for postwatch.
//!
//! Shared by the analysis crate and the CLI. Nothing in here performs I/O on
//! post tables; that lives in `postwatch-analysis`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::PostwatchConfig;
pub use errors::{PipelineError, PostwatchErrorCode};
pub use types::{EngineeredPost, LabeledPost, RawPost};
