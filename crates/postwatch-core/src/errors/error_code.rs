//! Stable error codes reported at the CLI boundary.

/// Every error enum implements this to expose a machine-readable code.
pub trait PostwatchErrorCode {
    /// Returns the error code string (e.g., "INGEST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const ENTITY_ERROR: &str = "ENTITY_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
