//! Tests for error codes and conversions.

use postwatch_core::errors::{
    ConfigError, DetectionError, IngestError, OutputError, PipelineError, PostwatchErrorCode,
};

#[test]
fn test_pipeline_error_delegates_codes() {
    let err: PipelineError = IngestError::MissingColumn {
        path: "posts.csv".to_string(),
        column: "timestamp".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "MISSING_COLUMN");

    let err: PipelineError = IngestError::Unreadable {
        path: "posts.csv".to_string(),
        message: "No such file".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "INGEST_ERROR");

    let err: PipelineError = DetectionError::InvalidParameter {
        name: "contamination",
        message: "must be in (0.0, 0.5]".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "DETECTION_ERROR");

    let err: PipelineError = OutputError::WriteFailed {
        path: "out.csv".to_string(),
        message: "disk full".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "OUTPUT_ERROR");
}

#[test]
fn test_report_string_format() {
    let err = ConfigError::ValidationFailed {
        field: "detector.seed".to_string(),
        message: "bad".to_string(),
    };
    assert_eq!(
        err.report_string(),
        "[CONFIG_ERROR] Config validation failed for detector.seed: bad"
    );
}

#[test]
fn test_missing_column_message_names_column() {
    let err = IngestError::MissingColumn {
        path: "raw.csv".to_string(),
        column: "sentiment_score".to_string(),
    };
    assert!(err.to_string().contains("sentiment_score"));
    assert!(err.to_string().contains("raw.csv"));
}
