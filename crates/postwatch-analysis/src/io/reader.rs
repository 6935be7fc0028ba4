//! Table readers.
//!
//! Headers are validated before any record is decoded, so a missing column
//! is reported by name instead of as a per-row decode failure.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use postwatch_core::constants::{REQUIRED_CLEANED_COLUMNS, REQUIRED_RAW_COLUMNS};
use postwatch_core::errors::IngestError;
use postwatch_core::types::{EngineeredPost, RawPost};
use serde::de::DeserializeOwned;
use tracing::info;

/// Read the raw post table at `path`.
pub fn read_raw_posts(path: &Path) -> Result<Vec<RawPost>, IngestError> {
    let posts = read_table(open(path)?, &path.display().to_string(), &REQUIRED_RAW_COLUMNS)?;
    info!(path = %path.display(), rows = posts.len(), "read raw table");
    Ok(posts)
}

/// Read a cleaned table previously written by the feature engineer.
pub fn read_cleaned_posts(path: &Path) -> Result<Vec<EngineeredPost>, IngestError> {
    let posts = read_table(open(path)?, &path.display().to_string(), &REQUIRED_CLEANED_COLUMNS)?;
    info!(path = %path.display(), rows = posts.len(), "read cleaned table");
    Ok(posts)
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|e| IngestError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Decode every record of a CSV stream, after checking that each of
/// `required` appears in the header row. `label` names the source in errors.
pub fn read_table<T, R>(source: R, label: &str, required: &[&str]) -> Result<Vec<T>, IngestError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| malformed(label, &e))?.clone();
    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(IngestError::MissingColumn {
            path: label.to_string(),
            column: (*column).to_string(),
        });
    }

    reader
        .deserialize()
        .map(|record| record.map_err(|e| malformed(label, &e)))
        .collect()
}

fn malformed(label: &str, err: &csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = err.kind() {
        return IngestError::Unreadable {
            path: label.to_string(),
            message: io.to_string(),
        };
    }
    IngestError::MalformedRecord {
        path: label.to_string(),
        line: err.position().map_or(0, |p| p.line()),
        message: err.to_string(),
    }
}
