//! Table writers. Every file is written to a sibling temporary path and
//! renamed into place once complete, so a failed run never leaves a
//! truncated table behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use postwatch_core::constants::{CLEANED_COLUMNS, LABELED_COLUMNS, RAW_COLUMNS};
use postwatch_core::errors::OutputError;
use postwatch_core::types::{format_timestamp, serialize_title_bool, EngineeredPost, LabeledPost, RawPost};
use serde::Serialize;
use tracing::{debug, info};

/// One row of the labeled table, in output column order.
#[derive(Serialize)]
struct LabeledRow<'a> {
    post_id: &'a str,
    user_id: &'a str,
    timestamp: String,
    post_content: Option<&'a str>,
    num_shares: u64,
    num_reactions: u64,
    source_link: &'a str,
    sentiment_score: f64,
    suspicious_keyword_count: u32,
    engagement_rate: u64,
    #[serde(serialize_with = "serialize_title_bool")]
    is_anomaly: bool,
    #[serde(serialize_with = "serialize_title_bool")]
    is_misinformation: bool,
    entities: &'a str,
}

impl<'a> From<&'a LabeledPost> for LabeledRow<'a> {
    fn from(labeled: &'a LabeledPost) -> Self {
        let p = &labeled.post;
        Self {
            post_id: &p.post_id,
            user_id: &p.user_id,
            timestamp: format_timestamp(&p.timestamp),
            post_content: p.post_content.as_deref(),
            num_shares: p.num_shares,
            num_reactions: p.num_reactions,
            source_link: &p.source_link,
            sentiment_score: p.sentiment_score,
            suspicious_keyword_count: p.suspicious_keyword_count,
            engagement_rate: p.engagement_rate,
            is_anomaly: labeled.is_anomaly,
            is_misinformation: labeled.is_misinformation,
            entities: &labeled.entities,
        }
    }
}

pub fn write_raw_posts(path: &Path, posts: &[RawPost]) -> Result<(), OutputError> {
    write_atomic(path, &render_table("raw table", &RAW_COLUMNS, posts)?)?;
    info!(path = %path.display(), rows = posts.len(), "wrote raw table");
    Ok(())
}

pub fn write_cleaned_posts(path: &Path, posts: &[EngineeredPost]) -> Result<(), OutputError> {
    write_atomic(path, &render_cleaned_posts(posts)?)?;
    info!(path = %path.display(), rows = posts.len(), "wrote cleaned table");
    Ok(())
}

pub fn write_labeled_posts(path: &Path, posts: &[LabeledPost]) -> Result<(), OutputError> {
    write_atomic(path, &render_labeled_posts(posts)?)?;
    info!(path = %path.display(), rows = posts.len(), "wrote labeled table");
    Ok(())
}

/// Cleaned table as CSV bytes.
pub fn render_cleaned_posts(posts: &[EngineeredPost]) -> Result<Vec<u8>, OutputError> {
    render_table("cleaned table", &CLEANED_COLUMNS, posts)
}

/// Labeled table as CSV bytes.
pub fn render_labeled_posts(posts: &[LabeledPost]) -> Result<Vec<u8>, OutputError> {
    render_table("labeled table", &LABELED_COLUMNS, posts.iter().map(LabeledRow::from))
}

/// Header row first, even for an empty table.
fn render_table<T, I>(what: &str, header: &[&str], rows: I) -> Result<Vec<u8>, OutputError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header).map_err(|e| serialization(what, &e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| serialization(what, &e))?;
    }
    writer.into_inner().map_err(|e| OutputError::Serialization {
        what: what.to_string(),
        message: e.to_string(),
    })
}

/// Write `contents` to `path` via a sibling temporary file and a rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    write_all_atomic(&[(path, contents)])
}

/// Write several files as one unit.
///
/// Every file is staged to its temporary path before any rename happens. If
/// staging or a rename fails, the staged files and any outputs already
/// renamed by this call are removed.
pub fn write_all_atomic(files: &[(&Path, &[u8])]) -> Result<(), OutputError> {
    let mut staged: Vec<(&Path, PathBuf)> = Vec::with_capacity(files.len());
    for &(path, contents) in files {
        match stage(path, contents) {
            Ok(temp) => staged.push((path, temp)),
            Err(e) => {
                for (_, temp) in &staged {
                    let _ = fs::remove_file(temp);
                }
                return Err(e);
            }
        }
    }

    for (i, (path, temp)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp, path) {
            for (done, _) in &staged[..i] {
                let _ = fs::remove_file(done);
            }
            for (_, pending) in &staged[i..] {
                let _ = fs::remove_file(pending);
            }
            return Err(write_failed(path, &e));
        }
    }
    for &(path, contents) in files {
        debug!(path = %path.display(), bytes = contents.len(), "file written");
    }
    Ok(())
}

fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf, OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_failed(path, &e))?;
    }
    let temp = temp_path(path);
    let result = (|| {
        let mut file = File::create(&temp)?;
        file.write_all(contents)?;
        file.sync_all()
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&temp);
        return Err(write_failed(path, &e));
    }
    Ok(temp)
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_failed(path: &Path, err: &dyn std::fmt::Display) -> OutputError {
    OutputError::WriteFailed {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn serialization(what: &str, err: &csv::Error) -> OutputError {
    OutputError::Serialization {
        what: what.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::engineer_posts;
    use crate::io::reader::{read_cleaned_posts, read_raw_posts};

    fn raw(id: &str, content: Option<&str>) -> RawPost {
        RawPost {
            post_id: id.to_string(),
            user_id: "user_007".to_string(),
            timestamp: Some("2024-05-03 18:30:00".to_string()),
            post_content: content.map(str::to_string),
            num_shares: Some(4),
            num_reactions: Some(9),
            source_link: Some("bbc.com".to_string()),
            sentiment_score: Some(0.25),
            flagged: Some(false),
        }
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeled.csv");
        write_labeled_posts(&path, &[]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), LABELED_COLUMNS.join(","));
    }

    #[test]
    fn labeled_rows_use_title_case_booleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeled.csv");
        let post = engineer_posts(vec![raw("POST_0001", Some("Hello, world"))]).posts.remove(0);
        let labeled = LabeledPost {
            post,
            is_anomaly: false,
            is_misinformation: true,
            entities: "NONE".to_string(),
        };
        write_labeled_posts(&path, &[labeled]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "POST_0001,user_007,2024-05-03 18:30:00,\"Hello, world\",4,9,bbc.com,0.25,0,13,False,True,NONE"
        );
    }

    #[test]
    fn cleaned_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        let posts = engineer_posts(vec![raw("POST_0001", Some("Secret cure!")), raw("POST_0002", None)]).posts;
        write_cleaned_posts(&path, &posts).unwrap();
        assert_eq!(read_cleaned_posts(&path).unwrap(), posts);
    }

    #[test]
    fn raw_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/raw.csv");
        let posts = vec![raw("POST_0001", Some("Hi")), raw("POST_0002", None)];
        write_raw_posts(&path, &posts).unwrap();
        assert_eq!(read_raw_posts(&path).unwrap(), posts);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, b"{}").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
    }

    #[test]
    fn failed_batch_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("cleaned.csv");
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();
        let bad = blocker.join("labeled.csv");

        let err = write_all_atomic(&[(good.as_path(), "a".as_bytes()), (bad.as_path(), "b".as_bytes())]).unwrap_err();
        assert!(matches!(err, OutputError::WriteFailed { .. }));
        let mut names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        names.sort();
        assert_eq!(names, vec![std::ffi::OsString::from("not-a-dir")]);
    }

    #[test]
    fn batch_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("sub/b.json");
        write_all_atomic(&[(a.as_path(), "one".as_bytes()), (b.as_path(), "two".as_bytes())]).unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "one");
        assert_eq!(fs::read_to_string(&b).unwrap(), "two");
    }
}
