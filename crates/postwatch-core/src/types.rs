//! Post records as they move through the pipeline.
//!
//! `RawPost` is what the input table holds, `EngineeredPost` is the cleaned
//! table with derived features, `LabeledPost` adds the detector verdicts.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::TIMESTAMP_FORMAT;

/// Parse a timestamp cell. Returns `None` for anything unparseable.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render a timestamp the way every output table stores it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn deserialize_lenient_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(d)?;
    Ok(opt.and_then(|s| {
        let s = s.trim();
        s.parse::<u64>().ok().or_else(|| {
            // Tables round-tripped through float columns write "12.0".
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
        })
    }))
}

fn deserialize_lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(d)?;
    Ok(opt.and_then(|s| s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())))
}

fn deserialize_opt_bool<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(d)?;
    Ok(opt.and_then(|s| parse_bool(&s)))
}

fn deserialize_bool<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_bool(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{s}'")))
}

fn deserialize_timestamp<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_timestamp(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'")))
}

fn serialize_timestamp<S>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format_timestamp(ts))
}

/// Booleans are written as `True`/`False` to match previously produced tables.
pub fn serialize_title_bool<S>(v: &bool, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(if *v { "True" } else { "False" })
}

fn serialize_opt_title_bool<S>(v: &Option<bool>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match v {
        Some(b) => serialize_title_bool(b, s),
        None => s.serialize_str(""),
    }
}

/// One row of the raw input table. Every cell that can be repaired is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub post_id: String,
    pub user_id: String,
    pub timestamp: Option<String>,
    pub post_content: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub num_shares: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_u64")]
    pub num_reactions: Option<u64>,
    pub source_link: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub sentiment_score: Option<f64>,
    /// Ground-truth label, only present in synthetic tables.
    #[serde(
        default,
        deserialize_with = "deserialize_opt_bool",
        serialize_with = "serialize_opt_title_bool"
    )]
    pub flagged: Option<bool>,
}

/// A repaired post with every derived feature.
///
/// Field order is the column order of the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredPost {
    pub post_id: String,
    pub user_id: String,
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    /// Original text; `None` when the cell was empty.
    pub post_content: Option<String>,
    pub num_shares: u64,
    pub num_reactions: u64,
    pub source_link: String,
    pub sentiment_score: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_bool",
        serialize_with = "serialize_opt_title_bool"
    )]
    pub flagged: Option<bool>,
    #[serde(default)]
    pub post_content_normalized: String,
    pub word_count: u32,
    #[serde(
        serialize_with = "serialize_title_bool",
        deserialize_with = "deserialize_bool"
    )]
    pub contains_link: bool,
    pub emotion_intensity: f64,
    pub hour_of_day: u32,
    pub engagement_rate: u64,
    pub suspicious_keyword_count: u32,
    pub day_of_week: String,
}

/// Verdicts attached to an engineered post by the flagger and the enrichment step.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPost {
    pub post: EngineeredPost,
    pub is_anomaly: bool,
    pub is_misinformation: bool,
    pub entities: String,
}
