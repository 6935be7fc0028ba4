//! Batch timestamp statistics.

use chrono::{DateTime, Datelike, NaiveDateTime, Weekday};

/// Median instant of `timestamps`, at microsecond resolution.
///
/// For an even count this is the midpoint of the two middle instants.
/// Returns `None` for an empty slice.
pub fn median_timestamp(timestamps: &[NaiveDateTime]) -> Option<NaiveDateTime> {
    if timestamps.is_empty() {
        return None;
    }
    let mut micros: Vec<i64> = timestamps
        .iter()
        .map(|ts| ts.and_utc().timestamp_micros())
        .collect();
    micros.sort_unstable();

    let mid = micros.len() / 2;
    let median = if micros.len() % 2 == 1 {
        micros[mid]
    } else {
        let (lo, hi) = (micros[mid - 1] as i128, micros[mid] as i128);
        (lo + (hi - lo) / 2) as i64
    };
    DateTime::from_timestamp_micros(median).map(|dt| dt.naive_utc())
}

/// English weekday name, e.g. `Monday`.
pub fn weekday_name(ts: &NaiveDateTime) -> &'static str {
    match ts.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
