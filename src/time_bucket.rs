//! UTC calendar-day bucketing
//!
//! Daily XP caps and the daily-bonus dedup both key on the UTC calendar day,
//! stored as a "YYYY-MM-DD" string next to the full RFC 3339 timestamp.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Compute the day bucket string ("YYYY-MM-DD") for a UTC timestamp.
pub fn day_bucket(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}-{:02}", at.year(), at.month(), at.day())
}

/// Get the current UTC day bucket.
pub fn current_day_bucket() -> String {
    day_bucket(Utc::now())
}

/// Validate a client-supplied day bucket ("YYYY-MM-DD", a real calendar date).
pub fn parse_day_bucket(bucket: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = bucket.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
