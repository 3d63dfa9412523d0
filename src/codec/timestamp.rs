//! ISO-8601 timestamps for the check-in file formats.
//!
//! Encoding is always UTC with seconds resolution (`2025-12-27T09:12:00Z`).
//! Decoding accepts any RFC 3339 offset, fractional seconds, and the
//! offset-less form older files used (read as UTC).

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Drop sub-second precision so in-memory values match what is persisted.
pub fn normalize(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(0)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(FORMAT).to_string()
}

pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(normalize(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| normalize(naive.and_utc()))
}

pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
}
