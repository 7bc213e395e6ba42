//! Timestamp normalization for server payloads.
//!
//! The API emits RFC 1123 datetimes (`Mon, 01 Jan 2024 00:00:00 GMT`).
//! Records re-serialized by this crate use RFC 3339, so both forms are
//! accepted on input and normalizing an already-normalized record is a
//! no-op.
//!
//! Use as a serde field adapter:
//!
//! ```ignore
//! #[serde(with = "crate::timestamp")]
//! pub created: Timestamp,
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::types::Timestamp;

/// Parse an RFC 1123 / RFC 2822 or RFC 3339 datetime into a UTC timestamp.
pub fn parse(value: &str) -> Result<Timestamp, chrono::ParseError> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serialize a timestamp as RFC 3339.
pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserialize a timestamp from either supported string format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}
