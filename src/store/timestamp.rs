//! Timestamp encoding for stored records.
//!
//! Written as RFC 3339 UTC. Older documents carry naive ISO-8601 local times
//! (`2024-05-01T13:45:10.123456`), which are accepted on read.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp in either accepted shape
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(value, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse("2024-05-01T13:45:10+00:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 13);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse("2024-05-01T13:45:10+02:00").unwrap();
        assert_eq!(dt.hour(), 11);
    }

    #[test]
    fn test_parse_naive_with_fraction() {
        let dt = parse("2024-05-01T13:45:10.123456").unwrap();
        assert_eq!(dt.with_timezone(&Local).minute(), 45);
    }

    #[test]
    fn test_parse_naive_without_fraction() {
        assert!(parse("2024-05-01T13:45:10").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }
}
