//! The service reports timestamps both with and without an offset.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// RFC 3339, or a naive ISO-8601 timestamp taken as UTC
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(value, NAIVE_FORMAT).map(|naive| naive.and_utc()),
    }
}

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {}: {}", value, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_naive_as_utc() {
        let parsed = parse("2013-06-07T16:13:38.889857").unwrap();
        assert_eq!(parsed.year(), 2013);
        assert_eq!(parsed.hour(), 16);
        assert_eq!(parsed.nanosecond(), 889_857_000);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let parsed = parse("2015-06-07T18:13:38+02:00").unwrap();
        assert_eq!(parsed.hour(), 16);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("yesterday").is_err());
    }
}
