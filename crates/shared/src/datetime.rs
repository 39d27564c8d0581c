//! Wire format for date-times: `yyyy-MM-dd HH:mm:ss`, local time, no zone.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse a date-time in the wire format
pub fn parse(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(|_| {
        Error::validation(format!(
            "Invalid date '{}', expected format yyyy-MM-dd HH:mm:ss",
            raw
        ))
    })
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
}

/// Same format for optional fields; use together with `#[serde(default)]`
pub mod option {
    use super::*;

    pub fn serialize<S>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.trim().is_empty() => NaiveDateTime::parse_from_str(s.trim(), FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "crate::datetime")]
        at: NaiveDateTime,
        #[serde(default, with = "crate::datetime::option")]
        until: Option<NaiveDateTime>,
    }

    #[test]
    fn test_parse_wire_format() {
        let parsed = parse("2024-03-05 18:30:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_rejects_iso_t_separator() {
        let err = parse("2024-03-05T18:30:00").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_serialize_field() {
        let stamp = Stamp {
            at: parse("2030-12-31 23:59:59").unwrap(),
            until: None,
        };
        let json = serde_json::to_string(&stamp).unwrap();
        assert!(json.contains("\"at\":\"2030-12-31 23:59:59\""));
        assert!(json.contains("\"until\":null"));
    }

    #[test]
    fn test_optional_field_missing() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":"2030-01-01 00:00:00"}"#).unwrap();
        assert!(stamp.until.is_none());
    }

    #[test]
    fn test_now_has_no_fraction() {
        assert_eq!(now().nanosecond(), 0);
    }
}
