//! Serde support for optional task deadlines
//!
//! Deadlines are stored as naive (zone-less) timestamps. Input may be a
//! plain date, a naive date-time, or an RFC 3339 date-time with offset,
//! which is normalised to UTC. Output is always `YYYY-MM-DDTHH:MM:SS`
//! with fractional seconds only when present.
//!
//! Use with `#[serde(default, with = "crate::models::deadline")]`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a deadline in any of the accepted input formats.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a deadline the way it appears on the wire.
pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&format(dt)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid deadline '{}'", s)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(parse("2025-12-25"), Some(ymd_hms(2025, 12, 25, 0, 0, 0)));
    }

    #[test]
    fn naive_datetime() {
        assert_eq!(
            parse("2026-12-31T08:15:00"),
            Some(ymd_hms(2026, 12, 31, 8, 15, 0))
        );
    }

    #[test]
    fn offset_is_normalised_to_utc() {
        assert_eq!(
            parse("2026-01-01T02:00:00+02:00"),
            Some(ymd_hms(2026, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse("2026-01-01T00:00:00Z"),
            Some(ymd_hms(2026, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse("next tuesday"), None);
        assert_eq!(parse("2025-13-01"), None);
    }

    #[test]
    fn output_omits_zero_fraction() {
        assert_eq!(format(&ymd_hms(2025, 12, 25, 0, 0, 0)), "2025-12-25T00:00:00");

        let with_millis = NaiveDate::from_ymd_opt(2025, 12, 25)
            .unwrap()
            .and_hms_milli_opt(9, 30, 0, 250)
            .unwrap();
        assert_eq!(format(&with_millis), "2025-12-25T09:30:00.250");
    }
}
