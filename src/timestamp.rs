//! Timestamp parsing and formatting for structured log entries.
//!
//! Supports ISO 8601, RFC 3339, `YYYY-MM-DD HH:MM:SS` strings, and
//! numeric Unix epochs (seconds, milliseconds, nanoseconds) using a
//! magnitude-based heuristic for disambiguation. The original source text is
//! always kept: values that fail to parse still display verbatim instead of
//! being dropped.

use std::fmt;

/// A timestamp field as it appeared in the source record.
///
/// `value` is the normalized [`jiff::Timestamp`] when parsing succeeded;
/// `original` is the source text used as a display fallback.
#[derive(Debug, Clone)]
pub struct Timestamp {
    pub value: Option<jiff::Timestamp>,
    pub original: String,
}

impl Timestamp {
    /// Format the timestamp using the given strftime-compatible format string.
    ///
    /// Falls back to the original source text when the value could not be
    /// normalized or the format string is invalid.
    pub fn format_with(&self, format: &str) -> String {
        match self.value {
            Some(ts) => {
                let zdt = ts.to_zoned(jiff::tz::TimeZone::UTC);
                jiff::fmt::strtime::format(format, &zdt)
                    .unwrap_or_else(|_| self.original.clone())
            }
            None => self.original.clone(),
        }
    }

    /// Parse a timestamp from a [`serde_json::Value`].
    ///
    /// Supports:
    /// - ISO 8601 / RFC 3339 strings
    /// - `YYYY-MM-DD HH:MM:SS[.fff]` format
    /// - Unix epoch seconds (integer or float)
    /// - Unix epoch milliseconds (integer)
    /// - Unix epoch nanoseconds (integer)
    ///
    /// Strings in none of these shapes still yield a [`Timestamp`] carrying
    /// the raw text. `null` and other value shapes are treated as absent.
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self {
                value: parse_string(s),
                original: s.clone(),
            }),
            serde_json::Value::Number(n) => Some(Self {
                value: parse_number(n),
                original: n.to_string(),
            }),
            _ => None,
        }
    }
}

/// Parse a string timestamp into a normalized value.
fn parse_string(s: &str) -> Option<jiff::Timestamp> {
    // ISO 8601 / RFC 3339; jiff handles these natively
    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Some(ts);
    }

    // YYYY-MM-DD HH:MM:SS (no timezone → assume UTC)
    if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S", s)
        && let Ok(zdt) = dt.to_zoned(jiff::tz::TimeZone::UTC)
    {
        return Some(zdt.timestamp());
    }

    // YYYY-MM-DD HH:MM:SS.fff
    if let Ok(dt) = jiff::civil::DateTime::strptime("%Y-%m-%d %H:%M:%S%.f", s)
        && let Ok(zdt) = dt.to_zoned(jiff::tz::TimeZone::UTC)
    {
        return Some(zdt.timestamp());
    }

    None
}

/// Parse a numeric timestamp using the heuristic:
/// - Value < 1e12 → seconds
/// - Value < 1e15 → milliseconds
/// - Value ≥ 1e15 → nanoseconds
fn parse_number(n: &serde_json::Number) -> Option<jiff::Timestamp> {
    if let Some(i) = n.as_i64() {
        from_epoch_integer(i)
    } else if let Some(f) = n.as_f64() {
        from_epoch_float(f)
    } else {
        None
    }
}

fn from_epoch_integer(value: i64) -> Option<jiff::Timestamp> {
    if value < 1_000_000_000_000 {
        // seconds
        jiff::Timestamp::from_second(value).ok()
    } else if value < 1_000_000_000_000_000 {
        // milliseconds
        jiff::Timestamp::from_millisecond(value).ok()
    } else {
        // nanoseconds
        jiff::Timestamp::from_nanosecond(i128::from(value)).ok()
    }
}

fn from_epoch_float(value: f64) -> Option<jiff::Timestamp> {
    if value < 1e12 {
        // seconds with fractional part
        #[allow(clippy::cast_possible_truncation)]
        let secs = value.trunc() as i64;
        #[allow(clippy::cast_possible_truncation)]
        let nanos = ((value.fract()) * 1_000_000_000.0) as i32;
        jiff::Timestamp::new(secs, nanos).ok()
    } else {
        // milliseconds as float
        #[allow(clippy::cast_possible_truncation)]
        let ms = value as i64;
        jiff::Timestamp::from_millisecond(ms).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DISPLAY_FMT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    #[test]
    fn test_parse_iso8601() {
        let val = json!("2026-01-15T10:30:00.123Z");
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.123");
    }

    #[test]
    fn test_parse_iso8601_with_offset() {
        let val = json!("2026-01-15T12:30:00.000+02:00");
        let ts = Timestamp::from_json_value(&val).unwrap();
        // 12:30 +02:00 = 10:30 UTC
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.000");
    }

    #[test]
    fn test_parse_epoch_seconds_integer() {
        // 2026-01-15 10:30:00 UTC = 1768473000
        let val = json!(1_768_473_000);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.000");
    }

    #[test]
    fn test_parse_epoch_seconds_float() {
        let val = json!(1_768_473_000.123);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert!(
            ts.format_with(DISPLAY_FMT)
                .starts_with("2026-01-15T10:30:00.")
        );
    }

    #[test]
    fn test_parse_epoch_milliseconds() {
        let val = json!(1_768_473_000_123_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.123");
    }

    #[test]
    fn test_parse_epoch_nanoseconds() {
        let val = json!(1_768_473_000_123_000_000_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.123");
    }

    #[test]
    fn test_parse_datetime_no_tz() {
        let val = json!("2026-01-15 10:30:00");
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "2026-01-15T10:30:00.000");
    }

    #[test]
    fn test_unparseable_string_falls_back_to_original() {
        let val = json!("fourth of july");
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert!(ts.value.is_none());
        assert_eq!(ts.format_with(DISPLAY_FMT), "fourth of july");
    }

    #[test]
    fn test_non_timestamp_shapes_absent() {
        assert!(Timestamp::from_json_value(&json!(true)).is_none());
        assert!(Timestamp::from_json_value(&json!(null)).is_none());
        assert!(Timestamp::from_json_value(&json!(["a"])).is_none());
    }

    #[test]
    fn test_format_with_custom() {
        let val = json!("2026-01-15T10:30:00.123Z");
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with("%H:%M:%S"), "10:30:00");
    }

    #[test]
    fn test_epoch_zero() {
        let val = json!(0);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(ts.format_with(DISPLAY_FMT), "1970-01-01T00:00:00.000");
    }

    #[test]
    fn test_epoch_boundary_seconds_to_milliseconds() {
        // Exactly 1_000_000_000_000 is treated as milliseconds, not seconds
        let val = json!(1_000_000_000_000_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        // 1e12 ms = 2001-09-09T01:46:40Z
        assert!(ts.format_with(DISPLAY_FMT).starts_with("2001-09-09"));

        // One below would be ~31688 years as seconds, overflowing jiff's
        // range → normalization fails, original text is the fallback
        let val = json!(999_999_999_999_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert!(ts.value.is_none());
        assert_eq!(ts.format_with(DISPLAY_FMT), "999999999999");
    }

    #[test]
    fn test_epoch_boundary_milliseconds_to_nanoseconds() {
        // Exactly 1_000_000_000_000_000 is treated as nanoseconds
        let val = json!(1_000_000_000_000_000_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        // 1e15 ns = 1e6 seconds ≈ 1970-01-12
        assert!(ts.format_with(DISPLAY_FMT).starts_with("1970-01-12"));

        // A realistic nanoseconds value works
        let val = json!(1_700_000_000_000_000_000_i64);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert!(ts.format_with(DISPLAY_FMT).starts_with("2023-"));
    }

    #[test]
    fn test_negative_epoch_seconds() {
        // Before Unix epoch: 1969-12-31T23:59:59Z
        let val = json!(-1);
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert!(ts.format_with(DISPLAY_FMT).starts_with("1969-12-31"));
    }

    #[test]
    fn test_display_trait() {
        let val = json!("2026-01-15T10:30:00.123Z");
        let ts = Timestamp::from_json_value(&val).unwrap();
        assert_eq!(format!("{ts}"), "2026-01-15T10:30:00.123");
    }
}
