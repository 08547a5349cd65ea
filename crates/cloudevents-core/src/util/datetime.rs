//! RFC 3339 timestamp parsing and formatting.
//!
//! Timestamps keep the UTC offset they were written with. Formatting uses
//! `Z` for a zero offset and prints only as many fractional digits as needed
//! (milli, micro or nano precision), so `parse(format(t)) == t` holds for
//! every value.

use chrono::{DateTime, FixedOffset, SecondsFormat};

/// Error type for RFC 3339 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

/// Parses an RFC 3339 timestamp (`YYYY-MM-DDTHH:MM:SS[.fff][Z|+HH:MM]`).
///
/// The offset is mandatory and preserved. Surrounding whitespace is rejected.
pub fn parse_timestamp_rfc3339(text: &str) -> Result<DateTime<FixedOffset>, DateTimeParseError> {
    if text.len() < 20 || text.trim() != text {
        return Err(DateTimeParseError {
            message: format!("Invalid RFC 3339 timestamp: {}", text),
        });
    }

    // Date and time must be separated by 'T'; chrono also accepts a space.
    let sep = text.as_bytes()[10];
    if sep != b'T' && sep != b't' {
        return Err(DateTimeParseError {
            message: format!("Invalid RFC 3339 timestamp separator: {}", text),
        });
    }

    DateTime::parse_from_rfc3339(text).map_err(|e| DateTimeParseError {
        message: format!("Invalid RFC 3339 timestamp {}: {}", text, e),
    })
}

/// Formats a timestamp as RFC 3339, preserving its offset.
pub fn format_timestamp_rfc3339(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Returns the UTC offset of a timestamp in minutes (e.g., +330 for +05:30).
pub fn offset_minutes(value: &DateTime<FixedOffset>) -> i32 {
    value.offset().local_minus_utc() / 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_basic() {
        let ts = parse_timestamp_rfc3339("1970-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.timestamp(), 0);
        assert_eq!(offset_minutes(&ts), 0);

        let ts = parse_timestamp_rfc3339("2024-03-15T14:30:00.123456Z").unwrap();
        assert_eq!(ts.timestamp_micros(), 1710513000123456);

        let ts = parse_timestamp_rfc3339("2024-03-15T14:30:00+05:30").unwrap();
        assert_eq!(offset_minutes(&ts), 330);
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let timestamps = [
            "1970-01-01T00:00:00Z",
            "2018-04-05T17:31:00Z",
            "2018-04-05T18:31:00+01:00",
            "2024-03-15T14:30:00.500Z",
            "2024-03-15T14:30:00.123456Z",
            "2024-03-15T14:30:00.123456789-08:00",
            "1969-12-31T23:59:59Z",
        ];

        for text in timestamps {
            let ts = parse_timestamp_rfc3339(text).unwrap();
            let formatted = format_timestamp_rfc3339(&ts);
            assert_eq!(text, formatted, "Roundtrip failed for {}", text);
        }
    }

    #[test]
    fn test_timestamp_with_offset() {
        let local = parse_timestamp_rfc3339("2018-04-05T18:31:00+01:00").unwrap();
        let utc = parse_timestamp_rfc3339("2018-04-05T17:31:00Z").unwrap();
        // Same instant, different offsets
        assert_eq!(local.timestamp_micros(), utc.timestamp_micros());
        assert_ne!(offset_minutes(&local), offset_minutes(&utc));
    }

    #[test]
    fn test_zero_offset_formats_as_z() {
        let ts = parse_timestamp_rfc3339("2018-04-05T17:31:00+00:00").unwrap();
        assert_eq!(format_timestamp_rfc3339(&ts), "2018-04-05T17:31:00Z");
    }

    #[test]
    fn test_invalid_timestamps() {
        assert!(parse_timestamp_rfc3339("2018-04-05").is_err()); // no time
        assert!(parse_timestamp_rfc3339("2018-04-05T17:31:00").is_err()); // no offset
        assert!(parse_timestamp_rfc3339("2018-04-05 17:31:00Z").is_err()); // space separator
        assert!(parse_timestamp_rfc3339(" 2018-04-05T17:31:00Z").is_err());
        assert!(parse_timestamp_rfc3339("2018-13-05T17:31:00Z").is_err()); // invalid month
        assert!(parse_timestamp_rfc3339("2023-02-29T00:00:00Z").is_err()); // not a leap year
        assert!(parse_timestamp_rfc3339("not a timestamp at all").is_err());
    }
}
