//! Timestamp handling for model lifecycle fields.
//!
//! Timestamps are held as `DateTime<Utc>` truncated to microseconds, so the
//! fixed string format below renders them without loss and a mapping
//! round-trip reproduces the exact value.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::{ModelError, ModelResult};

/// Serialized timestamp layout: `YYYY-MM-DDTHH:MM:SS.ffffff`, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Returns the current moment at microsecond precision.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Renders a timestamp in [`TIMESTAMP_FORMAT`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hbnb_models::time::format_timestamp;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .unwrap()
///     .and_hms_micro_opt(12, 0, 0, 123_456)
///     .unwrap()
///     .and_utc();
/// assert_eq!(format_timestamp(&at), "2024-03-01T12:00:00.123456");
/// ```
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp field value.
///
/// The string carries no offset and is read as UTC.
///
/// # Errors
///
/// Returns `ModelError::MalformedTimestamp` naming `field` if `value` does
/// not match [`TIMESTAMP_FORMAT`] exactly.
pub fn parse_timestamp(field: &str, value: &str) -> ModelResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ModelError::MalformedTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    #[test]
    fn test_now_is_microsecond_precise() {
        let at = now();
        assert_eq!(at.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_format_then_parse_is_exact() {
        let at = now();
        let text = format_timestamp(&at);
        assert_eq!(text.len(), 26);
        assert_eq!(parse_timestamp("created_at", &text).unwrap(), at);
    }

    #[test]
    fn test_parse_known_value() {
        let at = parse_timestamp("updated_at", "2024-03-01T12:00:00.123456").unwrap();
        assert_eq!(at.hour(), 12);
        assert_eq!(at.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_zero_fraction() {
        let at = parse_timestamp("updated_at", "2017-09-28T21:05:54.000000").unwrap();
        assert_eq!(format_timestamp(&at), "2017-09-28T21:05:54.000000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("created_at", "not-a-date").unwrap_err();
        assert!(err.is_parse_error());
        assert!(format!("{err}").contains("created_at"));
    }

    #[test]
    fn test_parse_rejects_missing_fraction() {
        assert!(parse_timestamp("created_at", "2024-03-01T12:00:00").is_err());
    }

    #[test]
    fn test_parse_rejects_offset_suffix() {
        assert!(parse_timestamp("created_at", "2024-03-01T12:00:00.123456Z").is_err());
        assert!(parse_timestamp("created_at", "2024-03-01T12:00:00.123456+00:00").is_err());
    }

    #[test]
    fn test_parse_rejects_space_separator() {
        assert!(parse_timestamp("created_at", "2024-03-01 12:00:00.123456").is_err());
    }

    #[test]
    fn test_formatting_orders_like_time() {
        let earlier = now();
        let later = earlier + Duration::microseconds(1);
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }
}
