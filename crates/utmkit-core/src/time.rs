use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date format: expected YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339")]
    InvalidFormat,
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

/// Parses the calendar date a user wrote down.
///
/// Offset-carrying timestamps keep the date in their own offset, so
/// `2024-12-31T23:00:00-05:00` stays on the 31st regardless of the local zone.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(TimeParseError::InvalidFormat)
}

pub fn calendar_year(input: &str) -> Result<i32, TimeParseError> {
    parse_calendar_date(input).map(|date| date.year())
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::{calendar_year, format_timestamp_datetime, parse_calendar_date, TimeParseError};
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    #[test]
    fn parse_calendar_date_accepts_rfc3339() {
        let date = parse_calendar_date("2024-03-15T00:00:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn parse_calendar_date_keeps_written_offset() {
        assert_eq!(calendar_year("2024-12-31T23:00:00-05:00").unwrap(), 2024);
        assert_eq!(calendar_year("2025-01-01T00:30:00+09:00").unwrap(), 2025);
    }

    #[test]
    fn parse_calendar_date_accepts_plain_and_naive_forms() {
        assert_eq!(calendar_year("2031-06-01").unwrap(), 2031);
        assert_eq!(calendar_year("2031-06-01 10:30").unwrap(), 2031);
        assert_eq!(calendar_year("2031-06-01T10:30:15").unwrap(), 2031);
    }

    #[test]
    fn parse_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date("   "), Err(TimeParseError::Empty));
        assert_eq!(
            parse_calendar_date("next tuesday"),
            Err(TimeParseError::InvalidFormat)
        );
        assert_eq!(
            parse_calendar_date("2024-02-30"),
            Err(TimeParseError::InvalidFormat)
        );
    }

    #[test]
    fn format_timestamp_datetime_uses_local_time() {
        let local = Local.with_ymd_and_hms(2030, 1, 15, 13, 45, 0).unwrap();
        let ts = local.with_timezone(&Utc).timestamp();
        assert_eq!(format_timestamp_datetime(ts), "2030-01-15 13:45");
    }
}
