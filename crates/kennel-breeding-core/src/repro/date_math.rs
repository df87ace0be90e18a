//! Day-granularity date helpers shared by every reproductive calculation.

use chrono::{Duration, NaiveDate};

use super::{ReproError, ReproResult};

/// ISO calendar date format used at string boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Signed whole days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Offset a date by whole days, saturating at the calendar limits.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> ReproResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ReproError::InvalidDate(value.to_string()))
}

/// Parse an optional date, treating empty strings as absent.
pub fn parse_optional_date(value: Option<&str>) -> ReproResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v).map(Some),
    }
}

/// Format a date for string boundaries.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 22)), 21);
        assert_eq!(days_between(date(2024, 1, 22), date(2024, 1, 1)), -21);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2); // leap year
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2024, 3, 1), 63), date(2024, 5, 3));
        assert_eq!(add_days(date(2024, 3, 1), -1), date(2024, 2, 29));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_days(date(2024, 1, 1), 200_000_000_000_000), NaiveDate::MAX);
        assert_eq!(add_days(date(2024, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days(date(2024, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-01").unwrap(), date(2024, 3, 1));
        assert_eq!(parse_date(" 2024-03-01 ").unwrap(), date(2024, 3, 1));
        assert!(matches!(parse_date("03/01/2024"), Err(ReproError::InvalidDate(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(ReproError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2024-03-01")).unwrap(),
            Some(date(2024, 3, 1))
        );
        assert!(parse_optional_date(Some("soon")).is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 3, 1)), "2024-03-01");
    }
}
