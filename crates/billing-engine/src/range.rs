//! Splitting a time-range string into its start and end tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::clock::{parse_clock_time, ClockTime};
use crate::error::BillingError;

/// A literal `-`, or `to` (any case) with whitespace on both sides.
static RANGE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+to\s+|-").expect("range separator pattern is valid")
});

/// Split `input` at the first range separator, scanning left to right.
///
/// Both halves are trimmed. They are not validated as times here.
///
/// # Errors
///
/// Returns [`BillingError::InvalidFormat`] if no separator is present.
///
/// # Examples
///
/// ```
/// use billing_engine::range::split_range;
///
/// assert_eq!(split_range("9:00 AM to 10:30 AM").unwrap(), ("9:00 AM", "10:30 AM"));
/// assert_eq!(split_range("0900-0945").unwrap(), ("0900", "0945"));
/// ```
pub fn split_range(input: &str) -> Result<(&str, &str), BillingError> {
    let trimmed = input.trim();
    let separator = RANGE_SEPARATOR
        .find(trimmed)
        .ok_or(BillingError::InvalidFormat)?;
    Ok((
        trimmed[..separator.start()].trim(),
        trimmed[separator.end()..].trim(),
    ))
}

/// Split `input` and parse both halves as clock times.
///
/// # Errors
///
/// [`BillingError::InvalidFormat`] when no separator is found, otherwise
/// [`BillingError::InvalidTime`] for the first half that fails to parse.
pub fn parse_range(input: &str) -> Result<(ClockTime, ClockTime), BillingError> {
    let (start, end) = split_range(input)?;
    Ok((parse_clock_time(start)?, parse_clock_time(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_hyphen() {
        assert_eq!(split_range("09:00-09:45").unwrap(), ("09:00", "09:45"));
    }

    #[test]
    fn test_split_on_hyphen_with_spaces() {
        assert_eq!(split_range("  09:00 - 09:45  ").unwrap(), ("09:00", "09:45"));
    }

    #[test]
    fn test_split_on_to_any_case() {
        assert_eq!(split_range("09:00 to 09:45").unwrap(), ("09:00", "09:45"));
        assert_eq!(split_range("09:00 TO 09:45").unwrap(), ("09:00", "09:45"));
        assert_eq!(split_range("09:00\tTo   09:45").unwrap(), ("09:00", "09:45"));
    }

    #[test]
    fn test_to_requires_surrounding_whitespace() {
        assert_eq!(
            split_range("09:00to09:45").unwrap_err(),
            BillingError::InvalidFormat
        );
        assert_eq!(
            split_range("09:00 to09:45").unwrap_err(),
            BillingError::InvalidFormat
        );
    }

    #[test]
    fn test_first_separator_wins() {
        assert_eq!(
            split_range("9:00 to 9:30-10:00").unwrap(),
            ("9:00", "9:30-10:00")
        );
        assert_eq!(
            split_range("9:00-9:30 to 10:00").unwrap(),
            ("9:00", "9:30 to 10:00")
        );
    }

    #[test]
    fn test_split_12h_glued_markers() {
        assert_eq!(
            split_range("9:00AM-10:30AM").unwrap(),
            ("9:00AM", "10:30AM")
        );
    }

    #[test]
    fn test_no_separator_is_invalid_format() {
        assert_eq!(split_range("invalid").unwrap_err(), BillingError::InvalidFormat);
        assert_eq!(split_range("").unwrap_err(), BillingError::InvalidFormat);
        assert_eq!(split_range("09:00 09:45").unwrap_err(), BillingError::InvalidFormat);
    }

    #[test]
    fn test_empty_halves_split_but_fail_to_parse() {
        assert_eq!(split_range("-").unwrap(), ("", ""));
        assert!(matches!(
            parse_range("-09:00"),
            Err(BillingError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_parse_range_equivalent_formats() {
        let expected = (
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 30).unwrap(),
        );
        assert_eq!(parse_range("9:00 AM to 10:30 AM").unwrap(), expected);
        assert_eq!(parse_range("09:00-10:30").unwrap(), expected);
        assert_eq!(parse_range("0900-1030").unwrap(), expected);
        assert_eq!(parse_range("9:00AM-10:30AM").unwrap(), expected);
    }

    #[test]
    fn test_parse_range_reports_bad_half() {
        assert_eq!(
            parse_range("09:00-25:00").unwrap_err(),
            BillingError::InvalidTime("25:00".to_string())
        );
    }
}
