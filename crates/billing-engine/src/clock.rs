//! Clock-time values and the free-form time token parser.
//!
//! A [`ClockTime`] is a wall-clock minute within a single day. Tokens are
//! accepted in 24-hour form (`"09:30"`, `"0930"`, `"930"`) or 12-hour form
//! with a meridiem marker (`"9:30 AM"`, `"930pm"`, `"9:30 p.m."`).
//!
//! Parsing never guesses: anything outside the documented grammar is
//! rejected with [`BillingError::InvalidTime`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::BillingError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, always within `00:00..=23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Build a clock time, returning `None` when either field is out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Build a clock time from minutes since midnight, wrapping at the day boundary.
    pub fn from_minutes_since_midnight(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since 00:00 (0-1439).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Advance by `minutes`, wrapping past midnight.
    pub fn add_minutes(self, minutes: u32) -> Self {
        let (shifted, _) = NaiveTime::from(self)
            .overflowing_add_signed(chrono::Duration::minutes(i64::from(minutes)));
        Self::from(shifted)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for ClockTime {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(time: ClockTime) -> Self {
        NaiveTime::from_hms_opt(time.hour, time.minute, 0).unwrap_or_default()
    }
}

/// Seconds and below are truncated.
impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

// ── Meridiem markers ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Recognised markers, longest first so `"A.M."` wins over a bare suffix check.
const MERIDIEM_MARKERS: [(&str, Meridiem); 4] = [
    ("A.M.", Meridiem::Am),
    ("P.M.", Meridiem::Pm),
    ("AM", Meridiem::Am),
    ("PM", Meridiem::Pm),
];

/// A marker standing as its own word. Any non-word character, punctuation
/// included, is a boundary.
static MERIDIEM_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\W)(A\.M\.|P\.M\.|AM|PM)(?:\W|$)")
        .expect("meridiem word pattern is valid")
});

impl Meridiem {
    fn from_marker(word: &str) -> Option<Self> {
        MERIDIEM_MARKERS
            .iter()
            .find(|(marker, _)| *marker == word)
            .map(|(_, meridiem)| *meridiem)
    }

    /// Convert a 12-hour reading to a 24-hour hour.
    fn to_24_hour(self, hour12: u32) -> u32 {
        match (self, hour12) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        }
    }
}

// ── parse_clock_time ────────────────────────────────────────────────────────

/// Parse a single time token into a [`ClockTime`].
///
/// # Grammar
///
/// - Digits: `H:MM`, `HH:MM`, or colon-free `HMM` / `HHMM`.
/// - Optional meridiem marker (`AM`, `PM`, `A.M.`, `P.M.`, any case), either as
///   a suffix (`"9:30pm"`, `"9:30 PM"`) or as a separate word (`"9:30 AM EST"`,
///   `"10:30 AM."`, `"9:00 AM, EST"`).
/// - With a marker the hour must be 1-12; without one it must be 0-23.
///
/// # Errors
///
/// Returns [`BillingError::InvalidTime`] carrying the trimmed token for any
/// input outside the grammar.
///
/// # Examples
///
/// ```
/// use billing_engine::clock::parse_clock_time;
///
/// assert_eq!(parse_clock_time("9:05 PM").unwrap().to_string(), "21:05");
/// assert_eq!(parse_clock_time("0930").unwrap().to_string(), "09:30");
/// assert!(parse_clock_time("24:00").is_err());
/// ```
pub fn parse_clock_time(token: &str) -> Result<ClockTime, BillingError> {
    let trimmed = token.trim();
    let invalid = || BillingError::InvalidTime(trimmed.to_string());
    let normalized = trimmed.to_uppercase();

    let has_marker = MERIDIEM_MARKERS
        .iter()
        .any(|(marker, _)| normalized.contains(marker));

    if !has_marker {
        let (hour, minute) = split_digit_groups(&normalized).ok_or_else(invalid)?;
        return ClockTime::new(hour, minute).ok_or_else(invalid);
    }

    let (digits, meridiem) = split_meridiem(&normalized).ok_or_else(invalid)?;
    let (hour12, minute) = split_digit_groups(digits).ok_or_else(invalid)?;
    if !(1..=12).contains(&hour12) {
        return Err(invalid());
    }
    ClockTime::new(meridiem.to_24_hour(hour12), minute).ok_or_else(invalid)
}

/// Separate the digit part from the meridiem marker: suffix first, then the
/// first marker word.
fn split_meridiem(s: &str) -> Option<(&str, Meridiem)> {
    for (marker, meridiem) in MERIDIEM_MARKERS {
        if let Some(digits) = s.strip_suffix(marker) {
            return Some((digits.trim_end(), meridiem));
        }
    }

    let marker = MERIDIEM_WORD.captures(s)?.get(1)?;
    let meridiem = Meridiem::from_marker(marker.as_str())?;
    Some((s[..marker.start()].trim_end(), meridiem))
}

/// Split `"H:MM"`, `"HH:MM"`, `"HMM"` or `"HHMM"` into (hour, minute).
fn split_digit_groups(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = match s.split_once(':') {
        Some((hour, minute)) => {
            if !(1..=2).contains(&hour.len()) || !(1..=2).contains(&minute.len()) {
                return None;
            }
            (hour, minute)
        }
        None => {
            if !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            match s.len() {
                3 => s.split_at(1),
                4 => s.split_at(2),
                _ => return None,
            }
        }
    };
    Some((parse_digits(hour)?, parse_digits(minute)?))
}

/// Parse a non-empty run of ASCII digits. Signs and whitespace are rejected.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ── Tests ───────────────────────────────────────────────────────────────────
