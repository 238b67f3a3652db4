//! Time-of-day and headway values.
//!
//! Schedule providers deliver times as "HH:MM" strings. They are kept
//! verbatim on deserialization and only checked when a schedule is
//! aggregated, so a single bad value fails that aggregation instead of the
//! whole payload.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Error returned when a time string is not in "HH:MM" form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed time {input:?}: {reason}")]
pub struct MalformedTimeError {
    input: String,
    reason: &'static str,
}

impl MalformedTimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A departure time as supplied by the schedule provider.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::new("08:30");
/// assert_eq!(t.compact_code().unwrap(), "0830");
///
/// assert!(TimeOfDay::new("8:30").compact_code().is_err());
/// assert!(TimeOfDay::new("24:00").compact_code().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(String);

impl TimeOfDay {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a clock time.
    ///
    /// The input must be exactly five characters: two hour digits (00-23),
    /// a colon, two minute digits (00-59).
    pub fn parse(&self) -> Result<NaiveTime, MalformedTimeError> {
        let s = self.as_str();
        if s.len() != 5 {
            return Err(MalformedTimeError::new(s, "expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(MalformedTimeError::new(s, "expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| MalformedTimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(MalformedTimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| MalformedTimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(MalformedTimeError::new(s, "minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| MalformedTimeError::new(s, "invalid time"))
    }

    /// The compact "HHMM" token used as a timetable cell.
    pub fn compact_code(&self) -> Result<String, MalformedTimeError> {
        let time = self.parse()?;
        Ok(format!("{:02}{:02}", time.hour(), time.minute()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeOfDay {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A headway length in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub u16);

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
