//! Day-label formatting for section headings.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::domain::Day;

/// Maps a day to the heading shown above its departures.
pub trait DayLabeler {
    fn label(&self, day: Day) -> Cow<'static, str>;
}

/// Traditional Chinese weekday names (星期一 … 星期日).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhTwLabels;

impl DayLabeler for ZhTwLabels {
    fn label(&self, day: Day) -> Cow<'static, str> {
        Cow::Borrowed(match day {
            Day::Monday => "星期一",
            Day::Tuesday => "星期二",
            Day::Wednesday => "星期三",
            Day::Thursday => "星期四",
            Day::Friday => "星期五",
            Day::Saturday => "星期六",
            Day::Sunday => "星期日",
        })
    }
}

/// Capitalised English day names.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl DayLabeler for EnglishLabels {
    fn label(&self, day: Day) -> Cow<'static, str> {
        Cow::Borrowed(match day {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        })
    }
}

impl<F> DayLabeler for F
where
    F: Fn(Day) -> String,
{
    fn label(&self, day: Day) -> Cow<'static, str> {
        Cow::Owned(self(day))
    }
}

/// Error returned when parsing an unknown label locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day label locale {0:?} (expected \"zh-tw\" or \"en\")")]
pub struct InvalidLocale(String);

/// Selects a built-in labeler at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelLocale {
    #[default]
    ZhTw,
    English,
}

impl DayLabeler for LabelLocale {
    fn label(&self, day: Day) -> Cow<'static, str> {
        match self {
            LabelLocale::ZhTw => ZhTwLabels.label(day),
            LabelLocale::English => EnglishLabels.label(day),
        }
    }
}

impl FromStr for LabelLocale {
    type Err = InvalidLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-tw" | "zh_tw" => Ok(LabelLocale::ZhTw),
            "en" => Ok(LabelLocale::English),
            _ => Err(InvalidLocale(s.to_string())),
        }
    }
}

impl fmt::Display for LabelLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelLocale::ZhTw => f.write_str("zh-tw"),
            LabelLocale::English => f.write_str("en"),
        }
    }
}
