//! Days of the week and day subsets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown day name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day: {0:?}")]
pub struct InvalidDay(String);

/// A day of the week.
///
/// The derived ordering is the canonical display order, Monday first and
/// Sunday last. Every ordered collection keyed by `Day` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in canonical order.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Returns the lowercase English name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Day::Saturday | Day::Sunday)
    }

    /// Zero-based position in the canonical week.
    fn index(self) -> u8 {
        self as u8
    }
}

impl FromStr for Day {
    type Err = InvalidDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| InvalidDay(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid day subset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDaySubset {
    #[error("day subset must not be blank")]
    Blank,

    #[error(transparent)]
    Day(#[from] InvalidDay),
}

/// A set of days used to filter a weekly schedule.
///
/// Stored as a 7-bit mask, so iteration is always in canonical order no
/// matter how the set was built.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::{Day, DaySubset};
///
/// let weekend = DaySubset::weekend();
/// assert!(weekend.contains(Day::Sunday));
/// assert!(!weekend.contains(Day::Monday));
///
/// let custom: DaySubset = "sunday,monday".parse().unwrap();
/// let days: Vec<Day> = custom.iter().collect();
/// assert_eq!(days, vec![Day::Monday, Day::Sunday]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySubset(u8);

impl DaySubset {
    /// The empty subset.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week.
    pub fn all() -> Self {
        Day::ALL.into_iter().collect()
    }

    /// Monday to Friday.
    pub fn weekday() -> Self {
        Day::ALL.into_iter().filter(|d| !d.is_weekend()).collect()
    }

    /// Saturday and Sunday.
    pub fn weekend() -> Self {
        Day::ALL.into_iter().filter(Day::is_weekend).collect()
    }

    /// Adds a day to the subset.
    pub fn insert(&mut self, day: Day) {
        self.0 |= 1 << day.index();
    }

    pub fn contains(&self, day: Day) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the days in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Day> + use<> {
        let mask = *self;
        Day::ALL.into_iter().filter(move |d| mask.contains(*d))
    }
}

impl FromIterator<Day> for DaySubset {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut subset = Self::empty();
        for day in iter {
            subset.insert(day);
        }
        subset
    }
}

impl FromStr for DaySubset {
    type Err = InvalidDaySubset;

    /// Accepts `weekday`, `weekend`, `all`, or a comma-separated list of
    /// day names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Err(InvalidDaySubset::Blank),
            "weekday" => Ok(Self::weekday()),
            "weekend" => Ok(Self::weekend()),
            "all" => Ok(Self::all()),
            list => list
                .split(',')
                .map(|name| name.trim().parse::<Day>().map_err(InvalidDaySubset::from))
                .collect(),
        }
    }
}

impl fmt::Debug for DaySubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
