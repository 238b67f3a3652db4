//! Weekly departure schedules.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Day, DaySubset, ScheduleEntry, ScheduleMode};

/// Error returned when a schedule mixes regular and flexible entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schedule mixes {first} entries ({first_day}) with {conflicting} entries ({conflicting_day})")]
pub struct MixedEntriesError {
    pub first_day: Day,
    pub first: ScheduleMode,
    pub conflicting_day: Day,
    pub conflicting: ScheduleMode,
}

/// A route's departures for each day of the week.
///
/// Days are kept in a `BTreeMap`, so every iteration runs Monday to Sunday
/// regardless of the order the provider sent them in. A day may be absent or
/// present with no entries; both mean "no departures".
///
/// On the wire a schedule is a JSON object keyed by day name. Each day holds
/// either an array of entries or an object whose values are the entries (in
/// document order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, Vec<ScheduleEntry>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries for a day.
    pub fn insert(&mut self, day: Day, entries: Vec<ScheduleEntry>) {
        self.days.insert(day, entries);
    }

    /// Append an entry to a day.
    pub fn push(&mut self, day: Day, entry: ScheduleEntry) {
        self.days.entry(day).or_default().push(entry);
    }

    /// Entries for a day, empty if the day is absent.
    pub fn entries(&self, day: Day) -> &[ScheduleEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days with their entries, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &[ScheduleEntry])> {
        self.days.iter().map(|(day, entries)| (*day, entries.as_slice()))
    }

    /// Like [`iter`](Self::iter), restricted to days in `subset`.
    pub fn filtered(&self, subset: DaySubset) -> impl Iterator<Item = (Day, &[ScheduleEntry])> {
        self.iter().filter(move |(day, _)| subset.contains(*day))
    }

    /// Total number of entries across all days.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// The mode shared by every entry, or `None` if there are no entries.
    ///
    /// ```
    /// use schedule_server::domain::{Day, ScheduleEntry, ScheduleMode, WeeklySchedule};
    ///
    /// let mut schedule = WeeklySchedule::new();
    /// schedule.push(Day::Monday, ScheduleEntry::regular("08:30"));
    /// assert_eq!(schedule.mode(), Ok(Some(ScheduleMode::Regular)));
    ///
    /// schedule.push(Day::Sunday, ScheduleEntry::flexible("09:00", "18:00", 10, 20));
    /// assert!(schedule.mode().is_err());
    /// ```
    pub fn mode(&self) -> Result<Option<ScheduleMode>, MixedEntriesError> {
        self.mode_within(DaySubset::all())
    }

    /// The mode shared by every entry on the days in `subset`.
    pub fn mode_within(
        &self,
        subset: DaySubset,
    ) -> Result<Option<ScheduleMode>, MixedEntriesError> {
        let mut first: Option<(Day, ScheduleMode)> = None;

        for (day, entries) in self.filtered(subset) {
            for entry in entries {
                let mode = entry.mode();
                match first {
                    None => first = Some((day, mode)),
                    Some((first_day, first_mode)) if first_mode != mode => {
                        return Err(MixedEntriesError {
                            first_day,
                            first: first_mode,
                            conflicting_day: day,
                            conflicting: mode,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(first.map(|(_, mode)| mode))
    }
}

impl FromIterator<(Day, Vec<ScheduleEntry>)> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = (Day, Vec<ScheduleEntry>)>>(iter: I) -> Self {
        let mut schedule = Self::new();
        for (day, entries) in iter {
            schedule.days.entry(day).or_default().extend(entries);
        }
        schedule
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<Day, EntryList>::deserialize(deserializer)?;
        Ok(Self {
            days: raw.into_iter().map(|(day, list)| (day, list.0)).collect(),
        })
    }
}

/// A day's entries as an array or as an object of entries.
struct EntryList(Vec<ScheduleEntry>);

impl<'de> Deserialize<'de> for EntryList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EntryListVisitor)
    }
}

struct EntryListVisitor;

impl<'de> Visitor<'de> for EntryListVisitor {
    type Value = EntryList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array or object of schedule entries")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element()? {
            entries.push(entry);
        }
        Ok(EntryList(entries))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((_, entry)) = map.next_entry::<IgnoredAny, ScheduleEntry>()? {
            entries.push(entry);
        }
        Ok(EntryList(entries))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EntryList(Vec::new()))
    }
}
