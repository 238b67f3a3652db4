//! Schedule aggregation.
//!
//! Turns a [`WeeklySchedule`] into the structure a departure view renders:
//! a timetable of compact time codes for regular schedules, or a day-by-day
//! list of headway windows for flexible ones.
//!
//! The pipeline is filter, classify, format, group, materialize. Days are
//! grouped in a `BTreeMap<Day, _>`, so output always follows canonical week
//! order and a day only appears if it contributed at least one item.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::{
    Day, DaySubset, MalformedTimeError, MixedEntriesError, ScheduleEntry, ScheduleMode,
    WeeklySchedule,
};
use crate::labels::{DayLabeler, ZhTwLabels};

/// Errors from aggregating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// A time on `day` is not in "HH:MM" form.
    #[error("{day}: {source}")]
    MalformedTime {
        day: Day,
        #[source]
        source: MalformedTimeError,
    },

    /// Regular and flexible entries were mixed under [`ModePolicy::Strict`].
    #[error(transparent)]
    MixedEntries(#[from] MixedEntriesError),
}

/// How the aggregator settles the mode of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePolicy {
    /// The variant of the last entry visited wins. Entries are visited day by
    /// day in canonical order, then in schedule order within a day.
    #[default]
    LastSeen,

    /// Any mix of variants within the requested days is an error.
    Strict,
}

/// Error returned when parsing an unknown mode policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode policy {0:?} (expected \"last-seen\" or \"strict\")")]
pub struct InvalidModePolicy(String);

impl FromStr for ModePolicy {
    type Err = InvalidModePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "last-seen" => Ok(ModePolicy::LastSeen),
            "strict" => Ok(ModePolicy::Strict),
            other => Err(InvalidModePolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ModePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModePolicy::LastSeen => f.write_str("last-seen"),
            ModePolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Configuration for an [`Aggregator`].
#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    pub mode_policy: ModePolicy,
}

/// One formatted departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureItem {
    /// A compact "HHMM" code from a regular entry.
    Time(String),

    /// A headway window from a flexible entry, e.g. label `09:00 ~ 18:00`,
    /// value `10分至20分`.
    Window { label: String, value: String },
}

impl DepartureItem {
    /// Format a schedule entry, validating every time it carries.
    pub fn from_entry(entry: &ScheduleEntry) -> Result<Self, MalformedTimeError> {
        match entry {
            ScheduleEntry::Regular { arrival_time } => {
                Ok(DepartureItem::Time(arrival_time.compact_code()?))
            }
            ScheduleEntry::Flexible {
                start_time,
                end_time,
                min_headway,
                max_headway,
            } => {
                start_time.parse()?;
                end_time.parse()?;
                Ok(DepartureItem::Window {
                    label: format!("{start_time} ~ {end_time}"),
                    value: format!("{min_headway}分至{max_headway}分"),
                })
            }
        }
    }

    /// The label, present only for windows.
    pub fn label(&self) -> Option<&str> {
        match self {
            DepartureItem::Time(_) => None,
            DepartureItem::Window { label, .. } => Some(label),
        }
    }

    /// The text shown in a timetable cell or under a window label.
    pub fn value(&self) -> &str {
        match self {
            DepartureItem::Time(code) => code,
            DepartureItem::Window { value, .. } => value,
        }
    }
}

impl Serialize for DepartureItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            label: Option<&'a str>,
            value: &'a str,
        }

        Repr {
            label: self.label(),
            value: self.value(),
        }
        .serialize(serializer)
    }
}

/// Formatted departures keyed by day, iterated in canonical order.
///
/// Only days with at least one item are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureGroup {
    days: BTreeMap<Day, Vec<DepartureItem>>,
}

impl DepartureGroup {
    fn push(&mut self, day: Day, item: DepartureItem) {
        self.days.entry(day).or_default().push(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[DepartureItem])> {
        self.days.iter().map(|(day, items)| (*day, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn into_table(self) -> DepartureTable {
        let rows = self
            .days
            .into_iter()
            .map(|(day, items)| TableRow {
                day,
                cells: items
                    .into_iter()
                    .map(|item| match item {
                        DepartureItem::Time(code) => code,
                        DepartureItem::Window { value, .. } => value,
                    })
                    .collect(),
            })
            .collect();
        DepartureTable { rows }
    }

    fn into_list(self, labeler: &impl DayLabeler) -> DepartureList {
        let sections = self
            .days
            .into_iter()
            .map(|(day, items)| ListSection {
                day,
                title: labeler.label(day).into_owned(),
                items,
            })
            .collect();
        DepartureList { sections }
    }
}

/// One day of a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub day: Day,
    /// Cells in entry order. Rows are not padded to a common width.
    pub cells: Vec<String>,
}

/// Row-per-day timetable for regular schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepartureTable {
    pub rows: Vec<TableRow>,
}

impl DepartureTable {
    /// Width of the longest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// One day of a grouped list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSection {
    pub day: Day,
    /// Heading from the day labeler.
    pub title: String,
    pub items: Vec<DepartureItem>,
}

/// Section-per-day list for flexible schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepartureList {
    pub sections: Vec<ListSection>,
}

/// The display-ready result of aggregating a schedule.
///
/// Serializes with a `mode` tag: `regular` carries `rows`, `flexible`
/// carries `sections`, and `empty` carries nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode")]
pub enum AggregationResult {
    #[serde(rename = "regular")]
    Table(DepartureTable),

    #[serde(rename = "flexible")]
    List(DepartureList),

    /// No entries on any requested day.
    #[serde(rename = "empty")]
    Empty,
}

impl AggregationResult {
    /// The resolved mode, `None` for an empty result.
    pub fn mode(&self) -> Option<ScheduleMode> {
        match self {
            AggregationResult::Table(_) => Some(ScheduleMode::Regular),
            AggregationResult::List(_) => Some(ScheduleMode::Flexible),
            AggregationResult::Empty => None,
        }
    }

    /// Number of rows or sections.
    pub fn len(&self) -> usize {
        match self {
            AggregationResult::Table(table) => table.rows.len(),
            AggregationResult::List(list) => list.sections.len(),
            AggregationResult::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Days present in the result, in canonical order.
    pub fn days(&self) -> Vec<Day> {
        match self {
            AggregationResult::Table(table) => table.rows.iter().map(|r| r.day).collect(),
            AggregationResult::List(list) => list.sections.iter().map(|s| s.day).collect(),
            AggregationResult::Empty => Vec::new(),
        }
    }
}

/// Aggregates schedules with a fixed labeler and mode policy.
///
/// # Examples
///
/// ```
/// use schedule_server::aggregate::{AggregationResult, Aggregator};
/// use schedule_server::domain::{Day, DaySubset, ScheduleEntry, WeeklySchedule};
///
/// let mut schedule = WeeklySchedule::new();
/// schedule.push(Day::Monday, ScheduleEntry::regular("08:30"));
/// schedule.push(Day::Tuesday, ScheduleEntry::regular("09:15"));
///
/// let aggregator: Aggregator = Aggregator::default();
/// let AggregationResult::Table(table) = aggregator
///     .aggregate(&schedule, DaySubset::weekday())
///     .unwrap()
/// else {
///     panic!("expected a table");
/// };
/// assert_eq!(table.rows[0].cells, vec!["0830"]);
/// assert_eq!(table.rows[1].cells, vec!["0915"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator<L = ZhTwLabels> {
    labeler: L,
    config: AggregatorConfig,
}

impl<L: DayLabeler> Aggregator<L> {
    pub fn new(labeler: L, config: AggregatorConfig) -> Self {
        Self { labeler, config }
    }

    /// Aggregate the days of `schedule` that fall in `subset`.
    ///
    /// Either returns a complete result or fails; a malformed time anywhere
    /// in the requested days fails the whole call.
    pub fn aggregate(
        &self,
        schedule: &WeeklySchedule,
        subset: DaySubset,
    ) -> Result<AggregationResult, AggregateError> {
        if self.config.mode_policy == ModePolicy::Strict {
            schedule.mode_within(subset)?;
        }

        let (mode, group) = collect(schedule, subset)?;

        Ok(match mode {
            None => AggregationResult::Empty,
            Some(ScheduleMode::Regular) => AggregationResult::Table(group.into_table()),
            Some(ScheduleMode::Flexible) => {
                AggregationResult::List(group.into_list(&self.labeler))
            }
        })
    }
}

/// Aggregate with Traditional Chinese day labels and last-seen mode
/// resolution.
pub fn aggregate(
    schedule: &WeeklySchedule,
    subset: DaySubset,
) -> Result<AggregationResult, AggregateError> {
    Aggregator::<ZhTwLabels>::default().aggregate(schedule, subset)
}

/// Group the requested days' entries without materializing a view.
pub fn group(
    schedule: &WeeklySchedule,
    subset: DaySubset,
) -> Result<DepartureGroup, AggregateError> {
    collect(schedule, subset).map(|(_, group)| group)
}

/// Format and group every entry on the requested days, tracking the variant
/// of the last entry visited.
fn collect(
    schedule: &WeeklySchedule,
    subset: DaySubset,
) -> Result<(Option<ScheduleMode>, DepartureGroup), AggregateError> {
    let mut mode = None;
    let mut group = DepartureGroup::default();

    for (day, entries) in schedule.filtered(subset) {
        for entry in entries {
            mode = Some(entry.mode());
            let item = DepartureItem::from_entry(entry)
                .map_err(|source| AggregateError::MalformedTime { day, source })?;
            group.push(day, item);
        }
    }

    Ok((mode, group))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn day() -> impl Strategy<Value = Day> {
        prop::sample::select(Day::ALL.to_vec())
    }

    fn day_subset() -> impl Strategy<Value = DaySubset> {
        prop::collection::vec(day(), 0..7).prop_map(|days| days.into_iter().collect())
    }

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    fn regular_entry() -> impl Strategy<Value = ScheduleEntry> {
        valid_time().prop_map(|t| ScheduleEntry::regular(t))
    }

    fn flexible_entry() -> impl Strategy<Value = ScheduleEntry> {
        (valid_time(), valid_time(), 1u16..30, 30u16..90)
            .prop_map(|(start, end, min, max)| ScheduleEntry::flexible(start, end, min, max))
    }

    fn schedule_of(
        entry: impl Strategy<Value = ScheduleEntry>,
    ) -> impl Strategy<Value = WeeklySchedule> {
        prop::collection::vec((day(), prop::collection::vec(entry, 0..5)), 0..10)
            .prop_map(|days| days.into_iter().collect())
    }

    fn days_with_entries(schedule: &WeeklySchedule, subset: DaySubset) -> Vec<Day> {
        schedule
            .filtered(subset)
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(day, _)| day)
            .collect()
    }

    proptest! {
        /// Regular schedules produce one row per requested day with entries
        #[test]
        fn regular_rows_match_days(s in schedule_of(regular_entry()), subset in day_subset()) {
            let result = aggregate(&s, subset).unwrap();
            let expected = days_with_entries(&s, subset);

            match &result {
                AggregationResult::Table(table) => {
                    prop_assert_eq!(table.rows.len(), expected.len());
                    for row in &table.rows {
                        prop_assert_eq!(row.cells.len(), s.entries(row.day).len());
                    }
                }
                AggregationResult::Empty => prop_assert!(expected.is_empty()),
                AggregationResult::List(_) => prop_assert!(false, "regular schedule became a list"),
            }
        }

        /// Flexible schedules produce one section per requested day with entries
        #[test]
        fn flexible_sections_match_days(
            s in schedule_of(flexible_entry()),
            subset in day_subset()
        ) {
            let result = aggregate(&s, subset).unwrap();
            let expected = days_with_entries(&s, subset);

            match &result {
                AggregationResult::List(list) => {
                    prop_assert_eq!(list.sections.len(), expected.len());
                    for section in &list.sections {
                        prop_assert_eq!(section.items.len(), s.entries(section.day).len());
                    }
                }
                AggregationResult::Empty => prop_assert!(expected.is_empty()),
                AggregationResult::Table(_) => prop_assert!(false, "flexible became a table"),
            }
        }

        /// Result days are a strictly increasing subsequence of the week
        #[test]
        fn days_follow_canonical_order(
            s in schedule_of(prop_oneof![regular_entry(), flexible_entry()]),
            subset in day_subset()
        ) {
            let days = aggregate(&s, subset).unwrap().days();
            prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(days.iter().all(|d| subset.contains(*d)));
        }

        /// Aggregation is a pure function of its inputs
        #[test]
        fn aggregation_is_idempotent(
            s in schedule_of(prop_oneof![regular_entry(), flexible_entry()]),
            subset in day_subset()
        ) {
            let before = s.clone();
            let first = aggregate(&s, subset).unwrap();
            let second = aggregate(&s, subset).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(s, before);
        }

        /// An empty subset always yields an empty result
        #[test]
        fn empty_subset_is_empty(s in schedule_of(prop_oneof![regular_entry(), flexible_entry()])) {
            prop_assert_eq!(aggregate(&s, DaySubset::empty()).unwrap(), AggregationResult::Empty);
        }
    }
}
