//! Domain types for route departure schedules.
//!
//! This module contains the value types that describe a route's weekly
//! schedule as delivered by a schedule provider. Days and subsets are
//! closed, validated types; times are kept verbatim and validated on use.

mod day;
mod entry;
mod schedule;
mod time;

pub use day::{Day, DaySubset, InvalidDay, InvalidDaySubset};
pub use entry::{ScheduleEntry, ScheduleMode};
pub use schedule::{MixedEntriesError, WeeklySchedule};
pub use time::{MalformedTimeError, Minutes, TimeOfDay};
