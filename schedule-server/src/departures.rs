//! Route departure board.
//!
//! A route's information page shows departures twice: once for weekdays
//! (peak) and once for weekends (off-peak). Both halves run the same
//! aggregation over a different day subset.

use serde::Serialize;

use crate::aggregate::{AggregateError, AggregationResult, Aggregator};
use crate::domain::{Day, DaySubset, WeeklySchedule};
use crate::labels::DayLabeler;

/// Which half of the week a section covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServicePeriod {
    Weekday,
    Weekend,
}

impl ServicePeriod {
    pub const ALL: [ServicePeriod; 2] = [ServicePeriod::Weekday, ServicePeriod::Weekend];

    pub fn days(&self) -> DaySubset {
        match self {
            ServicePeriod::Weekday => DaySubset::weekday(),
            ServicePeriod::Weekend => DaySubset::weekend(),
        }
    }

    /// Anchor id of the section on the route page.
    pub fn id(&self) -> &'static str {
        match self {
            ServicePeriod::Weekday => "weekday-departure",
            ServicePeriod::Weekend => "weekend-departure",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ServicePeriod::Weekday => "平日發車資訊",
            ServicePeriod::Weekend => "假日發車資訊",
        }
    }

    /// Caption shown above a timetable.
    pub fn caption(&self) -> &'static str {
        match self {
            ServicePeriod::Weekday => "尖鋒時間",
            ServicePeriod::Weekend => "離峰時間",
        }
    }
}

/// One half of the departure board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureSection {
    pub id: &'static str,
    pub period: ServicePeriod,
    pub heading: &'static str,
    pub caption: &'static str,
    pub days: Vec<Day>,
    pub departures: AggregationResult,
}

/// Weekday and weekend departures for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureBoard {
    pub sections: Vec<DepartureSection>,
}

impl DepartureBoard {
    /// Aggregate both halves of the week.
    ///
    /// Fails if either half fails; no partial board is returned.
    pub fn build<L: DayLabeler>(
        schedule: &WeeklySchedule,
        aggregator: &Aggregator<L>,
    ) -> Result<Self, AggregateError> {
        let sections = ServicePeriod::ALL
            .into_iter()
            .map(|period| -> Result<DepartureSection, AggregateError> {
                let departures = aggregator.aggregate(schedule, period.days())?;
                Ok(DepartureSection {
                    id: period.id(),
                    period,
                    heading: period.heading(),
                    caption: period.caption(),
                    days: period.days().iter().collect(),
                    departures,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sections })
    }

    pub fn section(&self, period: ServicePeriod) -> Option<&DepartureSection> {
        self.sections.iter().find(|s| s.period == period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleEntry, ScheduleMode};

    fn default_aggregator() -> Aggregator {
        Aggregator::default()
    }

    fn mixed_week() -> WeeklySchedule {
        let mut schedule = WeeklySchedule::new();
        schedule.push(Day::Monday, ScheduleEntry::regular("07:10"));
        schedule.push(Day::Monday, ScheduleEntry::regular("08:40"));
        schedule.push(Day::Friday, ScheduleEntry::regular("07:10"));
        schedule.push(Day::Sunday, ScheduleEntry::flexible("09:00", "18:00", 10, 20));
        schedule
    }

    #[test]
    fn board_has_weekday_then_weekend() {
        let board = DepartureBoard::build(&mixed_week(), &default_aggregator()).unwrap();

        let ids: Vec<&str> = board.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["weekday-departure", "weekend-departure"]);

        let weekday = board.section(ServicePeriod::Weekday).unwrap();
        assert_eq!(weekday.heading, "平日發車資訊");
        assert_eq!(weekday.caption, "尖鋒時間");
        assert_eq!(weekday.departures.mode(), Some(ScheduleMode::Regular));
        assert_eq!(weekday.departures.days(), vec![Day::Monday, Day::Friday]);

        let weekend = board.section(ServicePeriod::Weekend).unwrap();
        assert_eq!(weekend.caption, "離峰時間");
        assert_eq!(weekend.days, vec![Day::Saturday, Day::Sunday]);
        assert_eq!(weekend.departures.mode(), Some(ScheduleMode::Flexible));
        assert_eq!(weekend.departures.days(), vec![Day::Sunday]);
    }

    #[test]
    fn quiet_weekend_is_empty() {
        let mut schedule = WeeklySchedule::new();
        schedule.push(Day::Tuesday, ScheduleEntry::regular("12:00"));

        let board = DepartureBoard::build(&schedule, &default_aggregator()).unwrap();
        let weekend = board.section(ServicePeriod::Weekend).unwrap();
        assert_eq!(weekend.departures, AggregationResult::Empty);
    }

    #[test]
    fn error_in_either_half_fails_the_board() {
        let mut schedule = mixed_week();
        schedule.push(Day::Saturday, ScheduleEntry::regular("25:00"));

        let err = DepartureBoard::build(&schedule, &default_aggregator()).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::MalformedTime {
                day: Day::Saturday,
                ..
            }
        ));
    }

    #[test]
    fn serialize_section() {
        let board = DepartureBoard::build(&WeeklySchedule::new(), &default_aggregator()).unwrap();
        let json = serde_json::to_value(&board.sections[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "weekend-departure",
                "period": "weekend",
                "heading": "假日發車資訊",
                "caption": "離峰時間",
                "days": ["saturday", "sunday"],
                "departures": {"mode": "empty"}
            })
        );
    }
}
