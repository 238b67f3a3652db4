//! Schedule entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Minutes, TimeOfDay};

/// How a schedule's departures are described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// Fixed departure times.
    Regular,
    /// Time windows with a headway range.
    Flexible,
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMode::Regular => f.write_str("regular"),
            ScheduleMode::Flexible => f.write_str("flexible"),
        }
    }
}

/// One entry of a day's schedule, discriminated by its `type` field.
///
/// ```
/// use schedule_server::domain::{ScheduleEntry, ScheduleMode};
///
/// let json = r#"{"type":"flexible","start_time":"06:00","end_time":"22:00","min_headway":8,"max_headway":15}"#;
/// let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
/// assert_eq!(entry.mode(), ScheduleMode::Flexible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleEntry {
    /// A single fixed departure.
    Regular { arrival_time: TimeOfDay },

    /// Departures every `min_headway` to `max_headway` minutes between
    /// `start_time` and `end_time`.
    Flexible {
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        min_headway: Minutes,
        max_headway: Minutes,
    },
}

impl ScheduleEntry {
    pub fn regular(arrival_time: impl Into<String>) -> Self {
        ScheduleEntry::Regular {
            arrival_time: TimeOfDay::new(arrival_time),
        }
    }

    pub fn flexible(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        min_headway: u16,
        max_headway: u16,
    ) -> Self {
        ScheduleEntry::Flexible {
            start_time: TimeOfDay::new(start_time),
            end_time: TimeOfDay::new(end_time),
            min_headway: Minutes(min_headway),
            max_headway: Minutes(max_headway),
        }
    }

    /// The mode this entry belongs to.
    pub fn mode(&self) -> ScheduleMode {
        match self {
            ScheduleEntry::Regular { .. } => ScheduleMode::Regular,
            ScheduleEntry::Flexible { .. } => ScheduleMode::Flexible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_regular() {
        let json = r#"{"type":"regular","arrival_time":"08:30"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, ScheduleEntry::regular("08:30"));
        assert_eq!(entry.mode(), ScheduleMode::Regular);
    }

    #[test]
    fn deserialize_flexible() {
        let json = r#"{
            "type": "flexible",
            "start_time": "09:00",
            "end_time": "18:00",
            "min_headway": 10,
            "max_headway": 20
        }"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, ScheduleEntry::flexible("09:00", "18:00", 10, 20));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let json = r#"{"type":"regular","arrival_time":"07:00","stop_id":"TPE123"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, ScheduleEntry::regular("07:00"));
    }

    #[test]
    fn reject_unknown_kind() {
        let json = r#"{"type":"on_demand","arrival_time":"07:00"}"#;
        assert!(serde_json::from_str::<ScheduleEntry>(json).is_err());
    }

    #[test]
    fn reject_missing_fields() {
        let json = r#"{"type":"flexible","start_time":"09:00"}"#;
        assert!(serde_json::from_str::<ScheduleEntry>(json).is_err());
    }

    #[test]
    fn serialize_roundtrips_tag() {
        let json = serde_json::to_value(ScheduleEntry::regular("12:00")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "regular", "arrival_time": "12:00"})
        );
    }

    #[test]
    fn mode_display() {
        assert_eq!(ScheduleMode::Regular.to_string(), "regular");
        assert_eq!(ScheduleMode::Flexible.to_string(), "flexible");
    }
}
