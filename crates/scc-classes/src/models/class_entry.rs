//! Class entry types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::schedule::ScheduleEntry;

/// Seat counts for a section or its waitlist.
///
/// The registration system usually satisfies `actual + remaining == total`,
/// but the numbers are stored exactly as shown and never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub total: i32,
    pub actual: i32,
    pub remaining: i32,
}

/// How a class is delivered, derived from its schedule entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassType {
    Online,
    Hybrid,
    #[default]
    InPerson,
}

impl ClassType {
    /// Returns the wire name (`online`, `hybrid` or `in-person`).
    pub fn as_str(self) -> &'static str {
        match self {
            ClassType::Online => "online",
            ClassType::Hybrid => "hybrid",
            ClassType::InPerson => "in-person",
        }
    }

    /// Derives the delivery type from a full list of schedule entries.
    ///
    /// - `hybrid`: some location is online and some time is a concrete range
    /// - `online`: some location is online and no time is a range
    /// - `in-person`: otherwise
    pub fn from_schedule(schedule: &[ScheduleEntry]) -> Self {
        let has_online = schedule.iter().any(ScheduleEntry::is_online_location);
        let has_range = schedule.iter().any(|entry| entry.time.is_range());

        match (has_online, has_range) {
            (true, true) => ClassType::Hybrid,
            (true, false) => ClassType::Online,
            _ => ClassType::InPerson,
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offered section of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Non-stable unique identifier.
    pub uid: String,

    /// Delivery type, recomputed whenever a schedule entry is added.
    #[serde(rename = "type")]
    pub class_type: ClassType,

    pub title: String,

    /// Course reference number.
    pub crn: u32,

    /// Campus code (e.g. `M` for main, `VJO` for online).
    pub campus: String,

    pub credit: f64,

    pub subject: String,
    pub course: String,
    pub section: String,

    /// Department title the section was listed under.
    #[serde(default)]
    pub department: String,

    pub capacity: Capacity,
    pub waitlist: Capacity,

    /// Meeting patterns, never empty for entries produced by the parser.
    pub schedule: Vec<ScheduleEntry>,
}

impl ClassEntry {
    /// Appends a schedule entry and refreshes the delivery type.
    pub fn push_schedule(&mut self, entry: ScheduleEntry) {
        self.schedule.push(entry);
        self.class_type = ClassType::from_schedule(&self.schedule);
    }

    /// Returns the subject/course/section code, e.g. `ACCT 001-0`.
    pub fn code(&self) -> String {
        format!("{} {}-{}", self.subject, self.course, self.section)
    }
}

/// A class entry together with the view flags a filter query can inspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterableClassEntry {
    #[serde(flatten)]
    pub entry: ClassEntry,

    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub expanded: bool,
}

impl From<ClassEntry> for FilterableClassEntry {
    fn from(entry: ClassEntry) -> Self {
        Self {
            entry,
            selected: false,
            expanded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, DayOfWeek, ScheduleTime};
    use chrono::{NaiveDate, NaiveTime};

    fn make_schedule(time: ScheduleTime, location: &str) -> ScheduleEntry {
        ScheduleEntry {
            uid: "s1".to_string(),
            days: vec![DayOfWeek::Monday],
            time,
            date: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 8, 12).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 13).unwrap(),
            ),
            instructor: String::new(),
            location: location.to_string(),
            attributes: String::new(),
        }
    }

    fn ranged() -> ScheduleTime {
        ScheduleTime::range(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_class_type_in_person() {
        let schedule = vec![make_schedule(ranged(), "0500 0505")];
        assert_eq!(ClassType::from_schedule(&schedule), ClassType::InPerson);
    }

    #[test]
    fn test_class_type_online() {
        let schedule = vec![make_schedule(ScheduleTime::label("TBA"), "ONLINE ")];
        assert_eq!(ClassType::from_schedule(&schedule), ClassType::Online);
    }

    #[test]
    fn test_class_type_hybrid_across_entries() {
        let schedule = vec![
            make_schedule(ScheduleTime::label("TBA"), "Online"),
            make_schedule(ranged(), "1400 1402"),
        ];
        assert_eq!(ClassType::from_schedule(&schedule), ClassType::Hybrid);
    }

    #[test]
    fn test_class_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&ClassType::InPerson).unwrap(),
            "\"in-person\""
        );
        assert_eq!(ClassType::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn test_filterable_entry_flattens() {
        let entry = ClassEntry {
            uid: "c1".to_string(),
            class_type: ClassType::InPerson,
            title: "Intro".to_string(),
            crn: 80644,
            campus: "M".to_string(),
            credit: 3.0,
            subject: "ACCT".to_string(),
            course: "001".to_string(),
            section: "0".to_string(),
            department: "Accounting".to_string(),
            capacity: Capacity::default(),
            waitlist: Capacity::default(),
            schedule: vec![make_schedule(ranged(), "0500")],
        };
        let json = serde_json::to_value(FilterableClassEntry::from(entry)).unwrap();
        assert_eq!(json["crn"], 80644);
        assert_eq!(json["type"], "in-person");
        assert_eq!(json["selected"], false);
    }
}
