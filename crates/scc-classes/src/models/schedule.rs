//! Schedule entry types: weekdays, meeting times and date ranges.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A standard day of the week, as written by the registration system.
///
/// Each day is a single letter; Thursday is `R` and Sunday is `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "U")]
    Sunday,
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "R")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
}

impl DayOfWeek {
    /// All days, Sunday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Looks up a day by its single-letter code.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(DayOfWeek::Sunday),
            'M' => Some(DayOfWeek::Monday),
            'T' => Some(DayOfWeek::Tuesday),
            'W' => Some(DayOfWeek::Wednesday),
            'R' => Some(DayOfWeek::Thursday),
            'F' => Some(DayOfWeek::Friday),
            'S' => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    /// Returns the single-letter code (e.g. `R` for Thursday).
    pub fn letter(self) -> char {
        match self {
            DayOfWeek::Sunday => 'U',
            DayOfWeek::Monday => 'M',
            DayOfWeek::Tuesday => 'T',
            DayOfWeek::Wednesday => 'W',
            DayOfWeek::Thursday => 'R',
            DayOfWeek::Friday => 'F',
            DayOfWeek::Saturday => 'S',
        }
    }

    /// Returns the full English name (e.g. "Thursday").
    pub fn long(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Returns the three-letter abbreviation (e.g. "Thu").
    pub fn short(self) -> &'static str {
        &self.long()[..3]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A closed interval between two points of the same kind.
///
/// Serialized with an explicit `"kind": "interval"` marker so a decoded value
/// is always rebuilt as an interval and never confused with plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "interval")]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T> Interval<T> {
    /// Creates an interval from its two endpoints.
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

/// The meeting time of a schedule entry.
///
/// Only the time of day is known. When the registration system does not give
/// a usable range, the raw text is kept as a label instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleTime {
    /// A start and end time of day.
    Range { interval: Interval<NaiveTime> },

    /// A textual marker such as "TBA", "ONLINE" or "9:00 am (malformed)".
    Label { label: String },
}

impl ScheduleTime {
    /// Creates a label time.
    pub fn label(label: impl Into<String>) -> Self {
        ScheduleTime::Label {
            label: label.into(),
        }
    }

    /// Creates a ranged time.
    pub fn range(start: NaiveTime, end: NaiveTime) -> Self {
        ScheduleTime::Range {
            interval: Interval::new(start, end),
        }
    }

    /// Returns true if this is a concrete time range.
    pub fn is_range(&self) -> bool {
        matches!(self, ScheduleTime::Range { .. })
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleTime::Range { interval } => write!(
                f,
                "{}-{}",
                interval.start.format("%-I:%M %P"),
                interval.end.format("%-I:%M %P")
            ),
            ScheduleTime::Label { label } => write!(f, "{label}"),
        }
    }
}

/// The calendar span over which a schedule entry meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub interval: Interval<NaiveDate>,
}

impl DateRange {
    /// Creates a date range from its first and last day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            interval: Interval::new(start, end),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.interval.start.format("%m/%d"),
            self.interval.end.format("%m/%d")
        )
    }
}

/// One meeting pattern of a class entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Non-stable unique identifier.
    pub uid: String,

    /// Meeting days, in the order they were listed.
    pub days: Vec<DayOfWeek>,

    /// Meeting time of day.
    pub time: ScheduleTime,

    /// First and last meeting dates.
    pub date: DateRange,

    /// Instructor text as shown in the table.
    pub instructor: String,

    /// Location text (building/room, or "ONLINE").
    pub location: String,

    /// Free-form attribute text.
    pub attributes: String,
}

impl ScheduleEntry {
    /// Returns true if the location mentions "online" in any casing.
    pub fn is_online_location(&self) -> bool {
        self.location.to_lowercase().contains("online")
    }
}
