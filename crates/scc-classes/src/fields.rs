//! Parsers for the raw text of schedule-related table cells.
//!
//! Day and date problems are structural and abort the parse. A time that cannot
//! be read is kept as a `(malformed)` label so the row still imports.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::warn;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Capacity, ClassType, DateRange, DayOfWeek, ScheduleEntry, ScheduleTime};

/// Time cell markers that stand in for a concrete range.
const TIME_LABELS: [&str; 2] = ["TBA", "ONLINE"];

/// Accepted layouts for one side of a time range (input is uppercased first).
const CLOCK_FORMATS: [&str; 2] = ["%I:%M %p", "%I:%M%p"];

/// Raw cell text for one schedule entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSchedule<'a> {
    pub days: &'a str,
    pub time: &'a str,
    pub instructor: &'a str,
    pub date: &'a str,
    pub location: &'a str,
    pub attributes: &'a str,
}

/// Parses a day string such as `MWF` into weekday codes, in order.
///
/// # Errors
///
/// Returns `Error::InvalidDayOfWeek` naming the first character outside
/// `{U, M, T, W, R, F, S}`.
pub fn parse_days(text: &str) -> Result<Vec<DayOfWeek>> {
    text.trim()
        .chars()
        .map(|day| {
            DayOfWeek::from_letter(day).ok_or_else(|| Error::InvalidDayOfWeek {
                day,
                source_text: text.to_string(),
            })
        })
        .collect()
}

/// Parses a time cell such as `10:00 am-11:50 am`.
///
/// `TBA` and `ONLINE` (as whole words) become labels. A range with a missing or
/// unreadable side becomes the label `"<text> (malformed)"`.
pub fn parse_time(text: &str) -> ScheduleTime {
    if let Some(marker) = TIME_LABELS
        .iter()
        .find(|marker| text.split_whitespace().any(|word| word == **marker))
    {
        return ScheduleTime::label(*marker);
    }

    let mut sides = text.split('-').map(str::trim);
    let (Some(start), Some(end)) = (sides.next(), sides.next()) else {
        return malformed_time(text);
    };
    if start.is_empty() || end.is_empty() {
        return malformed_time(text);
    }

    match (parse_clock(start), parse_clock(end)) {
        (Some(start), Some(end)) => ScheduleTime::range(start, end),
        _ => malformed_time(text),
    }
}

fn malformed_time(text: &str) -> ScheduleTime {
    warn!(time = text, "malformed time range");
    ScheduleTime::label(format!("{text} (malformed)"))
}

/// Parses a 12-hour clock time like `9:05 pm`.
fn parse_clock(text: &str) -> Option<NaiveTime> {
    let upper = text.trim().to_uppercase();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&upper, format).ok())
}

/// Parses a date cell such as `08/12-12/13` in the given year.
///
/// An end date that falls before the start is moved into the following year.
///
/// # Errors
///
/// Returns `Error::InvalidDateRange` if either side is missing, or
/// `Error::InvalidDate` if a side is not a valid `MM/DD`.
pub fn parse_date_range(text: &str, year: i32) -> Result<DateRange> {
    let mut sides = text.split('-').map(str::trim);
    let (Some(start), Some(end)) = (sides.next(), sides.next()) else {
        return Err(Error::invalid_date_range(text));
    };
    if start.is_empty() || end.is_empty() {
        return Err(Error::invalid_date_range(text));
    }

    let start = parse_month_day(start, year)?;
    let mut end = parse_month_day(end, year)?;
    if end < start {
        end = NaiveDate::from_ymd_opt(year + 1, end.month(), end.day())
            .ok_or_else(|| Error::invalid_date(text))?;
    }

    Ok(DateRange::new(start, end))
}

/// Parses `MM/DD` into a date in `year`.
fn parse_month_day(text: &str, year: i32) -> Result<NaiveDate> {
    let (month, day) = text
        .split_once('/')
        .ok_or_else(|| Error::invalid_date(text))?;
    let month: u32 = month.trim().parse().map_err(|_| Error::invalid_date(text))?;
    let day: u32 = day.trim().parse().map_err(|_| Error::invalid_date(text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::invalid_date(text))
}

/// Packages pre-extracted seat counts. No arithmetic is checked.
pub fn parse_capacity(total: i32, actual: i32, remaining: i32) -> Capacity {
    Capacity {
        total,
        actual,
        remaining,
    }
}

/// Derives the delivery type from a class's full schedule.
pub fn derive_class_type(schedule: &[ScheduleEntry]) -> ClassType {
    ClassType::from_schedule(schedule)
}

/// Builds a schedule entry from its raw cells.
///
/// # Errors
///
/// Propagates day and date errors; time problems are absorbed into a label.
pub fn parse_schedule(raw: RawSchedule<'_>, year: i32) -> Result<ScheduleEntry> {
    Ok(ScheduleEntry {
        uid: Uuid::new_v4().to_string(),
        days: parse_days(raw.days)?,
        time: parse_time(raw.time),
        date: parse_date_range(raw.date, year)?,
        instructor: raw.instructor.to_string(),
        location: raw.location.to_string(),
        attributes: raw.attributes.to_string(),
    })
}
