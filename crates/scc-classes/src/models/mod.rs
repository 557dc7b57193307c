//! Data types for extracted class entries.
//!
//! A [`ClassEntry`] is one offered section of a course. It owns one or more
//! [`ScheduleEntry`] meeting patterns, each with its own days, time, date range,
//! instructor and location.

mod class_entry;
mod schedule;

pub use class_entry::*;
pub use schedule::*;
