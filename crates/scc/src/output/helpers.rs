//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use scc_classes_rs::models::{ClassType, ScheduleEntry};

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats open seats as `remaining/total`, red when full.
pub fn format_seats(remaining: i32, total: i32, use_colors: bool) -> String {
    let label = format!("{remaining}/{total}");
    if !use_colors {
        return label;
    }
    if remaining <= 0 {
        label.red().to_string()
    } else if i64::from(remaining) * 5 <= i64::from(total) {
        label.yellow().to_string()
    } else {
        label.green().to_string()
    }
}

/// Formats a delivery type.
pub fn format_class_type(class_type: ClassType, use_colors: bool) -> String {
    let label = class_type.as_str();
    if !use_colors {
        return label.to_string();
    }
    match class_type {
        ClassType::Online => label.cyan().to_string(),
        ClassType::Hybrid => label.magenta().to_string(),
        ClassType::InPerson => label.to_string(),
    }
}

/// Formats the meeting pattern of one schedule entry, e.g. `MW 10:00 am-11:50 am`.
pub fn format_meeting(schedule: &ScheduleEntry) -> String {
    let days: String = schedule.days.iter().map(|day| day.letter()).collect();
    if days.is_empty() {
        schedule.time.to_string()
    } else {
        format!("{days} {}", schedule.time)
    }
}

/// Pads a possibly colored string to `width` visible characters.
pub fn pad(colored: &str, plain_len: usize, width: usize) -> String {
    format!("{colored}{}", " ".repeat(width.saturating_sub(plain_len)))
}
