//! Property paths a query may name, and how each one is read from an entry.

use std::borrow::Cow;

use scc_classes_rs::models::{FilterableClassEntry, ScheduleEntry};
use strsim::levenshtein;

use crate::evaluator::{ArrayCursor, Value};

/// Maximum Levenshtein distance to consider a path as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A recognized property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Crn,
    Type,
    Title,
    Campus,
    Credit,
    Subject,
    Course,
    Section,
    CapacityTotal,
    CapacityActual,
    CapacityRemaining,
    WaitlistTotal,
    WaitlistActual,
    WaitlistRemaining,
    Schedule(ScheduleField),
    Selected,
    Expanded,
}

/// A schedule entry field reached through the `schedule` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    Days,
    Instructor,
    Location,
    Attributes,
}

impl ScheduleField {
    /// Calls `visit` with every value this field holds in one schedule entry,
    /// stopping at the first `true`.
    pub(crate) fn any(self, entry: &ScheduleEntry, mut visit: impl FnMut(Value<'_>) -> bool) -> bool {
        match self {
            ScheduleField::Days => entry
                .days
                .iter()
                .any(|day| visit(Value::String(Cow::Owned(day.letter().to_string())))),
            ScheduleField::Instructor => visit(Value::from(entry.instructor.as_str())),
            ScheduleField::Location => visit(Value::from(entry.location.as_str())),
            ScheduleField::Attributes => visit(Value::from(entry.attributes.as_str())),
        }
    }
}

/// Every recognized path, in documentation order.
pub const IDENTIFIERS: [(&str, Property); 20] = [
    ("crn", Property::Crn),
    ("type", Property::Type),
    ("title", Property::Title),
    ("campus", Property::Campus),
    ("credit", Property::Credit),
    ("subject", Property::Subject),
    ("course", Property::Course),
    ("section", Property::Section),
    ("capacity.total", Property::CapacityTotal),
    ("capacity.actual", Property::CapacityActual),
    ("capacity.remaining", Property::CapacityRemaining),
    ("waitlist.total", Property::WaitlistTotal),
    ("waitlist.actual", Property::WaitlistActual),
    ("waitlist.remaining", Property::WaitlistRemaining),
    ("schedule.days", Property::Schedule(ScheduleField::Days)),
    ("schedule.instructor", Property::Schedule(ScheduleField::Instructor)),
    ("schedule.location", Property::Schedule(ScheduleField::Location)),
    ("schedule.attributes", Property::Schedule(ScheduleField::Attributes)),
    ("selected", Property::Selected),
    ("expanded", Property::Expanded),
];

impl Property {
    /// Looks up a path exactly as written.
    pub fn from_path(path: &str) -> Option<Self> {
        IDENTIFIERS
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, property)| *property)
    }

    /// Returns the dotted path for this property.
    pub fn path(self) -> &'static str {
        IDENTIFIERS
            .iter()
            .find(|(_, property)| *property == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    /// Reads this property from an entry.
    ///
    /// Schedule fields resolve to an [`ArrayCursor`], which comparisons
    /// treat as "any schedule entry matches".
    pub fn resolve(self, filterable: &FilterableClassEntry) -> Value<'_> {
        let entry = &filterable.entry;
        match self {
            Property::Crn => Value::Number(f64::from(entry.crn)),
            Property::Type => Value::from(entry.class_type.as_str()),
            Property::Title => Value::from(entry.title.as_str()),
            Property::Campus => Value::from(entry.campus.as_str()),
            Property::Credit => Value::Number(entry.credit),
            Property::Subject => Value::from(entry.subject.as_str()),
            Property::Course => Value::from(entry.course.as_str()),
            Property::Section => Value::from(entry.section.as_str()),
            Property::CapacityTotal => Value::Number(f64::from(entry.capacity.total)),
            Property::CapacityActual => Value::Number(f64::from(entry.capacity.actual)),
            Property::CapacityRemaining => Value::Number(f64::from(entry.capacity.remaining)),
            Property::WaitlistTotal => Value::Number(f64::from(entry.waitlist.total)),
            Property::WaitlistActual => Value::Number(f64::from(entry.waitlist.actual)),
            Property::WaitlistRemaining => Value::Number(f64::from(entry.waitlist.remaining)),
            Property::Schedule(field) => Value::Array(ArrayCursor::new(&entry.schedule, field)),
            Property::Selected => Value::Bool(filterable.selected),
            Property::Expanded => Value::Bool(filterable.expanded),
        }
    }
}

/// Suggests a recognized path for an unknown identifier.
///
/// A path that starts with the identifier is preferred. Otherwise the closest
/// path by edit distance is offered if it is within a few edits and no more
/// than half the identifier was changed.
pub fn suggest(identifier: &str) -> Option<&'static str> {
    if identifier.is_empty() {
        return None;
    }

    if let Some((name, _)) = IDENTIFIERS
        .iter()
        .find(|(name, _)| name.starts_with(identifier))
    {
        return Some(name);
    }

    let lower = identifier.to_lowercase();
    let (best, distance) = IDENTIFIERS
        .iter()
        .map(|(name, _)| (*name, levenshtein(&lower, name)))
        .min_by_key(|(_, distance)| *distance)?;

    if distance > 0
        && distance <= MAX_SUGGESTION_DISTANCE
        && distance * 2 <= identifier.chars().count()
    {
        Some(best)
    } else {
        None
    }
}
