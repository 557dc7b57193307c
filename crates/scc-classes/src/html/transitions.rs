//! Row-type transition table driving the parser.
//!
//! For each visit the table is keyed by the current row's type. Every handler
//! whose guard matches the neighbouring rows fires, in table order, and runs
//! its actions in order.

use super::walker::{InferredType, RowContext};

/// A state change applied to the accumulating parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Remember the current row's text as the active department.
    UpdateDepartment,
    /// Open a new class entry from the current row.
    AddClassEntry,
    /// Append the current row's schedule to the open class entry.
    AddAdditionalScheduleEntry,
    /// Move the open class entry to the output list.
    FinalizeClassEntry,
}

/// Guard on the rows around the current one. `None` matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub up: Option<InferredType>,
    pub down: Option<InferredType>,
}

impl Transition {
    const ANY: Transition = Transition {
        up: None,
        down: None,
    };

    const fn after(up: InferredType) -> Self {
        Transition {
            up: Some(up),
            down: None,
        }
    }

    const fn before(down: InferredType) -> Self {
        Transition {
            up: None,
            down: Some(down),
        }
    }

    /// Returns true if the guard holds for this window.
    pub fn matches(&self, context: &RowContext) -> bool {
        self.up.map_or(true, |up| up == context.up.kind)
            && self.down.map_or(true, |down| down == context.down.kind)
    }
}

/// A guarded list of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handler {
    pub transition: Transition,
    pub actions: &'static [Action],
}

const fn handler(transition: Transition, actions: &'static [Action]) -> Handler {
    Handler {
        transition,
        actions,
    }
}

use Action::*;
use InferredType::*;

// A new department closes the block of the entry above it.
const DEPARTMENT_TITLE_HANDLERS: &[Handler] = &[
    handler(Transition::after(ClassEntryRow), &[FinalizeClassEntry]),
    handler(
        Transition::after(ClassEntryRowAdditionalScheduleEntry),
        &[FinalizeClassEntry],
    ),
    handler(Transition::ANY, &[UpdateDepartment]),
];

// A header closes the block of the entry above it.
const HEADER_HANDLERS: &[Handler] = &[
    handler(Transition::after(ClassEntryRow), &[FinalizeClassEntry]),
    handler(
        Transition::after(ClassEntryRowAdditionalScheduleEntry),
        &[FinalizeClassEntry],
    ),
];

const ROW_HANDLERS: &[Handler] = &[
    handler(
        Transition::after(ClassEntryRow),
        &[FinalizeClassEntry, AddClassEntry],
    ),
    handler(
        Transition::after(ClassEntryRowAdditionalScheduleEntry),
        &[FinalizeClassEntry, AddClassEntry],
    ),
    // First entry in a block.
    handler(Transition::after(ClassEntryHeader), &[AddClassEntry]),
    handler(Transition::before(Nothing), &[FinalizeClassEntry]),
];

const ADDITIONAL_SCHEDULE_HANDLERS: &[Handler] = &[
    handler(
        Transition::after(ClassEntryRow),
        &[AddAdditionalScheduleEntry],
    ),
    handler(
        Transition::after(ClassEntryRowAdditionalScheduleEntry),
        &[AddAdditionalScheduleEntry],
    ),
    handler(Transition::before(Nothing), &[FinalizeClassEntry]),
];

/// Returns the handlers for a row of the given type, in firing order.
pub fn handlers_for(kind: InferredType) -> &'static [Handler] {
    match kind {
        Nothing => &[],
        DepartmentTitle => DEPARTMENT_TITLE_HANDLERS,
        ClassEntryHeader => HEADER_HANDLERS,
        ClassEntryRow => ROW_HANDLERS,
        ClassEntryRowAdditionalScheduleEntry => ADDITIONAL_SCHEDULE_HANDLERS,
    }
}

/// Returns the actions that fire for one window, flattened in order.
pub fn actions_for(context: &RowContext) -> impl Iterator<Item = Action> + '_ {
    handlers_for(context.current.kind)
        .iter()
        .filter(|handler| handler.transition.matches(context))
        .flat_map(|handler| handler.actions.iter().copied())
}
