//! Accumulating parse state and the actions that mutate it.

use scraper::ElementRef;
use tracing::{debug, warn};
use uuid::Uuid;

use super::transitions::Action;
use super::walker::{cells, text_of, ClassifiedRow};
use super::Column;
use crate::error::{Error, Result};
use crate::fields::{parse_capacity, parse_schedule, RawSchedule};
use crate::models::{ClassEntry, ClassType, ScheduleEntry};

/// State owned by one parse call.
#[derive(Debug)]
pub struct ParserState {
    year: i32,
    department: String,
    buffer: Option<ClassEntry>,
    entries: Vec<ClassEntry>,
}

impl ParserState {
    /// Creates an empty state; dates are read in `year`.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            department: String::new(),
            buffer: None,
            entries: Vec::new(),
        }
    }

    /// Returns the active department title.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the class entry currently being built, if any.
    pub fn buffered(&self) -> Option<&ClassEntry> {
        self.buffer.as_ref()
    }

    /// Returns the finalized entries so far.
    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    /// Consumes the state and returns the finalized entries.
    pub fn into_entries(self) -> Vec<ClassEntry> {
        self.entries
    }

    /// Applies one action for the current row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is structurally incomplete or a day/date
    /// cell cannot be parsed.
    pub fn apply(
        &mut self,
        action: Action,
        row: &ClassifiedRow,
        element: Option<ElementRef<'_>>,
    ) -> Result<()> {
        debug!(?action, row = ?row.index, "applying row action");

        match action {
            Action::UpdateDepartment => {
                if let Some(element) = element {
                    self.department = text_of(element);
                }
            }
            Action::AddClassEntry => {
                if let Some(element) = element {
                    let columns = Columns::read(element, row)?;
                    let entry = columns.class_entry(&self.department, self.year)?;
                    if let Some(open) = self.buffer.replace(entry) {
                        debug!(crn = open.crn, "closing unfinished class entry");
                        self.entries.push(open);
                    }
                }
            }
            Action::AddAdditionalScheduleEntry => {
                if let Some(element) = element {
                    let columns = Columns::read(element, row)?;
                    let schedule = columns.schedule(self.year)?;
                    match self.buffer.as_mut() {
                        Some(entry) => entry.push_schedule(schedule),
                        None => warn!(row = ?row.index, "continuation row with no open class entry"),
                    }
                }
            }
            Action::FinalizeClassEntry => match self.buffer.take() {
                Some(entry) => self.entries.push(entry),
                None => warn!(row = ?row.index, "nothing to finalize"),
            },
        }

        Ok(())
    }
}

/// The trimmed text of every cell of one data row.
struct Columns(Vec<String>);

impl Columns {
    /// Reads a data row, requiring every fixed-position cell to be present.
    fn read(element: ElementRef<'_>, row: &ClassifiedRow) -> Result<Self> {
        let texts: Vec<String> = cells(element).map(text_of).collect();

        if let Some(missing) = Column::ALL
            .iter()
            .map(|column| column.index())
            .find(|index| *index >= texts.len())
        {
            return Err(Error::MissingColumn {
                index: missing,
                row: row.index.unwrap_or_default(),
            });
        }

        Ok(Self(texts))
    }

    fn get(&self, column: Column) -> &str {
        &self.0[column.index()]
    }

    fn int(&self, column: Column) -> i32 {
        let text = self.get(column);
        text.parse().unwrap_or_else(|_| {
            if !text.is_empty() {
                warn!(?column, text, "non-numeric cell read as 0");
            }
            0
        })
    }

    fn schedule(&self, year: i32) -> Result<ScheduleEntry> {
        parse_schedule(
            RawSchedule {
                days: self.get(Column::Days),
                time: self.get(Column::Times),
                instructor: self.get(Column::Instructor),
                date: self.get(Column::Date),
                location: self.get(Column::Location),
                attributes: self.get(Column::Attribute),
            },
            year,
        )
    }

    fn class_entry(&self, department: &str, year: i32) -> Result<ClassEntry> {
        let schedule = vec![self.schedule(year)?];

        Ok(ClassEntry {
            uid: Uuid::new_v4().to_string(),
            class_type: ClassType::from_schedule(&schedule),
            title: self.get(Column::Title).to_string(),
            crn: self.get(Column::Crn).parse().unwrap_or_default(),
            campus: self.get(Column::Campus).to_string(),
            credit: self.get(Column::Credit).parse().unwrap_or_default(),
            subject: self.get(Column::Subject).to_string(),
            course: self.get(Column::Course).to_string(),
            section: self.get(Column::Section).to_string(),
            department: department.to_string(),
            capacity: parse_capacity(
                self.int(Column::CapacityTotal),
                self.int(Column::CapacityActual),
                self.int(Column::CapacityRemaining),
            ),
            waitlist: parse_capacity(
                self.int(Column::WaitlistTotal),
                self.int(Column::WaitlistActual),
                self.int(Column::WaitlistRemaining),
            ),
            schedule,
        })
    }
}
