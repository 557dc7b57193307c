//! HTML table extraction.
//!
//! A class search result page lists sections in one `.datadisplaytable`. Each
//! department starts with a `ddtitle` row, followed by a `ddheader` column
//! header row and any number of `dddefault` data rows. A data row whose CRN
//! cell is blank is an extra meeting pattern for the section above it.
//!
//! Parsing is a single pass: [`walker::RowWalker`] classifies rows and yields a
//! three-row window, [`transitions::actions_for`] picks the actions for that
//! window, and the builder applies them.
//!
//! ```no_run
//! use scc_classes_rs::html;
//!
//! let page = std::fs::read_to_string("classes.html").unwrap();
//! let entries = html::parse(&page).unwrap();
//! println!("{} sections", entries.len());
//! ```

mod builder;
pub mod transitions;
pub mod walker;

use chrono::{Datelike, Local};
use scraper::{Html, Selector};
use tracing::debug;

pub use builder::ParserState;

use crate::error::{Error, Result};
use crate::models::ClassEntry;
use transitions::actions_for;
use walker::RowWalker;

/// Selects every row of the class listing table.
pub const ROW_SELECTOR: &str = ".datadisplaytable tr";

/// Class marker on the first cell of a department title row.
pub const CLASS_DEPARTMENT_TITLE: &str = "ddtitle";

/// Class marker on the first cell of a column header row.
pub const CLASS_ENTRY_HEADER: &str = "ddheader";

/// Class marker on the first cell of a data row.
pub const CLASS_ENTRY_ROW: &str = "dddefault";

/// Fixed cell positions of a data row. Cell 0 is the selection checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Crn = 1,
    Subject = 2,
    Course = 3,
    Section = 4,
    Campus = 5,
    Credit = 6,
    Title = 7,
    Days = 8,
    Times = 9,
    CapacityTotal = 10,
    CapacityActual = 11,
    CapacityRemaining = 12,
    WaitlistTotal = 13,
    WaitlistActual = 14,
    WaitlistRemaining = 15,
    Instructor = 16,
    Date = 17,
    Location = 18,
    Attribute = 19,
}

impl Column {
    /// Every column, in cell order.
    pub const ALL: [Column; 19] = [
        Column::Crn,
        Column::Subject,
        Column::Course,
        Column::Section,
        Column::Campus,
        Column::Credit,
        Column::Title,
        Column::Days,
        Column::Times,
        Column::CapacityTotal,
        Column::CapacityActual,
        Column::CapacityRemaining,
        Column::WaitlistTotal,
        Column::WaitlistActual,
        Column::WaitlistRemaining,
        Column::Instructor,
        Column::Date,
        Column::Location,
        Column::Attribute,
    ];

    /// Returns the zero-based cell index.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Minimum number of cells in a data row.
pub const CELL_COUNT: usize = Column::Attribute as usize + 1;

/// Options for a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year that `MM/DD` date cells are read in.
    pub year: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            year: Local::now().year(),
        }
    }
}

/// Parses a class listing page using the current year for dates.
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse(html: &str) -> Result<Vec<ClassEntry>> {
    parse_with(html, &ParseOptions::default())
}

/// Parses a class listing page into class entries, in document order.
///
/// A page with no listing table yields an empty list.
///
/// # Errors
///
/// Fails on the first data row that is missing a column or holds an invalid
/// day or date. No partial result is returned.
pub fn parse_with(html: &str, options: &ParseOptions) -> Result<Vec<ClassEntry>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(ROW_SELECTOR).map_err(|_| Error::InvalidSelector {
        selector: ROW_SELECTOR.to_string(),
    })?;

    let mut walker = RowWalker::new(&document, &selector);
    debug!(rows = walker.len(), year = options.year, "parsing class table");

    let mut state = ParserState::new(options.year);
    while let Some(context) = walker.advance() {
        let element = walker.element(context.current.reference);
        for action in actions_for(&context) {
            state.apply(action, &context.current, element)?;
        }
    }

    let entries = state.into_entries();
    debug!(entries = entries.len(), "parsed class table");
    Ok(entries)
}
