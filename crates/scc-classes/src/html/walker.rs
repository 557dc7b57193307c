//! Row walker for the class listing table.
//!
//! The walker visits every matching `<tr>` once, in document order, and then
//! makes one final visit whose current row is [`InferredType::Nothing`]. Each
//! visit yields a [`RowContext`] snapshot holding the previous, current and
//! next row. The next row is classified only when it enters the window.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use super::{CLASS_DEPARTMENT_TITLE, CLASS_ENTRY_HEADER, CLASS_ENTRY_ROW};

/// The semantic type inferred for a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferredType {
    /// No row at all: before the first row, after the last row, or a row with
    /// no recognizable class marker.
    Nothing,
    /// A department heading (`ddtitle`).
    DepartmentTitle,
    /// A column header row (`ddheader`).
    ClassEntryHeader,
    /// A data row that starts a new class entry (`dddefault`).
    ClassEntryRow,
    /// A data row whose second cell is blank; it continues the previous entry.
    ClassEntryRowAdditionalScheduleEntry,
}

/// Opaque handle used to look up a row's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowReference(usize);

/// A row as seen through the walker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedRow {
    /// Handle for [`RowWalker::element`].
    pub reference: RowReference,
    /// Position among the matching rows; `None` for the synthetic leading row.
    pub index: Option<usize>,
    /// Inferred row type.
    pub kind: InferredType,
}

/// An immutable snapshot of the walker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContext {
    pub up: ClassifiedRow,
    pub current: ClassifiedRow,
    pub down: ClassifiedRow,
}

/// Cursor over the rows of one parsed document.
///
/// A walker is a single, non-restartable traversal. Create a new one to walk
/// the same document again.
pub struct RowWalker<'a> {
    rows: Vec<ElementRef<'a>>,
    elements: HashMap<RowReference, ElementRef<'a>>,
    next_reference: usize,
    next_index: usize,
    visits: usize,
    current: ClassifiedRow,
    down: ClassifiedRow,
}

impl<'a> RowWalker<'a> {
    /// Creates a walker over every element of `document` matching `selector`.
    pub fn new(document: &'a Html, selector: &Selector) -> Self {
        let rows: Vec<ElementRef<'a>> = document.select(selector).collect();

        let leading = ClassifiedRow {
            reference: RowReference(0),
            index: None,
            kind: InferredType::Nothing,
        };

        let mut walker = Self {
            rows,
            elements: HashMap::new(),
            next_reference: 1,
            next_index: 0,
            visits: 0,
            current: leading,
            down: leading,
        };
        walker.down = walker.pull();
        walker
    }

    /// Returns the number of matching rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the element of a row seen by this walker.
    pub fn element(&self, reference: RowReference) -> Option<ElementRef<'a>> {
        self.elements.get(&reference).copied()
    }

    /// Shifts the window down by one row and returns the new snapshot.
    ///
    /// Returns `None` once every row and the trailing boundary have been visited.
    pub fn advance(&mut self) -> Option<RowContext> {
        if self.visits > self.rows.len() {
            return None;
        }
        self.visits += 1;

        let up = self.current;
        self.current = self.down;
        self.down = self.pull();

        trace!(
            up = ?up.kind,
            current = ?self.current.kind,
            down = ?self.down.kind,
            "advanced row window"
        );

        Some(RowContext {
            up,
            current: self.current,
            down: self.down,
        })
    }

    /// Classifies the next unread row, or returns a `Nothing` row past the end.
    fn pull(&mut self) -> ClassifiedRow {
        let index = self.next_index;
        self.next_index += 1;

        let Some(element) = self.rows.get(index).copied() else {
            return self.nothing(Some(index));
        };

        match infer_type(element) {
            Some(kind) => {
                let reference = self.reference();
                self.elements.insert(reference, element);
                ClassifiedRow {
                    reference,
                    index: Some(index),
                    kind,
                }
            }
            None => self.nothing(Some(index)),
        }
    }

    fn nothing(&mut self, index: Option<usize>) -> ClassifiedRow {
        ClassifiedRow {
            reference: self.reference(),
            index,
            kind: InferredType::Nothing,
        }
    }

    fn reference(&mut self) -> RowReference {
        let reference = RowReference(self.next_reference);
        self.next_reference += 1;
        reference
    }
}

impl Iterator for RowWalker<'_> {
    type Item = RowContext;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

/// Returns the element children of a row (cells), skipping text nodes.
pub fn cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    row.children().filter_map(ElementRef::wrap)
}

/// Returns the visible text of an element, trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Infers a row's type from the class attribute of its first cell.
fn infer_type(row: ElementRef<'_>) -> Option<InferredType> {
    let mut children = cells(row);
    let first = children.next()?;

    let classes: Vec<&str> = first.value().classes().collect();
    let marker = [CLASS_DEPARTMENT_TITLE, CLASS_ENTRY_HEADER, CLASS_ENTRY_ROW]
        .into_iter()
        .find(|marker| classes.contains(marker))?;

    let kind = match marker {
        CLASS_DEPARTMENT_TITLE => InferredType::DepartmentTitle,
        CLASS_ENTRY_HEADER => InferredType::ClassEntryHeader,
        _ => {
            // The first cell is blank for sections the viewer is already
            // enrolled in, so the CRN cell decides continuation rows.
            let second_blank = children.next().map_or(true, |cell| text_of(cell).is_empty());
            if second_blank {
                InferredType::ClassEntryRowAdditionalScheduleEntry
            } else {
                InferredType::ClassEntryRow
            }
        }
    };

    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> Selector {
        Selector::parse(".datadisplaytable tr").unwrap()
    }

    fn kinds(html: &str) -> Vec<(InferredType, InferredType, InferredType)> {
        let document = Html::parse_document(html);
        let selector = selector();
        RowWalker::new(&document, &selector)
            .map(|ctx| (ctx.up.kind, ctx.current.kind, ctx.down.kind))
            .collect()
    }

    #[test]
    fn test_empty_document_has_single_boundary_visit() {
        let visits = kinds("<html></html>");
        assert_eq!(
            visits,
            vec![(
                InferredType::Nothing,
                InferredType::Nothing,
                InferredType::Nothing
            )]
        );
    }

    #[test]
    fn test_window_over_rows() {
        use InferredType::*;

        let html = r#"<table class="datadisplaytable">
            <tr><th class="ddtitle">Accounting</th></tr>
            <tr><th class="ddheader">Select</th><th class="ddheader">CRN</th></tr>
            <tr><td class="dddefault"></td><td class="dddefault">80644</td></tr>
            <tr><td class="dddefault"></td><td class="dddefault"> </td></tr>
        </table>"#;

        assert_eq!(
            kinds(html),
            vec![
                (Nothing, DepartmentTitle, ClassEntryHeader),
                (DepartmentTitle, ClassEntryHeader, ClassEntryRow),
                (ClassEntryHeader, ClassEntryRow, ClassEntryRowAdditionalScheduleEntry),
                (ClassEntryRow, ClassEntryRowAdditionalScheduleEntry, Nothing),
                (ClassEntryRowAdditionalScheduleEntry, Nothing, Nothing),
            ]
        );
    }

    #[test]
    fn test_unmarked_row_is_nothing_but_window_advances() {
        use InferredType::*;

        let html = r#"<table class="datadisplaytable">
            <tr><th class="ddheader">Select</th></tr>
            <tr><td>stray</td></tr>
            <tr><td class="dddefault">x</td><td class="dddefault">1</td></tr>
        </table>"#;

        assert_eq!(
            kinds(html),
            vec![
                (Nothing, ClassEntryHeader, Nothing),
                (ClassEntryHeader, Nothing, ClassEntryRow),
                (Nothing, ClassEntryRow, Nothing),
                (ClassEntryRow, Nothing, Nothing),
            ]
        );
    }

    #[test]
    fn test_multiple_classes_on_cell() {
        let html = r#"<table class="datadisplaytable">
            <tr><td class="wide dddefault">x</td><td class="dddefault">1</td></tr>
        </table>"#;
        let visits = kinds(html);
        assert_eq!(visits[0].1, InferredType::ClassEntryRow);
    }

    #[test]
    fn test_rows_outside_table_are_ignored() {
        let html = r#"<table><tr><td class="dddefault">x</td><td>1</td></tr></table>"#;
        assert_eq!(kinds(html).len(), 1);
    }

    #[test]
    fn test_element_lookup() {
        let html = r#"<table class="datadisplaytable">
            <tr><th class="ddtitle">Biology</th></tr>
        </table>"#;
        let document = Html::parse_document(html);
        let selector = selector();
        let mut walker = RowWalker::new(&document, &selector);
        assert_eq!(walker.len(), 1);

        let ctx = walker.advance().unwrap();
        let element = walker.element(ctx.current.reference).unwrap();
        assert_eq!(text_of(element), "Biology");
        assert!(walker.element(ctx.up.reference).is_none());
    }

    #[test]
    fn test_walker_is_exhausted_after_boundary() {
        let document = Html::parse_document("<p>no table</p>");
        let selector = selector();
        let mut walker = RowWalker::new(&document, &selector);
        assert!(walker.is_empty());
        assert!(walker.advance().is_some());
        assert!(walker.advance().is_none());
        assert!(walker.advance().is_none());
    }
}
