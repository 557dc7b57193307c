//! Filter query language for class entries.
//!
//! A query is lexed into tokens, parsed into an error-annotated concrete
//! syntax tree, and evaluated against each [`FilterableClassEntry`]. Mistakes
//! in the query never stop evaluation; they are reported as diagnostics.
//!
//! [`FilterableClassEntry`]: scc_classes_rs::models::FilterableClassEntry
//!
//! # Supported Syntax
//!
//! ## Properties
//! - `crn`, `type`, `title`, `campus`, `credit`, `subject`, `course`, `section`
//! - `capacity.total`, `capacity.actual`, `capacity.remaining`
//! - `waitlist.total`, `waitlist.actual`, `waitlist.remaining`
//! - `schedule.days`, `schedule.instructor`, `schedule.location`,
//!   `schedule.attributes` (true if any schedule entry matches)
//! - `selected`, `expanded`
//!
//! ## Comparisons
//! - `:` (or `*`) - fuzzy match: case-insensitive containment or close spelling
//! - `:=` - equality
//! - `:<`, `:<=`, `:>`, `:>=` - ordering between numbers or between strings
//!
//! ## Arithmetic
//! - `+`, `-`, `/`
//!
//! ## Boolean Operators
//! - `and`, `or`, `not`
//! - `()` - Grouping
//!
//! Words that are not property paths, such as `ACCT` in `subject:ACCT`, are
//! read as text. They still produce an "Unknown identifier" diagnostic;
//! quote them to avoid it.
//!
//! ## Shorthand
//! - A query that is only a quoted string matches titles: `"financial"`
//! - A query that is only a number matches the CRN: `80644`
//!
//! # Example
//!
//! ```
//! use scc_filter_rs::Query;
//!
//! let query = Query::compile("crn:=80644 and capacity.remaining:>0");
//! assert!(query.is_clean());
//!
//! let query = Query::compile("ttle:intro");
//! let diagnostics = query.diagnostics();
//! assert_eq!(
//!     diagnostics[0].message,
//!     "Unknown identifier: \"ttle\". Did you mean: title?"
//! );
//! ```

pub mod cst;
mod error;
pub mod evaluator;
pub mod lexer;
mod query;
pub mod vocabulary;

pub use cst::{CstError, CstNode, ParseResult};
pub use error::{FilterError, FilterResult};
pub use evaluator::{ArrayCursor, Evaluator, Value};
pub use lexer::{LexResult, Span, Token, TokenKind};
pub use query::Query;
pub use vocabulary::{Property, ScheduleField};

#[cfg(test)]
mod tests;

#[cfg(test)]
mod evaluator_tests;
