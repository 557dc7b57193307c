//! Error types for the filter engine.
//!
//! Problems in the query text are never errors here: the lexer and parser
//! report them as [`CstError`](crate::cst::CstError) diagnostics and still
//! produce a tree. A [`FilterError`] means the evaluator met a tree it cannot
//! interpret at all.

use thiserror::Error;

/// A specialized Result type for filter evaluation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur during filter evaluation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A node kind with no evaluation rule reached the evaluator.
    #[error("unsupported node kind: {kind}")]
    UnsupportedNode {
        /// Display name of the node kind.
        kind: String,
    },
}

impl FilterError {
    /// Creates an unsupported node error.
    pub fn unsupported_node(kind: impl Into<String>) -> Self {
        FilterError::UnsupportedNode { kind: kind.into() }
    }
}
