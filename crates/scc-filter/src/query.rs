//! A compiled query: tokens, tree and diagnostics for one query string.

use scc_classes_rs::models::FilterableClassEntry;
use tracing::debug;

use crate::cst::{self, CstError, CstNode, ParseResult};
use crate::error::FilterResult;
use crate::evaluator::Evaluator;
use crate::lexer::{self, LexResult, Token};

/// A lexed and parsed query, ready to evaluate.
///
/// Compiling never fails. Check [`Query::diagnostics`] to see whether the
/// query text had problems; evaluation still runs on the best-effort tree.
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    lexed: LexResult,
    parsed: ParseResult,
}

impl Query {
    /// Lexes and parses `source`.
    pub fn compile(source: &str) -> Self {
        let lexed = lexer::tokenize(source);
        let parsed = cst::parse(&lexed.tokens);
        debug!(
            query = source,
            tokens = lexed.tokens.len(),
            errors = parsed.errors.len(),
            "compiled query"
        );

        Self {
            source: source.to_string(),
            lexed,
            parsed,
        }
    }

    /// Returns the query text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the lexed tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.lexed.tokens
    }

    /// Returns the tree root, or `None` for a blank query.
    pub fn root(&self) -> Option<&CstNode> {
        self.parsed.root.as_ref()
    }

    /// Returns true if the query has no tokens.
    pub fn is_empty(&self) -> bool {
        self.lexed.tokens.is_empty()
    }

    /// Returns lexical and syntax diagnostics ordered by position.
    pub fn diagnostics(&self) -> Vec<CstError> {
        let mut diagnostics: Vec<CstError> = self
            .lexed
            .errors()
            .filter_map(|token| {
                token
                    .error
                    .as_ref()
                    .map(|message| CstError::new(message.clone(), token.span))
            })
            .chain(self.parsed.errors.iter().cloned())
            .collect();
        diagnostics.sort_by_key(|error| error.span.start);
        diagnostics
    }

    /// Returns true if there are no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.lexed.errors().next().is_none() && self.parsed.errors.is_empty()
    }

    /// Returns an evaluator, or `None` for a blank query.
    pub fn evaluator(&self) -> Option<Evaluator<'_>> {
        self.root().map(Evaluator::new)
    }

    /// Returns true if the entry matches. A blank query matches everything.
    pub fn matches(&self, entry: &FilterableClassEntry) -> FilterResult<bool> {
        match self.evaluator() {
            Some(evaluator) => evaluator.matches(entry),
            None => Ok(true),
        }
    }

    /// Filters entries, keeping input order. A blank query keeps everything.
    pub fn filter<'e>(
        &self,
        entries: &'e [FilterableClassEntry],
    ) -> FilterResult<Vec<&'e FilterableClassEntry>> {
        match self.evaluator() {
            Some(evaluator) => evaluator.filter_entries(entries),
            None => Ok(entries.iter().collect()),
        }
    }
}
