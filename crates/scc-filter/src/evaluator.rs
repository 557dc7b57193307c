//! Tree-walking evaluation of a syntax tree against class entries.
//!
//! Evaluation is total over well-formed kinds: missing operands make
//! arithmetic yield `0` and connectives or comparisons yield `false`.
//! Comparisons never fail; an operand that cannot be evaluated makes the
//! comparison `false`. Nodes the parser flagged as unexpected, such as a
//! stray line break, evaluate to [`Value::Undefined`]. Only an unflagged node
//! with no evaluation rule is reported as an error.
//!
//! # Example
//!
//! ```
//! use scc_filter_rs::{cst, lexer, Evaluator};
//!
//! let tokens = lexer::tokenize("credit:>=3 and not selected").tokens;
//! let tree = cst::parse(&tokens);
//! let root = tree.root.unwrap();
//! let evaluator = Evaluator::new(&root);
//!
//! let entries = vec![];
//! assert!(evaluator.filter_entries(&entries).unwrap().is_empty());
//! ```

use std::borrow::Cow;
use std::fmt;

use rayon::prelude::*;
use scc_classes_rs::models::{FilterableClassEntry, ScheduleEntry};
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::cst::CstNode;
use crate::error::{FilterError, FilterResult};
use crate::lexer::TokenKind;
use crate::vocabulary::{Property, ScheduleField};

/// Minimum normalized similarity for two strings to fuzzy-match.
pub const FUZZY_THRESHOLD: f64 = 0.8;

/// The result of evaluating a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// No value: an empty group or a closing bracket.
    Undefined,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    /// A property path that crossed into the schedule array.
    Array(ArrayCursor<'a>),
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::String(Cow::Borrowed(value))
    }
}

impl Value<'_> {
    /// Coerces to a boolean the way a condition reads it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) => true,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Loose equality: numbers and numeric strings compare by value and
    /// booleans count as `0`/`1`.
    pub fn loose_eq(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
                string_to_number(s) == Some(*n)
            }
            (Value::Bool(b), other) => Value::Number(f64::from(u8::from(*b))).loose_eq(other),
            (this, Value::Bool(b)) => this.loose_eq(&Value::Number(f64::from(u8::from(*b)))),
            _ => false,
        }
    }

    /// Fuzzy equality: strings match by case-insensitive containment either
    /// way or by edit-distance similarity; other values use [`Value::loose_eq`].
    pub fn fuzzy_eq(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => fuzzy_str_eq(a, b),
            _ => self.loose_eq(other),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(cursor) => {
                write!(f, "schedule[{}].{:?}", cursor.entries.len(), cursor.field)
            }
        }
    }
}

/// Reads a string as a number: blank is `0`, anything unparseable is `None`.
fn string_to_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse().ok()
}

fn fuzzy_str_eq(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    (max_len - distance) as f64 / max_len as f64 >= FUZZY_THRESHOLD
}

/// A resolved path that stopped at the schedule array.
///
/// Comparisons against a cursor are existential: they hold if any element
/// (and, for `days`, any day of any element) satisfies them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayCursor<'a> {
    pub entries: &'a [ScheduleEntry],
    pub field: ScheduleField,
}

impl<'a> ArrayCursor<'a> {
    /// Creates a cursor over `entries` for the remaining path `field`.
    pub fn new(entries: &'a [ScheduleEntry], field: ScheduleField) -> Self {
        Self { entries, field }
    }

    /// Returns true if any element satisfies `predicate`.
    pub fn any(&self, mut predicate: impl FnMut(&Value<'_>) -> bool) -> bool {
        self.entries
            .iter()
            .any(|entry| self.field.any(entry, |value| predicate(&value)))
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    LessThanOrEqual,
    GreaterThanOrEqual,
    GreaterThan,
    LessThan,
    Equals,
    Fuzzy,
}

impl Comparison {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::LessThanOrEqual => Some(Comparison::LessThanOrEqual),
            TokenKind::GreaterThanOrEqual => Some(Comparison::GreaterThanOrEqual),
            TokenKind::GreaterThan => Some(Comparison::GreaterThan),
            TokenKind::LessThan => Some(Comparison::LessThan),
            TokenKind::Equals => Some(Comparison::Equals),
            TokenKind::FuzzyEquals | TokenKind::Asterisk => Some(Comparison::Fuzzy),
            _ => None,
        }
    }

    fn holds(self, left: &Value<'_>, right: &Value<'_>) -> bool {
        match self {
            Comparison::Equals => left.loose_eq(right),
            Comparison::Fuzzy => left.fuzzy_eq(right),
            ordering => {
                let order = match (left, right) {
                    (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                    (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                    _ => None,
                };
                let Some(order) = order else {
                    return false;
                };
                match ordering {
                    Comparison::LessThanOrEqual => order.is_le(),
                    Comparison::GreaterThanOrEqual => order.is_ge(),
                    Comparison::GreaterThan => order.is_gt(),
                    _ => order.is_lt(),
                }
            }
        }
    }
}

/// Evaluates a syntax tree against filterable class entries.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    root: &'a CstNode,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for the tree rooted at `root`.
    pub fn new(root: &'a CstNode) -> Self {
        Self { root }
    }

    /// Returns the root this evaluator walks.
    pub fn root(&self) -> &'a CstNode {
        self.root
    }

    /// Returns true if the entry matches the query.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnsupportedNode` if a node outside a comparison
    /// has no evaluation rule and was not flagged by the parser. Trees built
    /// by [`cst::parse`](crate::cst::parse) always evaluate.
    pub fn matches(&self, entry: &FilterableClassEntry) -> FilterResult<bool> {
        Ok(self.evaluate(entry)?.is_truthy())
    }

    /// Filters a slice of entries, keeping input order.
    ///
    /// Entries are evaluated in parallel.
    pub fn filter_entries<'e>(
        &self,
        entries: &'e [FilterableClassEntry],
    ) -> FilterResult<Vec<&'e FilterableClassEntry>> {
        let kept: Vec<Option<&'e FilterableClassEntry>> = entries
            .par_iter()
            .map(|entry| self.matches(entry).map(|keep| keep.then_some(entry)))
            .collect::<FilterResult<_>>()?;

        let kept: Vec<_> = kept.into_iter().flatten().collect();
        debug!(total = entries.len(), kept = kept.len(), "filtered entries");
        Ok(kept)
    }

    /// Evaluates the whole tree against one entry.
    pub fn evaluate<'v>(&'v self, entry: &'v FilterableClassEntry) -> FilterResult<Value<'v>> {
        let root = self.root;
        match root.kind {
            // A lone literal is shorthand for a title or CRN match.
            TokenKind::String => {
                return Ok(Value::Bool(fuzzy_str_eq(&entry.entry.title, &root.value)));
            }
            TokenKind::Number => {
                let matched = root
                    .value
                    .parse::<f64>()
                    .is_ok_and(|crn| f64::from(entry.entry.crn) == crn);
                return Ok(Value::Bool(matched));
            }
            _ => {}
        }
        self.evaluate_node(root, entry)
    }

    fn evaluate_node<'v>(
        &self,
        node: &'v CstNode,
        entry: &'v FilterableClassEntry,
    ) -> FilterResult<Value<'v>> {
        let binary = match (node.left(), node.right()) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        };

        if let Some(comparison) = Comparison::from_kind(node.kind) {
            let Some((left, right)) = binary else {
                return Ok(Value::Bool(false));
            };
            return Ok(Value::Bool(self.compare(comparison, left, right, entry)));
        }

        match node.kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Slash => {
                let Some((left, right)) = binary else {
                    return Ok(Value::Number(0.0));
                };
                let left = self.evaluate_node(left, entry)?;
                let right = self.evaluate_node(right, entry)?;
                let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                    return Ok(Value::Undefined);
                };
                Ok(Value::Number(match node.kind {
                    TokenKind::Plus => a + b,
                    TokenKind::Minus => a - b,
                    _ => a / b,
                }))
            }
            TokenKind::Not => match node.left() {
                Some(operand) => Ok(Value::Bool(!self.evaluate_node(operand, entry)?.is_truthy())),
                None => Ok(Value::Bool(false)),
            },
            TokenKind::And | TokenKind::Or => {
                let Some((left, right)) = binary else {
                    return Ok(Value::Bool(false));
                };
                let left = self.evaluate_node(left, entry)?.is_truthy();
                let result = if node.kind == TokenKind::And {
                    left && self.evaluate_node(right, entry)?.is_truthy()
                } else {
                    left || self.evaluate_node(right, entry)?.is_truthy()
                };
                Ok(Value::Bool(result))
            }
            TokenKind::Open => match node.left() {
                Some(inner) => self.evaluate_node(inner, entry),
                None => Ok(Value::Undefined),
            },
            TokenKind::Close => Ok(Value::Undefined),
            TokenKind::Identifier => Ok(match Property::from_path(&node.value) {
                Some(property) => property.resolve(entry),
                // Bare words such as `ACCT` in `subject:ACCT` are text.
                None => Value::from(node.value.as_str()),
            }),
            TokenKind::Number => Ok(node
                .value
                .parse()
                .map_or(Value::Undefined, Value::Number)),
            TokenKind::String => Ok(Value::from(node.value.as_str())),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            // Stray line breaks the parser already flagged.
            _ if node.error.is_some() => Ok(Value::Undefined),
            kind => Err(FilterError::unsupported_node(kind.as_str())),
        }
    }

    /// Evaluates both sides and applies `comparison`, failing closed.
    fn compare(
        &self,
        comparison: Comparison,
        left: &CstNode,
        right: &CstNode,
        entry: &FilterableClassEntry,
    ) -> bool {
        let operands = self
            .evaluate_node(left, entry)
            .and_then(|l| Ok((l, self.evaluate_node(right, entry)?)));

        let (left, right) = match operands {
            Ok(operands) => operands,
            Err(error) => {
                warn!(%error, ?comparison, "comparison operand failed; treating as false");
                return false;
            }
        };

        match &left {
            Value::Array(cursor) => cursor.any(|value| comparison.holds(value, &right)),
            _ => comparison.holds(&left, &right),
        }
    }
}
