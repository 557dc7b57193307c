//! Precedence-climbing parser producing an error-annotated concrete syntax tree.
//!
//! Parsing never fails. Malformed input yields a best-effort tree together
//! with a list of [`CstError`] diagnostics.
//!
//! # Grammar
//!
//! ```text
//! expression ::= unary (infix expression)*
//! unary      ::= "not" expression | primary
//! primary    ::= "(" expression ")" | number | string | "true" | "false"
//!              | identifier
//! ```
//!
//! # Operator Precedence (lowest to highest)
//!
//! 0. `and`, `or`
//! 1. `not` (prefix only)
//! 2. `:<=` `:>=` `:>` `:<` `*` `:=` `:`
//! 3. `+` `-` `/`
//!
//! `*` sits with the comparisons because the first tier that lists it wins;
//! it evaluates as fuzzy equality.

use serde::Serialize;

use crate::lexer::{Span, Token, TokenKind};
use crate::vocabulary::{self, Property};

const NOT_PRECEDENCE: u8 = 1;

/// A diagnostic attached to part of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CstError {
    pub message: String,
    pub span: Span,
}

impl CstError {
    /// Creates a diagnostic.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CstNode {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CstNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CstError>,
}

impl CstNode {
    /// Creates a childless node from a token, carrying over its lexical error.
    fn from_token(token: &Token) -> Self {
        Self {
            kind: token.kind,
            value: token.value.clone(),
            span: token.span,
            depth: token.depth,
            children: Vec::new(),
            error: token
                .error
                .as_ref()
                .map(|message| CstError::new(message.clone(), token.span)),
        }
    }

    /// Returns the left operand (or the only child).
    pub fn left(&self) -> Option<&CstNode> {
        self.children.first()
    }

    /// Returns the right operand.
    pub fn right(&self) -> Option<&CstNode> {
        self.children.get(1)
    }

    /// Returns the node and its descendants in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &CstNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// The output of [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// The tree, or `None` when there were no tokens.
    pub root: Option<CstNode>,
    /// Syntax and vocabulary diagnostics, in discovery order.
    pub errors: Vec<CstError>,
}

/// Parses a token list into a syntax tree.
pub fn parse(tokens: &[Token]) -> ParseResult {
    CstParser::new(tokens).run()
}

/// Returns the binding power of an infix operator.
fn infix_precedence(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::And | TokenKind::Or => Some(0),
        TokenKind::LessThanOrEqual
        | TokenKind::GreaterThanOrEqual
        | TokenKind::GreaterThan
        | TokenKind::LessThan
        | TokenKind::Asterisk
        | TokenKind::Equals
        | TokenKind::FuzzyEquals => Some(2),
        TokenKind::Plus | TokenKind::Minus | TokenKind::Slash => Some(3),
        _ => None,
    }
}

struct CstParser<'a> {
    tokens: &'a [Token],
    position: usize,
    errors: Vec<CstError>,
}

impl<'a> CstParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> ParseResult {
        let root = self.parse_expression(0);

        if let Some(token) = self.peek() {
            let span = token.span;
            self.error("Unexpected tokens after parsing", span);
        }

        ParseResult {
            root,
            errors: self.errors,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn error(&mut self, message: impl Into<String>, span: Span) -> CstError {
        let error = CstError::new(message, span);
        self.errors.push(error.clone());
        error
    }

    fn parse_expression(&mut self, min_precedence: u8) -> Option<CstNode> {
        let first = self.peek()?;

        let mut left = if first.kind == TokenKind::Not {
            self.advance();
            let mut not = CstNode::from_token(first);
            match self.parse_expression(NOT_PRECEDENCE) {
                Some(operand) => not.children.push(operand),
                None => {
                    self.error("Expected expression after NOT operator", first.span);
                    return Some(not);
                }
            }
            not
        } else {
            self.parse_primary()?
        };

        while let Some(operator) = self.peek() {
            let Some(precedence) = infix_precedence(operator.kind) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let Some(right) = self.parse_expression(precedence + 1) else {
                self.error("Expected expression after operator", operator.span);
                break;
            };

            let mut node = CstNode::from_token(operator);
            node.children = vec![left, right];
            left = node;
        }

        Some(left)
    }

    fn parse_primary(&mut self) -> Option<CstNode> {
        let Some(token) = self.advance() else {
            let span = self.tokens.last().map(|t| t.span).unwrap_or_default();
            self.error("Unexpected end of input", span);
            return None;
        };

        match token.kind {
            TokenKind::Open => {
                let mut open = CstNode::from_token(token);
                if let Some(inner) = self.parse_expression(0) {
                    open.children.push(inner);
                }

                match self.peek() {
                    Some(close) if close.kind == TokenKind::Close => {
                        self.advance();
                        open.children.push(CstNode::from_token(close));
                    }
                    _ => {
                        self.error("Missing closing parenthesis", token.span);
                    }
                }
                Some(open)
            }
            TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False => {
                Some(CstNode::from_token(token))
            }
            TokenKind::Identifier => {
                let mut node = CstNode::from_token(token);
                if Property::from_path(&token.value).is_none() {
                    let message = match vocabulary::suggest(&token.value) {
                        Some(suggestion) => format!(
                            "Unknown identifier: \"{}\". Did you mean: {}?",
                            token.value, suggestion
                        ),
                        None => format!("Unknown identifier: \"{}\"", token.value),
                    };
                    let error = self.error(message, token.span);
                    node.error.get_or_insert(error);
                }
                Some(node)
            }
            kind => {
                let mut node = CstNode::from_token(token);
                let error = self.error(format!("Unexpected token: {kind}"), token.span);
                node.error.get_or_insert(error);
                Some(node)
            }
        }
    }
}
