//! Lexer (tokenizer) for filter queries.
//!
//! The lexer never fails. Problems such as an unterminated string or an
//! unmatched bracket are attached to the token where they were found, and
//! scanning carries on.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use serde::Serialize;
use tracing::trace;

/// A byte range in the query text, end exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // ==================== Operands ====================
    /// A property path or bare word.
    Identifier,
    /// A run of ASCII digits.
    Number,
    /// A quoted string literal.
    String,
    /// The `true` keyword.
    True,
    /// The `false` keyword.
    False,

    // ==================== Connectives ====================
    /// The `and` keyword.
    And,
    /// The `or` keyword.
    Or,
    /// The `not` keyword.
    Not,

    // ==================== Arithmetic ====================
    Plus,
    Minus,
    /// `*`, which also ranks with the comparisons.
    Asterisk,
    Slash,

    // ==================== Comparisons ====================
    /// `:<=`
    LessThanOrEqual,
    /// `:>=`
    GreaterThanOrEqual,
    /// `:>`
    GreaterThan,
    /// `:<`
    LessThan,
    /// `:=`
    Equals,
    /// `:`
    FuzzyEquals,

    // ==================== Structure ====================
    /// Opening parenthesis.
    Open,
    /// Closing parenthesis, real or synthesized for a missing one.
    Close,
    /// A line break.
    Break,
}

impl TokenKind {
    /// Returns a short human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::LessThanOrEqual => ":<=",
            TokenKind::GreaterThanOrEqual => ":>=",
            TokenKind::GreaterThan => ":>",
            TokenKind::LessThan => ":<",
            TokenKind::Equals => ":=",
            TokenKind::FuzzyEquals => ":",
            TokenKind::Open => "(",
            TokenKind::Close => ")",
            TokenKind::Break => "line break",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator symbols, longest first so `:<=` wins over `:<` and `:`.
const SYMBOLS: [(&str, TokenKind); 10] = [
    (":<=", TokenKind::LessThanOrEqual),
    (":>=", TokenKind::GreaterThanOrEqual),
    (":>", TokenKind::GreaterThan),
    (":<", TokenKind::LessThan),
    (":=", TokenKind::Equals),
    (":", TokenKind::FuzzyEquals),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Asterisk),
    ("/", TokenKind::Slash),
];

/// Message on a synthesized closing token.
pub const MISSING_CLOSING_BRACKET: &str = "Missing closing bracket";

/// Message on a closing bracket with no open group.
pub const UNEXPECTED_CLOSING_BRACKET: &str = "Unexpected closing bracket, expected (";

/// Message on a string literal that reached a line break or the end of input.
pub const STRING_NOT_CLOSED: &str = "string not closed off";

/// A token with its source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, or the unescaped contents for strings.
    pub value: String,
    pub span: Span,
    /// Nesting depth for brackets; `None` for other tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    /// Inline lexical error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Token {
    /// Creates a token without depth or error.
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            depth: None,
            error: None,
        }
    }

    fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Result of tokenizing a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    /// True if some opening bracket was never closed.
    pub missing_close: bool,
}

impl LexResult {
    /// Returns the tokens that carry a lexical error.
    pub fn errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.error.is_some())
    }
}

/// Tokenizes a query.
pub fn tokenize(input: &str) -> LexResult {
    Lexer::new(input).tokenize()
}

/// Lexer for filter queries.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
    buffer: String,
    buffer_start: usize,
    missing_close: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            tokens: Vec::new(),
            buffer: String::new(),
            buffer_start: 0,
            missing_close: false,
        }
    }

    /// Consumes the lexer and returns every token.
    pub fn tokenize(mut self) -> LexResult {
        self.lex_group(None, 0);
        LexResult {
            tokens: self.tokens,
            missing_close: self.missing_close,
        }
    }

    /// Scans until `closer` (or the end of input at top level).
    ///
    /// Returns true if the input ended before `closer` was seen.
    fn lex_group(&mut self, closer: Option<char>, depth: usize) -> bool {
        while let Some(&(offset, c)) = self.chars.peek() {
            if Some(c) == closer {
                self.flush();
                self.chars.next();
                self.push(
                    Token::new(TokenKind::Close, ")", Span::new(offset, offset + 1)).with_depth(depth),
                );
                return false;
            }

            match c {
                '(' => {
                    self.flush();
                    self.chars.next();
                    let inner = depth + 1;
                    self.push(
                        Token::new(TokenKind::Open, "(", Span::new(offset, offset + 1))
                            .with_depth(inner),
                    );

                    if self.lex_group(Some(')'), inner) {
                        let end = self.input.len();
                        self.missing_close = true;
                        self.push(
                            Token::new(TokenKind::Close, "", Span::new(end, end))
                                .with_depth(inner)
                                .with_error(MISSING_CLOSING_BRACKET),
                        );
                    }
                }
                '\'' | '"' => {
                    self.flush();
                    self.chars.next();
                    self.lex_string(offset, c);
                }
                '\n' => {
                    self.flush();
                    self.chars.next();
                    self.push(Token::new(TokenKind::Break, "\n", Span::new(offset, offset + 1)));
                }
                ')' => {
                    self.flush();
                    self.chars.next();
                    self.push(
                        Token::new(TokenKind::Close, ")", Span::new(offset, offset + 1))
                            .with_depth(depth)
                            .with_error(UNEXPECTED_CLOSING_BRACKET),
                    );
                }
                c if c.is_whitespace() => {
                    self.flush();
                    self.chars.next();
                }
                _ => {
                    let input = self.input;
                    let rest = &input[offset..];
                    if let Some(&(symbol, kind)) =
                        SYMBOLS.iter().find(|(symbol, _)| rest.starts_with(symbol))
                    {
                        self.flush();
                        for _ in 0..symbol.len() {
                            self.chars.next();
                        }
                        self.push(Token::new(kind, symbol, Span::new(offset, offset + symbol.len())));
                    } else {
                        if self.buffer.is_empty() {
                            self.buffer_start = offset;
                        }
                        self.buffer.push(c);
                        self.chars.next();
                    }
                }
            }
        }

        self.flush();
        closer.is_some()
    }

    /// Scans a string literal whose opening quote is at `start`.
    fn lex_string(&mut self, start: usize, quote: char) {
        let mut value = String::new();
        let mut escaped = false;
        let mut closed = false;
        let mut line_break = None;
        let mut end = self.input.len();

        while let Some((offset, c)) = self.chars.next() {
            if escaped {
                escaped = false;
                // An escaped line break continues the literal.
                if c != '\n' {
                    value.push(c);
                }
                continue;
            }

            match c {
                '\\' => escaped = true,
                '\n' => {
                    line_break = Some(offset);
                    end = offset;
                    break;
                }
                c if c == quote => {
                    closed = true;
                    end = offset + c.len_utf8();
                    break;
                }
                c => value.push(c),
            }
        }

        let mut token = Token::new(TokenKind::String, value, Span::new(start, end));
        if !closed {
            token = token.with_error(STRING_NOT_CLOSED);
        }
        self.push(token);

        if let Some(offset) = line_break {
            self.push(Token::new(TokenKind::Break, "\n", Span::new(offset, offset + 1)));
        }
    }

    /// Emits the pending word as a keyword, number or identifier.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let word = std::mem::take(&mut self.buffer);
        let kind = match word.to_lowercase().as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ if word.bytes().all(|b| b.is_ascii_digit()) => TokenKind::Number,
            _ => TokenKind::Identifier,
        };

        let span = Span::new(self.buffer_start, self.buffer_start + word.len());
        self.push(Token::new(kind, word, span));
    }

    fn push(&mut self, token: Token) {
        trace!(kind = %token.kind, start = token.span.start, end = token.span.end, "token");
        self.tokens.push(token);
    }
}
