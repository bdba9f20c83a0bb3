// Token — All lexical tokens of the graph description format
//
// The format is a small subset of Graphviz `dot`:
//
//   digraph deps {
//       intro [label="Introduction"];
//       intro -> loops;
//   }
//
// Tokens fall into these categories:
//
//   1. Keywords     — digraph, label
//   2. Punctuation  — = { } [ ] ; ->
//   3. Quoted text  — "..." (quotes kept as part of the text)
//   4. Identifiers  — [a-zA-Z0-9_]+
//
// Each token carries its matched text and a Span for error reporting.

use std::fmt;

/// Byte-level location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in bytes).
    pub col: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize, line: usize, col: usize) -> Self {
        Self {
            offset,
            len,
            line,
            col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A token with its kind, matched text and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// Every token kind of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Equals,      // =
    Digraph,     // digraph
    Identifier,  // [a-zA-Z0-9_]+
    Quote,       // "..."
    OpenCurly,   // {
    CloseCurly,  // }
    OpenSquare,  // [
    CloseSquare, // ]
    Label,       // label
    Semicolon,   // ;
    Arrow,       // ->
}

impl TokenKind {
    /// How the kind reads in a diagnostic.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Equals => "'='",
            TokenKind::Digraph => "'digraph'",
            TokenKind::Identifier => "an identifier",
            TokenKind::Quote => "a quoted string",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::OpenSquare => "'['",
            TokenKind::CloseSquare => "']'",
            TokenKind::Label => "'label'",
            TokenKind::Semicolon => "';'",
            TokenKind::Arrow => "'->'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Equals => "EQUALS",
            TokenKind::Digraph => "DIGRAPH",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Quote => "QUOTE",
            TokenKind::OpenCurly => "OPEN_CURLY",
            TokenKind::CloseCurly => "CLOSE_CURLY",
            TokenKind::OpenSquare => "OPEN_SQUARE",
            TokenKind::CloseSquare => "CLOSE_SQUARE",
            TokenKind::Label => "LABEL",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Arrow => "ARROW",
        };
        write!(f, "{name}")
    }
}
