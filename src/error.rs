// Error types for dotsimplify

use crate::token::Span;
use std::fmt;
use thiserror::Error as ThisError;

/// Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that can occur during lexing, parsing, or graph handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Option<Span>,
    pub source_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ErrorKind {
    // Lexer errors
    #[error("unable to lex: \"{excerpt}\"...")]
    UnexpectedInput { excerpt: String },

    // Parser errors
    #[error("expected {expected}, got {got}")]
    UnexpectedToken { expected: String, got: String },
    #[error("expected {expected}, got end of input")]
    UnexpectedEof { expected: String },

    // General
    #[error("internal error: {0}")]
    Internal(String),
    #[error("{0}")]
    Io(String),
}

/// Which stage of the pipeline produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Internal,
    Io,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            source_line: None,
        }
    }

    pub fn internal(s: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal(s.into()),
            span: None,
            source_line: None,
        }
    }

    pub fn io(s: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io(s.into()),
            span: None,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, line: String) -> Self {
        self.source_line = Some(line);
        self
    }

    /// Attach the source line the span points into, if any.
    pub fn with_source(self, source: &str) -> Self {
        match self.span {
            Some(span) => match source.lines().nth(span.line.saturating_sub(1)) {
                Some(line) => self.with_source_line(line.to_string()),
                None => self,
            },
            None => self,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.kind {
            ErrorKind::UnexpectedInput { .. } => Phase::Lex,
            ErrorKind::UnexpectedToken { .. } | ErrorKind::UnexpectedEof { .. } => Phase::Parse,
            ErrorKind::Internal(_) => Phase::Internal,
            ErrorKind::Io(_) => Phase::Io,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "[{}:{}] ", span.line, span.col)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(line) = &self.source_line {
            write!(f, "\n  | {line}")?;
            if let Some(span) = &self.span {
                write!(f, "\n  | {}^", " ".repeat(span.col.saturating_sub(1)))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_caret() {
        let err = Error::new(
            ErrorKind::UnexpectedToken {
                expected: "';'".into(),
                got: "'}'".into(),
            },
            Span::new(12, 1, 2, 5),
        )
        .with_source_line("  a }".into());
        assert_eq!(err.to_string(), "[2:5] expected ';', got '}'\n  |   a }\n  |     ^");
    }

    #[test]
    fn test_with_source_picks_span_line() {
        let err = Error::new(
            ErrorKind::UnexpectedInput {
                excerpt: "=> b".into(),
            },
            Span::new(0, 1, 2, 3),
        )
        .with_source("digraph g {\na => b;\n}");
        assert_eq!(err.source_line.as_deref(), Some("a => b;"));
    }

    #[test]
    fn test_phase() {
        assert_eq!(Error::internal("x").phase(), Phase::Internal);
        assert_eq!(Error::io("x").phase(), Phase::Io);
        let eof = Error::new(
            ErrorKind::UnexpectedEof {
                expected: "'}'".into(),
            },
            Span::new(0, 0, 1, 1),
        );
        assert_eq!(eof.phase(), Phase::Parse);
    }
}
