// Lexer — Converts graph description text into a stream of Tokens
//
// The lexer is a hand-written scanner (no regex, no generator) driven by an
// ordered rule table. At each position every rule is tried in table order and
// the FIRST one that matches wins, not the longest. The table order therefore
// carries meaning:
//
//   1. `digraph` and `label` come before the identifier rule, so the keywords
//      are never swallowed as identifiers. A side effect is that `digraphs`
//      lexes as DIGRAPH + IDENTIFIER("s").
//
//   2. Whitespace sits near the top; it produces no token.
//
//   3. A quoted string runs from `"` to the LAST `"` on the same line and
//      keeps both quotes in its text.
//
// The parser pulls tokens one at a time through next_token(), so a grammar
// error is reported before any lex error further along the input.

use crate::error::{Error, ErrorKind, Result};
use crate::token::{Span, Token, TokenKind};

/// Number of characters shown in a lex error excerpt.
const EXCERPT_LEN: usize = 20;

/// One alternative in the rule table. `matcher` returns the byte length of
/// the match at the start of its input, or `None`.
struct Rule {
    kind: Option<TokenKind>,
    matcher: fn(&str) -> Option<usize>,
}

const RULES: &[Rule] = &[
    Rule {
        kind: Some(TokenKind::Equals),
        matcher: equals,
    },
    Rule {
        kind: None,
        matcher: whitespace,
    },
    Rule {
        kind: Some(TokenKind::Digraph),
        matcher: digraph,
    },
    Rule {
        kind: Some(TokenKind::Quote),
        matcher: quoted,
    },
    Rule {
        kind: Some(TokenKind::OpenCurly),
        matcher: open_curly,
    },
    Rule {
        kind: Some(TokenKind::CloseCurly),
        matcher: close_curly,
    },
    Rule {
        kind: Some(TokenKind::OpenSquare),
        matcher: open_square,
    },
    Rule {
        kind: Some(TokenKind::CloseSquare),
        matcher: close_square,
    },
    Rule {
        kind: Some(TokenKind::Label),
        matcher: label,
    },
    Rule {
        kind: Some(TokenKind::Semicolon),
        matcher: semicolon,
    },
    Rule {
        kind: Some(TokenKind::Identifier),
        matcher: identifier,
    },
    Rule {
        kind: Some(TokenKind::Arrow),
        matcher: arrow,
    },
];

fn literal(s: &str, lit: &str) -> Option<usize> {
    s.starts_with(lit).then_some(lit.len())
}

fn equals(s: &str) -> Option<usize> {
    literal(s, "=")
}

fn digraph(s: &str) -> Option<usize> {
    literal(s, "digraph")
}

fn open_curly(s: &str) -> Option<usize> {
    literal(s, "{")
}

fn close_curly(s: &str) -> Option<usize> {
    literal(s, "}")
}

fn open_square(s: &str) -> Option<usize> {
    literal(s, "[")
}

fn close_square(s: &str) -> Option<usize> {
    literal(s, "]")
}

fn label(s: &str) -> Option<usize> {
    literal(s, "label")
}

fn semicolon(s: &str) -> Option<usize> {
    literal(s, ";")
}

fn arrow(s: &str) -> Option<usize> {
    literal(s, "->")
}

fn whitespace(s: &str) -> Option<usize> {
    let len = s
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        .count();
    (len > 0).then_some(len)
}

fn identifier(s: &str) -> Option<usize> {
    let len = s
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    (len > 0).then_some(len)
}

fn quoted(s: &str) -> Option<usize> {
    if !s.starts_with('"') {
        return None;
    }
    let line = s.split('\n').next().unwrap_or(s);
    match line.rfind('"') {
        Some(last) if last > 0 => Some(last + 1),
        _ => None,
    }
}

/// Lexer state over a source string.
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire source, returning a Vec of Tokens.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        tracing::debug!(tokens = tokens.len(), bytes = self.src.len(), "lexed source");
        Ok(tokens)
    }

    /// Read the next token, skipping whitespace. `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        while self.pos < self.src.len() {
            if let Some(tok) = self.scan()? {
                return Ok(Some(tok));
            }
        }
        Ok(None)
    }

    /// Match one rule at the current position. Returns `None` when the match
    /// was whitespace.
    fn scan(&mut self) -> Result<Option<Token>> {
        let rest = &self.src[self.pos..];
        let start = self.span(0);

        let Some((rule, len)) = RULES
            .iter()
            .find_map(|rule| (rule.matcher)(rest).map(|len| (rule, len)))
        else {
            let excerpt: String = rest.chars().take(EXCERPT_LEN).collect();
            let len = rest.chars().next().map_or(1, char::len_utf8);
            return Err(Error::new(
                ErrorKind::UnexpectedInput { excerpt },
                Span::new(start.offset, len, start.line, start.col),
            ));
        };

        if len == 0 {
            return Err(Error::new(
                ErrorKind::Internal(format!(
                    "zero-length match at offset {}",
                    start.offset
                )),
                start,
            ));
        }

        let text = &rest[..len];
        self.advance_by(text);
        let span = Span::new(start.offset, len, start.line, start.col);
        Ok(rule.kind.map(|kind| Token::new(kind, text, span)))
    }

    /// Position just past everything consumed so far.
    pub fn position(&self) -> Span {
        self.span(0)
    }

    // Helpers

    fn advance_by(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += text.len();
    }

    fn span(&self, len: usize) -> Span {
        Span::new(self.pos, len, self.line, self.col)
    }
}

/// Tokenize a whole source string.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    Lexer::new(src).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        tokenize(src).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_header() {
        assert_eq!(
            lex("digraph deps {}"),
            vec![
                TokenKind::Digraph,
                TokenKind::Identifier,
                TokenKind::OpenCurly,
                TokenKind::CloseCurly,
            ]
        );
    }

    #[test]
    fn test_edge_statement() {
        assert_eq!(
            lex("a -> b;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(texts("a -> b;"), vec!["a", "->", "b", ";"]);
    }

    #[test]
    fn test_label_statement() {
        let src = r#"intro [label="Getting started"];"#;
        assert_eq!(
            lex(src),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenSquare,
                TokenKind::Label,
                TokenKind::Equals,
                TokenKind::Quote,
                TokenKind::CloseSquare,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(texts(src)[4], "\"Getting started\"");
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert_eq!(lex("digraph g { a -> b ; }"), lex("digraph g{a->b;}"));
    }

    #[test]
    fn test_keyword_prefix_wins_over_identifier() {
        assert_eq!(
            texts("digraphs labels"),
            vec!["digraph", "s", "label", "s"]
        );
        assert_eq!(
            lex("labelled"),
            vec![TokenKind::Label, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_quote_extends_to_last_quote_on_line() {
        let toks = tokenize("\"a\" \"b\"\n\"c\"").unwrap();
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].text, "\"a\" \"b\"");
        assert_eq!(toks[1].text, "\"c\"");
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let err = tokenize("\"open\n\"").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedInput { .. }));
        assert_eq!(err.span.map(|s| s.offset), Some(0));
    }

    #[test]
    fn test_error_excerpt_is_twenty_chars() {
        let err = tokenize("a =>bbbbbbbbbbbbbbbbbbbbbbbbbbbbb").unwrap_err();
        match err.kind {
            ErrorKind::UnexpectedInput { excerpt } => {
                assert_eq!(excerpt, ">bbbbbbbbbbbbbbbbbbb");
                assert_eq!(excerpt.chars().count(), 20);
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_excerpt_short_input() {
        let err = tokenize("a -").unwrap_err();
        match err.kind {
            ErrorKind::UnexpectedInput { excerpt } => assert_eq!(excerpt, "-"),
            other => panic!("expected lex error, got {other:?}"),
        }
        assert_eq!(err.span.map(|s| s.col), Some(3));
    }

    #[test]
    fn test_spans_reconstitute_input() {
        let src = "digraph g {\n    a -> b;\n}\n";
        let toks = tokenize(src).unwrap();
        for tok in &toks {
            assert!(!tok.text.is_empty());
            assert_eq!(&src[tok.span.offset..tok.span.offset + tok.span.len], tok.text);
        }
        let non_ws: String = src.chars().filter(|c| !c.is_whitespace()).collect();
        let joined: String = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, non_ws);
    }

    #[test]
    fn test_multiline_span() {
        let toks = tokenize("digraph g {\n  a -> b;\n}").unwrap();
        assert_eq!(toks[3].text, "a");
        assert_eq!(toks[3].span.line, 2);
        assert_eq!(toks[3].span.col, 3);
        assert_eq!(toks[7].span.line, 3);
        assert_eq!(toks[7].span.col, 1);
    }

    #[test]
    fn test_carriage_return_is_whitespace() {
        assert_eq!(lex("a\r\n->\r\nb;"), lex("a -> b;"));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t ").unwrap().is_empty());
    }
}
