// Parser — Recursive descent parser for graph descriptions
//
// The parser pulls Tokens from the Lexer and produces a Graph.
// It's a classic hand-written recursive descent parser with one method per
// grammar production:
//
//   graph      = "digraph" IDENTIFIER "{" statement* "}"
//   statement  = IDENTIFIER ( label_tail | edge_tail )
//   label_tail = "[" "label" "=" QUOTE "]" ";"
//   edge_tail  = "->" IDENTIFIER ";"
//
// The grammar is LL(1) on the token kind, so one token of lookahead pulled
// from the lexer on demand is enough and nothing is ever backtracked.
//
// ERROR RECOVERY: none. The first mismatch is returned as an error and no
// partial graph escapes.

use crate::error::{Error, ErrorKind, Result};
use crate::graph::{Graph, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Option<Token>,
}

impl<'src> Parser<'src> {
    /// Prime the parser with its first token.
    pub fn new(source: &'src str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a full `digraph` description. Anything after the closing brace
    /// is rejected.
    pub fn parse_graph(&mut self) -> Result<Graph> {
        self.expect(TokenKind::Digraph)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        let mut graph = Graph::new(name);
        self.expect(TokenKind::OpenCurly)?;
        while !self.check(TokenKind::CloseCurly) {
            let statement = self.parse_statement()?;
            graph.add_statement(statement);
        }
        self.expect(TokenKind::CloseCurly)?;

        if self.peek().is_some() {
            return Err(self.error_unexpected("end of input"));
        }

        tracing::debug!(
            graph = %graph.name,
            statements = graph.len(),
            "parsed graph"
        );
        Ok(graph)
    }

    // Statements

    fn parse_statement(&mut self) -> Result<Statement> {
        let name = self.expect(TokenKind::Identifier)?.text;
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::OpenSquare) => self.parse_label_tail(name),
            Some(TokenKind::Arrow) => self.parse_edge_tail(name),
            _ => Err(self.error_unexpected("'[' or '->'")),
        }
    }

    /// `[label="text"];`
    fn parse_label_tail(&mut self, name: String) -> Result<Statement> {
        self.expect(TokenKind::OpenSquare)?;
        self.expect(TokenKind::Label)?;
        self.expect(TokenKind::Equals)?;
        let label = self.expect(TokenKind::Quote)?.text;
        self.expect(TokenKind::CloseSquare)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::label(name, label))
    }

    /// `-> target;`
    fn parse_edge_tail(&mut self, from: String) -> Result<Statement> {
        self.expect(TokenKind::Arrow)?;
        let to = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::edge(from, to))
    }

    // Token stream helpers

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Consume the current token and pull the next one from the lexer.
    fn advance(&mut self) -> Result<Option<Token>> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if !self.check(kind) {
            return Err(self.error_unexpected(kind.describe()));
        }
        self.advance()?
            .ok_or_else(|| Error::internal("token vanished after a successful check"))
    }

    fn error_unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(tok) => Error::new(
                ErrorKind::UnexpectedToken {
                    expected: expected.to_string(),
                    got: tok.to_string(),
                },
                tok.span,
            ),
            None => Error::new(
                ErrorKind::UnexpectedEof {
                    expected: expected.to_string(),
                },
                self.lexer.position(),
            ),
        }
    }
}

// Public convenience function

/// Parse graph description text into a Graph.
pub fn parse(source: &str) -> Result<Graph> {
    Parser::new(source)
        .and_then(|mut parser| parser.parse_graph())
        .map_err(|e| e.with_source(source))
}
