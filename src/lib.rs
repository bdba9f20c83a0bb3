//! # dotsimplify
//!
//! Parser and transitive reduction for the dependency graphs behind a book's
//! chapter diagrams.
//
//   description text ──► Lexer ──► Tokens ──► Parser ──► Graph ──► simplify ──► render
//
// The accepted format is a small subset of Graphviz `dot`: a single
// `digraph` holding `node [label="..."];` and `from -> to;` statements.
// simplify() removes every edge that a longer path already implies.
//
// USAGE:
//   let mut graph = dotsimplify::parse(source_text)?;
//   let removed = graph.simplify();
//   print!("{graph}");
//
//   // or in one step:
//   let text = dotsimplify::simplify_source(source_text)?;

pub mod condense;
pub mod error;
pub mod graph;
pub mod lexer;
pub mod parser;
pub mod reduce;
pub mod token;

pub use condense::{parse_index, ChapterIndex, Condenser};
pub use error::{Error, ErrorKind, Phase, Result};
pub use graph::{render, Adjacency, Edge, Graph, Label, Statement};
pub use lexer::tokenize;
pub use parser::parse;
pub use reduce::{redundant_edges, simplify};

/// Parse, simplify and render in one pass.
pub fn simplify_source(source: &str) -> Result<String> {
    let mut graph = parse(source)?;
    graph.simplify();
    Ok(render(&graph))
}
