// Integration tests for the graph description parser

use dotsimplify::token::TokenKind;
use dotsimplify::{parse, render, tokenize, ErrorKind, Phase, Statement};
use rstest::rstest;

const BOOK: &str = r#"digraph dep {
    intro [label="Introduction"];
    loops [label="Loops"];
    funcs [label="Functions"];
    intro -> loops;
    loops -> funcs;
}
"#;

// Lexing

#[test]
fn test_token_kinds_ignore_spacing() {
    let spaced: Vec<TokenKind> = tokenize("digraph g { a -> b ; }")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    let tight: Vec<TokenKind> = tokenize("digraph g{a->b;}")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(spaced, tight);
    assert_eq!(spaced.len(), 8);
}

// Parsing

#[test]
fn test_parse_book_graph() {
    let graph = parse(BOOK).unwrap();
    assert_eq!(graph.name, "dep");
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.labels().count(), 3);
    assert_eq!(graph.label_of("loops"), Some("\"Loops\""));
    assert_eq!(graph.statements()[3], Statement::edge("intro", "loops"));
}

#[test]
fn test_edges_need_no_label() {
    let graph = parse("digraph g { x -> y; }").unwrap();
    assert_eq!(graph.labels().count(), 0);
    assert_eq!(graph.nodes(), vec!["x", "y"]);
}

#[test]
fn test_duplicate_labels_kept() {
    let graph = parse(r#"digraph g { a [label="one"]; a [label="two"]; }"#).unwrap();
    assert_eq!(graph.labels().count(), 2);
    assert_eq!(graph.label_of("a"), Some("\"one\""));
}

#[test]
fn test_label_text_may_hold_punctuation() {
    let graph = parse("digraph g {\n  a [label=\"Files; I/O -> [streams]\"];\n}").unwrap();
    assert_eq!(graph.label_of("a"), Some("\"Files; I/O -> [streams]\""));
}

#[rstest]
#[case::double_arrow("digraph g { a => b; }", Phase::Parse)]
#[case::missing_close("digraph g { a -> b;", Phase::Parse)]
#[case::missing_open("digraph g a -> b; }", Phase::Parse)]
#[case::missing_name("digraph { }", Phase::Parse)]
#[case::bare_node("digraph g { a; }", Phase::Parse)]
#[case::edge_to_label("digraph g { a -> [label=\"x\"]; }", Phase::Parse)]
#[case::unquoted_label("digraph g { a [label=x]; }", Phase::Parse)]
#[case::undirected("digraph g { a -- b; }", Phase::Lex)]
#[case::stray_char("digraph g { a -> b; # }", Phase::Lex)]
#[case::empty("", Phase::Parse)]
fn test_rejects_malformed(#[case] src: &str, #[case] phase: Phase) {
    let err = parse(src).unwrap_err();
    assert_eq!(err.phase(), phase, "{err}");
}

#[test]
fn test_parse_error_names_expected_and_actual() {
    let err = parse("digraph g {\n    a -> b\n}").unwrap_err();
    match &err.kind {
        ErrorKind::UnexpectedToken { expected, got } => {
            assert_eq!(expected, "';'");
            assert_eq!(got, "CLOSE_CURLY '}'");
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
    assert!(err.to_string().starts_with("[3:1] expected ';', got CLOSE_CURLY '}'"));
}

#[test]
fn test_lex_error_reports_excerpt() {
    let err = parse("digraph g { a -> b; % trailing }").unwrap_err();
    match &err.kind {
        ErrorKind::UnexpectedInput { excerpt } => assert_eq!(excerpt, "% trailing }"),
        other => panic!("expected UnexpectedInput, got {other:?}"),
    }
    assert_eq!(err.span.map(|s| s.offset), Some(20));
}

// Rendering

#[test]
fn test_round_trip() {
    let graph = parse(BOOK).unwrap();
    assert_eq!(render(&graph), BOOK);
    assert_eq!(parse(&render(&graph)).unwrap(), graph);
}

#[test]
fn test_render_normalizes_layout() {
    let graph = parse("digraph g{a[label=\"A\"];a->b;}").unwrap();
    insta::assert_snapshot!(render(&graph).trim_end(), @r###"
    digraph g {
        a [label="A"];
        a -> b;
    }
    "###);
}
