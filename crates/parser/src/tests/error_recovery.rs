// Error Handling Tests
//
// Lexical and syntactic failures surface as `SourceError` values with spans.

use crate::error::SourceError;
use crate::parse_source;

fn parse(input: &str) -> bool {
    parse_source(input).is_ok()
}

// ==================== SYNTAX ERROR TESTS ====================

#[test]
fn test_missing_semicolon_recovers() {
    // Semicolons are optional, so this should pass
    assert!(parse("var x := 10\nvar y := 20"));
}

#[test]
fn test_unclosed_paren() {
    assert!(!parse("const A := (1 + 2"));
}

#[test]
fn test_dangling_operator() {
    assert!(!parse("const A := 1 +"));
}

#[test]
fn test_missing_type_after_colon() {
    assert!(!parse("const A: = 1"));
}

#[test]
fn test_parse_error_points_past_declaration() {
    match parse_source("const A := 1 + )") {
        Err(SourceError::Parse(errors)) => {
            assert!(!errors.is_empty());
            assert!(errors[0].span().start >= 13);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_unexpected_end_of_input_span() {
    match parse_source("const A := 1 *") {
        Err(SourceError::Parse(errors)) => assert!(!errors.is_empty()),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

// ==================== LEXICAL ERROR TESTS ====================

#[test]
fn test_invalid_character() {
    match parse_source("const A := 1 @ 2") {
        Err(SourceError::Lex(error)) => {
            assert_eq!(error.span, 13..14);
            assert_eq!(error.text, "@");
        }
        other => panic!("Expected lex error, got {:?}", other),
    }
}
