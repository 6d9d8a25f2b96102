// Token Recognition Tests
//
// Keywords, operators, delimiters and identifiers.

use crate::token::Token;
use crate::{lex, lex_spanned};
use logos::Logos;

// Helper function to tokenize input and return all tokens
fn tokenize(input: &str) -> Vec<Result<Token, ()>> {
    Token::lexer(input).collect()
}

// Helper function to tokenize and assert single token
fn assert_single_token(input: &str, expected: Token) {
    let mut lexer = Token::lexer(input);
    let token = lexer.next();
    assert_eq!(token, Some(Ok(expected)), "Failed to match token for input: {}", input);
    assert_eq!(lexer.next(), None, "Expected single token, found more");
}

// ==================== KEYWORD TESTS ====================

#[test]
fn test_keyword_const() {
    assert_single_token("const", Token::Const);
}

#[test]
fn test_keyword_var() {
    assert_single_token("var", Token::Var);
}

#[test]
fn test_keyword_true() {
    assert_single_token("true", Token::True);
}

#[test]
fn test_keyword_false() {
    assert_single_token("false", Token::False);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_single_token("constant", Token::Identifier("constant".to_string()));
}

#[test]
fn test_type_names_are_identifiers() {
    assert_single_token("uint256", Token::Identifier("uint256".to_string()));
    assert_single_token("bool", Token::Identifier("bool".to_string()));
}

// ==================== OPERATOR TESTS ====================

#[test]
fn test_arithmetic_operators() {
    assert_eq!(
        tokenize("+ - * / % **"),
        vec![
            Ok(Token::Plus),
            Ok(Token::Minus),
            Ok(Token::Star),
            Ok(Token::Slash),
            Ok(Token::Percent),
            Ok(Token::Pow),
        ]
    );
}

#[test]
fn test_bitwise_operators() {
    assert_eq!(
        tokenize("& | ^ ~ << >>"),
        vec![
            Ok(Token::Ampersand),
            Ok(Token::Pipe),
            Ok(Token::Caret),
            Ok(Token::Tilde),
            Ok(Token::Shl),
            Ok(Token::Shr),
        ]
    );
}

#[test]
fn test_comparison_and_logic_operators() {
    assert_eq!(
        tokenize("== != < > <= >= && || !"),
        vec![
            Ok(Token::DoubleEq),
            Ok(Token::NotEq),
            Ok(Token::Lt),
            Ok(Token::Gt),
            Ok(Token::LtEq),
            Ok(Token::GtEq),
            Ok(Token::And),
            Ok(Token::Or),
            Ok(Token::Not),
        ]
    );
}

#[test]
fn test_declaration_punctuation() {
    assert_eq!(
        lex("const A: uint8 = 1;"),
        vec![
            Token::Const,
            Token::Identifier("A".to_string()),
            Token::Colon,
            Token::Identifier("uint8".to_string()),
            Token::Eq,
            Token::Int("1".to_string()),
            Token::Semicolon,
        ]
    );
}

// ==================== STRING AND COMMENT TESTS ====================

#[test]
fn test_string_keeps_quotes() {
    assert_single_token(r#""abc""#, Token::String(r#""abc""#.to_string()));
}

#[test]
fn test_line_comment_is_skipped() {
    assert_eq!(
        lex("A // the answer\n:= 42"),
        vec![
            Token::Identifier("A".to_string()),
            Token::ColonEq,
            Token::Int("42".to_string()),
        ]
    );
}

// ==================== SPAN TESTS ====================

#[test]
fn test_lex_spanned_reports_byte_ranges() {
    let tokens = lex_spanned("A := 10").unwrap();
    assert_eq!(tokens[0].1, 0..1);
    assert_eq!(tokens[1].1, 2..4);
    assert_eq!(tokens[2].1, 5..7);
}

#[test]
fn test_lex_spanned_rejects_invalid_character() {
    let error = lex_spanned("A := 1 $ 2").unwrap_err();
    assert_eq!(error.span, 7..8);
    assert_eq!(error.text, "$");
}
