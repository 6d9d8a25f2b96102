// Literal and Unary Evaluation Tests

use super::{eval, fold, r};
use types::Rational;

// ==================== LITERAL TESTS ====================

#[test]
fn test_integer_literal() {
    assert_eq!(fold("42;"), r(42));
}

#[test]
fn test_hex_literal() {
    assert_eq!(fold("0xff;"), r(255));
}

#[test]
fn test_fractional_literal_is_exact() {
    let value = fold("2.5;");
    assert_eq!(value, Rational::from_literal("2.50").unwrap());
    assert_eq!(value.to_string(), "5/2");
}

#[test]
fn test_literal_value_type_name() {
    let (value, _) = eval("1e3;");
    assert_eq!(value.unwrap().to_string(), "int_const 1000");
}

#[test]
fn test_bool_literal_is_not_a_folded_value() {
    let (value, diagnostics) = eval("true;");
    assert!(value.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_string_literal_is_not_a_folded_value() {
    let (value, diagnostics) = eval("\"abc\";");
    assert!(value.is_none());
    assert!(diagnostics.is_empty());
}

// ==================== UNARY TESTS ====================

#[test]
fn test_negation() {
    assert_eq!(fold("-5;"), r(-5));
    assert_eq!(fold("--5;"), r(5));
}

#[test]
fn test_bit_not() {
    assert_eq!(fold("~5;"), r(-6));
}

#[test]
fn test_unary_on_non_constant_is_silent() {
    let (value, diagnostics) = eval("var v: int = 1; -v;");
    assert!(value.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_unary_without_semantics_is_silent() {
    let (value, diagnostics) = eval("-true;");
    assert!(value.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_logical_not_does_not_fold() {
    let (value, diagnostics) = eval("!true;");
    assert!(value.is_none());
    assert!(diagnostics.is_empty());
}
