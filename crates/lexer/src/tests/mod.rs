// Test module for lexer
//
// Unit tests for the constant-expression lexer, grouped by token category.

mod token_tests;
