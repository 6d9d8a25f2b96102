// Test module for parser
//
// Unit tests for the parser and the module arena.
// Tests are organized by category: expressions, precedence, statements,
// error handling and name resolution.

mod error_recovery;
mod module_tests;
