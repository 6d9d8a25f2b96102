// Test module for constant evaluation
//
// Shared helpers: build a module from source text and evaluate its last
// expression statement, optionally through a type system that counts calls.

mod literal_tests;
mod session_tests;

use crate::diagnostic::{Diagnostic, ErrorReporter};
use crate::evaluator::evaluate;
use parser::ast::{BinaryOp, Literal, UnaryOp};
use parser::module::{DeclId, ExprId, Module};
use parser::parse_module;
use std::cell::Cell;
use types::{Rational, TypeProvider, TypeRef, TypeSystem};

pub fn setup(source: &str) -> (Module, TypeProvider) {
    let module = parse_module(source).expect("source should parse and resolve");
    let types = TypeProvider::for_module(&module).expect("type names should resolve");
    (module, types)
}

pub fn last_expr(module: &Module) -> ExprId {
    *module.expressions().last().expect("no expression statement")
}

/// One-shot evaluation of the last expression statement
pub fn eval(source: &str) -> (Option<TypeRef>, Vec<Diagnostic>) {
    let (module, types) = setup(source);
    let mut reporter = ErrorReporter::new();
    let value = evaluate(&mut reporter, &module, &types, last_expr(&module));
    (value, reporter.into_diagnostics())
}

/// The folded rational of the last expression, asserting no diagnostics
pub fn fold(source: &str) -> Rational {
    let (value, diagnostics) = eval(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    value
        .and_then(|v| v.as_rational().cloned())
        .unwrap_or_else(|| panic!("'{}' did not fold", source))
}

pub fn r(value: i64) -> Rational {
    Rational::from(value)
}

/// Delegates to a `TypeProvider`, counting operator resolutions
pub struct CountingTypes<'a> {
    inner: &'a TypeProvider,
    pub unary_calls: Cell<usize>,
    pub binary_calls: Cell<usize>,
}

impl<'a> CountingTypes<'a> {
    pub fn new(inner: &'a TypeProvider) -> Self {
        Self {
            inner,
            unary_calls: Cell::new(0),
            binary_calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.unary_calls.get() + self.binary_calls.get()
    }
}

impl TypeSystem for CountingTypes<'_> {
    fn for_literal(&self, literal: &Literal) -> Option<TypeRef> {
        self.inner.for_literal(literal)
    }

    fn rational_number(&self, value: Rational) -> TypeRef {
        self.inner.rational_number(value)
    }

    fn boolean(&self) -> TypeRef {
        self.inner.boolean()
    }

    fn declaration_type(&self, declaration: DeclId) -> Option<TypeRef> {
        self.inner.declaration_type(declaration)
    }

    fn unary_operator_result(&self, operand: &TypeRef, op: UnaryOp) -> Option<TypeRef> {
        self.unary_calls.set(self.unary_calls.get() + 1);
        self.inner.unary_operator_result(operand, op)
    }

    fn binary_operator_result(&self, lhs: &TypeRef, op: BinaryOp, rhs: &TypeRef) -> Option<TypeRef> {
        self.binary_calls.set(self.binary_calls.get() + 1);
        self.inner.binary_operator_result(lhs, op, rhs)
    }
}
