// Type provider
//
// The capability constant evaluation consumes: literal types, operator result
// types and the declared type of every declaration in a module.

use crate::rational::Rational;
use crate::types::{Type, TypeRef};
use parser::ast::{BinaryOp, Literal, Span, UnaryOp};
use parser::module::{DeclId, Module};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use thiserror::Error;

pub trait TypeSystem {
    /// Type of a literal; `None` for a numeric literal that cannot be represented
    fn for_literal(&self, literal: &Literal) -> Option<TypeRef>;

    /// Literal type carrying an exact value
    fn rational_number(&self, value: Rational) -> TypeRef;

    fn boolean(&self) -> TypeRef;

    /// Declared type of a declaration, `None` when it has no annotation
    fn declaration_type(&self, declaration: DeclId) -> Option<TypeRef>;

    fn unary_operator_result(&self, operand: &TypeRef, op: UnaryOp) -> Option<TypeRef>;

    fn binary_operator_result(&self, lhs: &TypeRef, op: BinaryOp, rhs: &TypeRef) -> Option<TypeRef>;

    /// Whether a value of type `from` may initialise a declaration of type `to`
    fn is_implicitly_convertible(&self, from: &TypeRef, to: &TypeRef) -> bool {
        from.is_implicitly_convertible_to(to)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown type name '{name}'")]
pub struct TypeNameError {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeProvider {
    boolean: TypeRef,
    declarations: FxHashMap<DeclId, TypeRef>,
}

impl Default for TypeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider {
    /// A provider that knows no declarations
    pub fn new() -> Self {
        Self {
            boolean: Rc::new(Type::Bool),
            declarations: FxHashMap::default(),
        }
    }

    /// Resolve the type annotation of every declaration in `module`
    pub fn for_module(module: &Module) -> Result<Self, Vec<TypeNameError>> {
        let mut provider = Self::new();
        let mut errors = Vec::new();

        for (id, declaration) in module.declarations() {
            let Some(type_name) = &declaration.type_name else {
                continue;
            };
            match Type::from_name(&type_name.name) {
                Some(ty) => {
                    provider.declarations.insert(id, Rc::new(ty));
                }
                None => errors.push(TypeNameError {
                    name: type_name.name.clone(),
                    span: type_name.span.clone(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(provider)
        } else {
            Err(errors)
        }
    }
}

impl TypeSystem for TypeProvider {
    fn for_literal(&self, literal: &Literal) -> Option<TypeRef> {
        match literal {
            Literal::Number(text) => Rational::from_literal(text).map(|v| self.rational_number(v)),
            Literal::Bool(_) => Some(self.boolean()),
            Literal::String(text) => Some(Rc::new(Type::StringLiteral(text.clone()))),
        }
    }

    fn rational_number(&self, value: Rational) -> TypeRef {
        Rc::new(Type::RationalNumber(value))
    }

    fn boolean(&self) -> TypeRef {
        Rc::clone(&self.boolean)
    }

    fn declaration_type(&self, declaration: DeclId) -> Option<TypeRef> {
        self.declarations.get(&declaration).cloned()
    }

    fn unary_operator_result(&self, operand: &TypeRef, op: UnaryOp) -> Option<TypeRef> {
        operand.unary_operator_result(op).map(Rc::new)
    }

    fn binary_operator_result(&self, lhs: &TypeRef, op: BinaryOp, rhs: &TypeRef) -> Option<TypeRef> {
        lhs.binary_operator_result(op, rhs).map(Rc::new)
    }
}
