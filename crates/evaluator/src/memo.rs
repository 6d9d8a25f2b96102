// Evaluation memo table
//
// Side table from expression identity to its folded result. Only results whose
// value is a foldable numeric literal are ever stored.

use parser::module::ExprId;
use rustc_hash::FxHashMap;
use types::{TypeCategory, TypeRef};

/// The type an expression has under ordinary inference, paired with the
/// literal type it folded to
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub source_type: TypeRef,
    pub evaluated_value: TypeRef,
}

impl TypedValue {
    pub fn new(source_type: TypeRef, evaluated_value: TypeRef) -> Self {
        Self {
            source_type,
            evaluated_value,
        }
    }

    /// A value that is its own source type, as for literals
    pub fn same(ty: TypeRef) -> Self {
        Self {
            source_type: ty.clone(),
            evaluated_value: ty,
        }
    }

    pub fn is_foldable(&self) -> bool {
        self.evaluated_value.category() == TypeCategory::RationalNumber
    }
}

#[derive(Debug, Default, Clone)]
pub struct EvaluationMap {
    evaluations: FxHashMap<ExprId, TypedValue>,
}

impl EvaluationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, node: ExprId, ty: TypeRef) {
        self.set_result(node, Some(TypedValue::same(ty)));
    }

    /// Store `result` if it folded to a numeric literal, otherwise do nothing
    pub fn set_result(&mut self, node: ExprId, result: Option<TypedValue>) {
        if let Some(result) = result.filter(TypedValue::is_foldable) {
            self.evaluations.insert(node, result);
        }
    }

    pub fn result(&self, node: ExprId) -> Option<&TypedValue> {
        self.evaluations.get(&node)
    }

    pub fn source_type(&self, node: ExprId) -> Option<TypeRef> {
        self.result(node).map(|r| r.source_type.clone())
    }

    pub fn evaluated_value(&self, node: ExprId) -> Option<TypeRef> {
        self.result(node).map(|r| r.evaluated_value.clone())
    }

    pub fn is_evaluated(&self, node: ExprId) -> bool {
        self.evaluations.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}
