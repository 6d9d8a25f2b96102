// Constant expression evaluator
//
// Walks an expression in a `Module`, folding every subtree it can resolve to an
// exact rational and memoizing the results by node identity. Integer-typed
// constants fold directly with rational arithmetic; everything else is handed to
// the type system's operator semantics.

use crate::diagnostic::{DiagnosticSink, ErrorCode};
use crate::memo::{EvaluationMap, TypedValue};
use log::{debug, error, trace};
use parser::ast::{BinaryOp, Literal, Span, UnaryOp};
use parser::module::{DeclId, ExprId, Module, NodeKind};
use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use types::{ArithmeticError, MAX_BITS, Rational, TypeCategory, TypeRef, TypeSystem};

/// Nesting limit for constant initializers; deeper chains are treated as cycles
pub const MAX_RECURSION_DEPTH: usize = 32;

/// Why an evaluation request stopped early
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A fatal diagnostic was reported
    #[error("constant evaluation aborted")]
    Fatal,

    /// Upstream type information is inconsistent
    #[error("internal error: {0}")]
    Internal(String),
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Operators folded directly on integer-typed constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithmeticOp {
    BitOr,
    BitAnd,
    BitXor,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOp {
    fn from_binary(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::BitOr => Some(ArithmeticOp::BitOr),
            BinaryOp::BitAnd => Some(ArithmeticOp::BitAnd),
            BinaryOp::BitXor => Some(ArithmeticOp::BitXor),
            BinaryOp::Add => Some(ArithmeticOp::Add),
            BinaryOp::Sub => Some(ArithmeticOp::Sub),
            BinaryOp::Mul => Some(ArithmeticOp::Mul),
            BinaryOp::Div => Some(ArithmeticOp::Div),
            BinaryOp::Mod => Some(ArithmeticOp::Mod),
            _ => None,
        }
    }

    fn apply(self, lhs: &Rational, rhs: &Rational) -> Result<Rational, ArithmeticError> {
        match self {
            ArithmeticOp::BitOr => Ok(lhs.bit_or(rhs)),
            ArithmeticOp::BitAnd => Ok(lhs.bit_and(rhs)),
            ArithmeticOp::BitXor => Ok(lhs.bit_xor(rhs)),
            ArithmeticOp::Add => lhs.checked_add(rhs),
            ArithmeticOp::Sub => lhs.checked_sub(rhs),
            ArithmeticOp::Mul => lhs.checked_mul(rhs),
            // Integer division: the exact quotient truncated toward zero
            ArithmeticOp::Div => lhs.checked_div(rhs).map(|q| q.truncate()),
            ArithmeticOp::Mod => lhs.checked_rem(rhs),
        }
    }
}

/// Holds one level of initializer nesting; released when dropped
struct DepthGuard {
    depth: Rc<Cell<usize>>,
}

impl DepthGuard {
    fn enter(depth: &Rc<Cell<usize>>) -> Self {
        depth.set(depth.get() + 1);
        DepthGuard {
            depth: Rc::clone(depth),
        }
    }

    fn depth(&self) -> usize {
        self.depth.get()
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

fn is_integer(ty: &TypeRef) -> bool {
    ty.category() == TypeCategory::Integer
}

/// Folds constant expressions of one module.
///
/// The memo table is owned by the caller, so a single table can serve many
/// evaluators (or many calls on one evaluator) within an analysis pass.
pub struct ConstantEvaluator<'a, T: TypeSystem + ?Sized> {
    module: &'a Module,
    types: &'a T,
    sink: &'a mut dyn DiagnosticSink,
    evaluations: &'a mut EvaluationMap,
    // Non-numeric initializer results, kept for the current request only
    transient: FxHashMap<ExprId, TypedValue>,
    depth: Rc<Cell<usize>>,
}

impl<'a, T: TypeSystem + ?Sized> ConstantEvaluator<'a, T> {
    pub fn new(
        module: &'a Module,
        types: &'a T,
        sink: &'a mut dyn DiagnosticSink,
        evaluations: &'a mut EvaluationMap,
    ) -> Self {
        ConstantEvaluator {
            module,
            types,
            sink,
            evaluations,
            transient: FxHashMap::default(),
            depth: Rc::new(Cell::new(0)),
        }
    }

    /// The folded literal type of `expr`, or `None` if it is not a constant
    /// or evaluation was aborted
    pub fn evaluate(&mut self, expr: ExprId) -> Option<TypeRef> {
        self.try_evaluate(expr).ok().flatten()
    }

    /// Like `evaluate`, but tells an aborted request apart from a non-constant
    pub fn try_evaluate(&mut self, expr: ExprId) -> EvalResult<Option<TypeRef>> {
        self.transient.clear();
        self.visit(expr)?;
        Ok(self.evaluations.evaluated_value(expr))
    }

    pub fn is_evaluated(&self, expr: ExprId) -> bool {
        self.evaluations.is_evaluated(expr)
    }

    pub fn result(&self, expr: ExprId) -> Option<TypedValue> {
        self.evaluations.result(expr).cloned()
    }

    pub fn source_type(&self, expr: ExprId) -> Option<TypeRef> {
        self.evaluations.source_type(expr)
    }

    pub fn evaluated_value(&self, expr: ExprId) -> Option<TypeRef> {
        self.evaluations.evaluated_value(expr)
    }

    fn visit(&mut self, expr: ExprId) -> EvalResult<Option<TypedValue>> {
        if let Some(result) = self.evaluations.result(expr) {
            trace!("{:?} already folded", expr);
            return Ok(Some(result.clone()));
        }

        let module = self.module;
        let node = module.node(expr);
        trace!("visiting {:?} at {:?}", expr, node.span);

        let result = match &node.kind {
            NodeKind::Literal(literal) => self.visit_literal(literal),
            NodeKind::Unary { op, operand } => self.visit_unary(*op, *operand)?,
            NodeKind::Binary { op, lhs, rhs } => self.visit_binary(*op, *lhs, *rhs, &node.span)?,
            NodeKind::Identifier { declaration, .. } => {
                self.visit_identifier(*declaration, &node.span)?
            }
            NodeKind::Tuple {
                components,
                is_inline_array,
            } => self.visit_tuple(components, *is_inline_array)?,
        };

        self.evaluations.set_result(expr, result.clone());
        Ok(result)
    }

    fn visit_literal(&self, literal: &Literal) -> Option<TypedValue> {
        self.types.for_literal(literal).map(TypedValue::same)
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: ExprId) -> EvalResult<Option<TypedValue>> {
        let Some(operand) = self.visit(operand)? else {
            return Ok(None);
        };
        Ok(self
            .types
            .unary_operator_result(&operand.evaluated_value, op)
            .map(TypedValue::same))
    }

    fn visit_binary(
        &mut self,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        span: &Span,
    ) -> EvalResult<Option<TypedValue>> {
        let left = self.visit(lhs)?;
        let right = self.visit(rhs)?;
        let (Some(left), Some(right)) = (left, right) else {
            return Ok(None);
        };

        if let Some(arithmetic) = ArithmeticOp::from_binary(op) {
            if let (Some(lhs_value), Some(rhs_value)) = (
                left.evaluated_value.as_rational(),
                right.evaluated_value.as_rational(),
            ) {
                if is_integer(&left.source_type) && is_integer(&right.source_type) {
                    debug!(
                        "folding {} {} {} as {}",
                        lhs_value, op, rhs_value, left.source_type
                    );
                    return self.fold_integers(arithmetic, op, &left, lhs_value, rhs_value, span);
                }
            }
        }

        debug!(
            "resolving {} {} {} through the type system",
            left.evaluated_value, op, right.evaluated_value
        );
        let Some(common) =
            self.types
                .binary_operator_result(&left.evaluated_value, op, &right.evaluated_value)
        else {
            self.sink.fatal_type_error(
                ErrorCode::IncompatibleOperator,
                span.clone(),
                format!(
                    "Operator {} not compatible with types {} and {}",
                    op, left.evaluated_value, right.evaluated_value
                ),
            );
            return Err(EvalError::Fatal);
        };

        let value = if op.is_comparison() {
            self.types.boolean()
        } else {
            common
        };
        Ok(Some(TypedValue::same(value)))
    }

    // The result keeps the left operand's source type.
    fn fold_integers(
        &mut self,
        arithmetic: ArithmeticOp,
        op: BinaryOp,
        left: &TypedValue,
        lhs: &Rational,
        rhs: &Rational,
        span: &Span,
    ) -> EvalResult<Option<TypedValue>> {
        if lhs.is_fractional() || rhs.is_fractional() {
            let message = format!(
                "integer-typed operands folded to fractional values: {} {} {}",
                lhs, op, rhs
            );
            error!("{}", message);
            self.sink
                .fatal_type_error(ErrorCode::InternalError, span.clone(), message.clone());
            return Err(EvalError::Internal(message));
        }

        let (code, message) = match arithmetic.apply(lhs, rhs) {
            Ok(value) => {
                return Ok(Some(TypedValue::new(
                    left.source_type.clone(),
                    self.types.rational_number(value),
                )));
            }
            Err(ArithmeticError::DivisionByZero) => {
                (ErrorCode::DivisionByZero, "Division by 0.".to_string())
            }
            Err(_) => (
                ErrorCode::ValueOutOfRange,
                format!("Constant value exceeds {} bits.", MAX_BITS),
            ),
        };
        self.sink.type_error(code, span.clone(), message);
        Ok(None)
    }

    /// Resolves a reference to a constant through its initializer.
    ///
    /// Numeric initializers are memoized in the session table. Bool and string
    /// initializers are cached for the current request only, so each constant
    /// is resolved once per request even when referenced many times.
    fn visit_identifier(
        &mut self,
        declaration: Option<DeclId>,
        span: &Span,
    ) -> EvalResult<Option<TypedValue>> {
        let Some(id) = declaration else {
            return Ok(None);
        };
        let module = self.module;
        let decl = module.declaration(id);
        if !decl.is_const {
            return Ok(None);
        }
        let Some(value) = decl.value else {
            return Ok(None);
        };

        let cached = self
            .evaluations
            .result(value)
            .or_else(|| self.transient.get(&value))
            .cloned();
        let initializer = match cached {
            Some(folded) => Some(folded),
            None => {
                let guard = DepthGuard::enter(&self.depth);
                if guard.depth() > MAX_RECURSION_DEPTH {
                    debug!("giving up on '{}' at depth {}", decl.name, guard.depth());
                    self.sink.fatal_type_error(
                        ErrorCode::CyclicConstant,
                        span.clone(),
                        "Cyclic constant definition (or maximum recursion depth exhausted)."
                            .to_string(),
                    );
                    return Err(EvalError::Fatal);
                }
                trace!("evaluating initializer of '{}' at depth {}", decl.name, guard.depth());
                let folded = self.visit(value)?;
                if let Some(folded) = folded.as_ref().filter(|f| !f.is_foldable()) {
                    self.transient.insert(value, folded.clone());
                }
                folded
            }
        };

        // References carry the constant's own type when the value converts to it
        Ok(initializer.map(|folded| {
            let source_type = self
                .types
                .declaration_type(id)
                .filter(|declared| {
                    self.types
                        .is_implicitly_convertible(&folded.evaluated_value, declared)
                })
                .unwrap_or(folded.source_type);
            TypedValue::new(source_type, folded.evaluated_value)
        }))
    }

    fn visit_tuple(
        &mut self,
        components: &[ExprId],
        is_inline_array: bool,
    ) -> EvalResult<Option<TypedValue>> {
        match components {
            [inner] if !is_inline_array => self.visit(*inner),
            _ => {
                for component in components {
                    self.visit(*component)?;
                }
                Ok(None)
            }
        }
    }
}

/// Evaluate `expr` in a fresh session
pub fn evaluate<T: TypeSystem + ?Sized>(
    sink: &mut dyn DiagnosticSink,
    module: &Module,
    types: &T,
    expr: ExprId,
) -> Option<TypeRef> {
    let mut evaluations = EvaluationMap::new();
    ConstantEvaluator::new(module, types, sink, &mut evaluations).evaluate(expr)
}
